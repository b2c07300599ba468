use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index not found: run `atlas index` first")]
    IndexNotFound,

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid patch: {detail}")]
    InvalidPatch { detail: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
