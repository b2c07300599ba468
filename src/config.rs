use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// Default directory name for atlas index data.
pub const ATLAS_DIR: &str = ".atlas";
/// Default database filename.
const DB_FILE: &str = "index.db";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";
/// Parse failure log filename.
const FAILURE_LOG_FILE: &str = "parse-failures.log";

/// Project-level configuration resolved from the repository root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the repository being indexed.
    pub project_root: PathBuf,
    /// Path to the `.atlas/` directory.
    pub atlas_dir: PathBuf,
    /// Path to the `SQLite` database.
    pub db_path: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Path to the parse failure log.
    pub failure_log_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .atlas/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Indexing configuration.
    pub indexing: IndexingSettings,
    /// Output configuration.
    pub output: OutputSettings,
    /// Parse failure logging configuration.
    pub failures: FailureSettings,
}

/// Indexing-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingSettings {
    /// Number of files persisted per commit.
    pub batch_size: usize,
    /// Directory names never descended into.
    pub exclude_dirs: Vec<String>,
    /// Also honour `.gitignore` files during the walk.
    pub respect_gitignore: bool,
    /// Extensions (without dot) handed to the structural extractor.
    pub source_extensions: Vec<String>,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            batch_size: 100,
            exclude_dirs: vec![".git".into(), ".hg".into(), ".svn".into()],
            respect_gitignore: false,
            source_extensions: vec!["py".into(), "pyi".into()],
        }
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "minified" (default) or "pretty".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "minified".into(),
        }
    }
}

/// Parse failure logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureSettings {
    /// Custom log file name (relative to .atlas/).
    pub log_file: Option<String>,
}

impl Config {
    /// Create config for a given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let atlas_dir = project_root.join(ATLAS_DIR);
        let db_path = atlas_dir.join(DB_FILE);
        let config_path = atlas_dir.join(CONFIG_FILE);
        let failure_log_path = atlas_dir.join(FAILURE_LOG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            project_root,
            atlas_dir,
            db_path,
            config_path,
            failure_log_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| AtlasError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Point the store at an explicit database file instead of `.atlas/index.db`.
    #[must_use]
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Save current settings to config.toml.
    pub fn save_settings(&self) -> Result<()> {
        self.ensure_atlas_dir()?;
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| AtlasError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Ensure the `.atlas/` directory and the database's parent directory exist.
    pub fn ensure_atlas_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.atlas_dir)?;
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Check whether the index database exists.
    #[must_use]
    pub fn index_exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Convert an absolute path to a project-relative path string.
    #[must_use]
    pub fn relative_path(&self, abs: &Path) -> String {
        abs.strip_prefix(&self.project_root)
            .unwrap_or(abs)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Whether a directory with this name is skipped by the walk.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name == ATLAS_DIR
            || self
                .settings
                .indexing
                .exclude_dirs
                .iter()
                .any(|d| d == name)
    }

    /// Whether files with this extension go through the structural extractor.
    #[must_use]
    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.settings
            .indexing
            .source_extensions
            .iter()
            .any(|e| e == ext)
    }

    /// Commit interval, never below one.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.settings.indexing.batch_size.max(1)
    }

    /// Get the effective parse failure log path.
    #[must_use]
    pub fn get_failure_log_path(&self) -> PathBuf {
        if let Some(custom) = &self.settings.failures.log_file {
            self.atlas_dir.join(custom)
        } else {
            self.failure_log_path.clone()
        }
    }
}
