use serde::Serialize;

/// Content stored for files that are not valid UTF-8.
pub const BINARY_SENTINEL: &str = "[BINARY FILE]";

/// A file row stored in the index database.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Database row ID (0 if not yet persisted).
    pub id: i64,
    /// Folder relative to the repository root ("" for the root itself).
    pub relative_folder: String,
    pub file_name: String,
    /// Suffix after the last dot, without the dot ("" if none).
    pub extension: String,
    /// Decoded text, or [`BINARY_SENTINEL`] for binary files.
    pub content: String,
    pub is_binary: bool,
    pub line_count: u32,
    /// SHA-256 of the raw bytes.
    pub hash: String,
}

impl FileRecord {
    /// Build a text file record. `line_count` is terminators + 1.
    #[must_use]
    pub fn text(relative_path: &str, content: String, hash: String) -> Self {
        let (relative_folder, file_name) = split_path(relative_path);
        let line_count = count_lines(&content);
        Self {
            id: 0,
            extension: extension_of(&file_name),
            relative_folder,
            file_name,
            content,
            is_binary: false,
            line_count,
            hash,
        }
    }

    /// Build a binary file record carrying the sentinel and zero lines.
    #[must_use]
    pub fn binary(relative_path: &str, hash: String) -> Self {
        let (relative_folder, file_name) = split_path(relative_path);
        Self {
            id: 0,
            extension: extension_of(&file_name),
            relative_folder,
            file_name,
            content: BINARY_SENTINEL.to_string(),
            is_binary: true,
            line_count: 0,
            hash,
        }
    }

    /// Repository-relative path with forward slashes.
    #[must_use]
    pub fn path(&self) -> String {
        join_path(&self.relative_folder, &self.file_name)
    }
}

/// File metadata as returned by the query layer.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub id: i64,
    pub relative_folder: String,
    pub file_name: String,
    pub extension: String,
    pub line_count: u32,
    pub is_binary: bool,
    /// Folder and file name joined.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Split a relative path into `(folder, file_name)`.
///
/// A leading `./` and any backslashes are normalized away; a path with no
/// separator lives in the root folder `""`.
#[must_use]
pub fn split_path(path: &str) -> (String, String) {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_start_matches("./").trim_start_matches('/');
    match trimmed.rsplit_once('/') {
        Some((folder, name)) => (folder.to_string(), name.to_string()),
        None => (String::new(), trimmed.to_string()),
    }
}

/// Join a folder and file name back into a relative path.
#[must_use]
pub fn join_path(folder: &str, file_name: &str) -> String {
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{folder}/{file_name}")
    }
}

/// Suffix after the last dot. Dotfiles such as `.gitignore` have no extension.
#[must_use]
pub fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(0) | None => String::new(),
        Some(pos) => file_name[pos + 1..].to_string(),
    }
}

/// Count of `\n` terminators plus one.
#[must_use]
pub fn count_lines(content: &str) -> u32 {
    content.bytes().filter(|&b| b == b'\n').count() as u32 + 1
}
