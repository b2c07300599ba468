//! Folder and file listing shared between CLI and MCP.

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::models::file::{split_path, FileInfo};

/// Result of listing files.
#[derive(Debug, Clone, Serialize)]
pub struct FilesResult {
    /// Matching files, content not loaded.
    pub files: Vec<FileInfo>,
    pub total: usize,
}

impl From<Vec<FileInfo>> for FilesResult {
    fn from(files: Vec<FileInfo>) -> Self {
        Self {
            total: files.len(),
            files,
        }
    }
}

/// All distinct folders, alphabetically. The root folder is `""`.
pub fn list_folders(db: &Database) -> Result<Vec<String>> {
    db.list_folders()
}

/// Files directly inside `folder`, sorted by name.
pub fn list_files_in_folder(db: &Database, folder: &str) -> Result<FilesResult> {
    let folder = folder.trim_matches('/');
    Ok(db.files_in_folder(folder)?.into())
}

/// Every file with `extension` (given with or without the leading dot).
pub fn list_files_by_extension(db: &Database, extension: &str) -> Result<FilesResult> {
    let ext = extension.trim_start_matches('.');
    Ok(db.files_by_extension(ext)?.into())
}

/// Resolve a relative path to its file record.
pub fn get_file_by_path(db: &Database, path: &str, with_content: bool) -> Result<Option<FileInfo>> {
    let (folder, name) = split_path(path);
    db.get_file(&folder, &name, with_content)
}

/// Raw stored content, or `None` when no file exists at `path`.
///
/// Binary files return the binary sentinel text.
pub fn get_file_content(db: &Database, path: &str) -> Result<Option<String>> {
    Ok(get_file_by_path(db, path, true)?.and_then(|f| f.content))
}
