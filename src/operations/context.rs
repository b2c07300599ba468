//! Definition context lookup shared between CLI and MCP.

use crate::db::Database;
use crate::edit::context::{extract_method_context, MethodContext};
use crate::error::Result;
use crate::operations::files::get_file_by_path;

/// Locate `name` in the stored content of `path` and return its block with context.
///
/// A missing or binary file yields `None`.
pub fn get_method_context(db: &Database, path: &str, name: &str) -> Result<Option<MethodContext>> {
    let Some(file) = get_file_by_path(db, path, true)? else {
        return Ok(None);
    };
    if file.is_binary {
        return Ok(None);
    }
    extract_method_context(file.content.as_deref().unwrap_or_default(), name)
}
