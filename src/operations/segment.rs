//! Line-range slicing shared between CLI and MCP.

use crate::db::Database;
use crate::error::Result;
use crate::operations::files::get_file_by_path;

/// Lines `start..=end` (1-based) of the file at `path`, joined with `\n`.
///
/// `end` is clamped to the last line. A missing or binary file, a `start`
/// outside the file, or an `end` before `start` yields an empty string.
pub fn get_code_segment(db: &Database, path: &str, start: i64, end: i64) -> Result<String> {
    let Some(file) = get_file_by_path(db, path, true)? else {
        return Ok(String::new());
    };
    if file.is_binary {
        return Ok(String::new());
    }
    let content = file.content.unwrap_or_default();
    Ok(slice_lines(&content, start, end))
}

/// Inclusive 1-based line slice of `content`.
#[must_use]
pub fn slice_lines(content: &str, start: i64, end: i64) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let Ok(start) = usize::try_from(start) else {
        return String::new();
    };
    if start < 1 || start > lines.len() {
        return String::new();
    }
    let end = usize::try_from(end).unwrap_or(0).min(lines.len());
    if end < start {
        return String::new();
    }
    lines[start - 1..end].join("\n")
}
