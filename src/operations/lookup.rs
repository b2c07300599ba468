//! Name-based lookups shared between CLI and MCP.

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::models::entity::{ClassRecord, FunctionRecord, Located};
use crate::operations::files::get_file_by_path;

/// Matches of a name lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResult<T> {
    pub query: String,
    pub results: Vec<Located<T>>,
}

/// Narrow an optional path filter to a file id.
///
/// The outer `None` means the path names no indexed file, so the lookup
/// cannot match anything.
fn resolve_filter(db: &Database, path: Option<&str>) -> Result<Option<Option<i64>>> {
    match path {
        None => Ok(Some(None)),
        Some(p) => Ok(get_file_by_path(db, p, false)?.map(|f| Some(f.id))),
    }
}

/// Functions and methods named exactly `name`.
pub fn find_function(
    db: &Database,
    name: &str,
    class_name: Option<&str>,
    path: Option<&str>,
) -> Result<LookupResult<FunctionRecord>> {
    let results = match resolve_filter(db, path)? {
        Some(file_id) => db.find_functions(name, class_name, file_id)?,
        None => Vec::new(),
    };
    Ok(LookupResult {
        query: name.to_string(),
        results,
    })
}

/// Classes named exactly `name`.
pub fn find_class(
    db: &Database,
    name: &str,
    path: Option<&str>,
) -> Result<LookupResult<ClassRecord>> {
    let results = match resolve_filter(db, path)? {
        Some(file_id) => db.find_classes(name, file_id)?,
        None => Vec::new(),
    };
    Ok(LookupResult {
        query: name.to_string(),
        results,
    })
}

/// Methods defined directly in classes named `class_name`.
pub fn list_class_methods(
    db: &Database,
    class_name: &str,
    path: Option<&str>,
) -> Result<LookupResult<FunctionRecord>> {
    let results = match resolve_filter(db, path)? {
        Some(file_id) => db.class_methods(class_name, file_id)?,
        None => Vec::new(),
    };
    Ok(LookupResult {
        query: class_name.to_string(),
        results,
    })
}
