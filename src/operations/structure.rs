//! Whole-file structure dump shared between CLI and MCP.

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::models::entity::{ClassRecord, FunctionRecord, VariableRecord};
use crate::operations::files::get_file_by_path;

/// Every structural record of one file, in source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileStructure {
    pub path: String,
    pub classes: Vec<ClassRecord>,
    pub functions: Vec<FunctionRecord>,
    pub variables: Vec<VariableRecord>,
}

impl FileStructure {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.variables.is_empty()
    }
}

/// Classes, functions and variables of the file at `path`.
///
/// An unknown path yields an empty structure.
pub fn get_file_structure(db: &Database, path: &str) -> Result<FileStructure> {
    let Some(file) = get_file_by_path(db, path, false)? else {
        return Ok(FileStructure {
            path: path.to_string(),
            ..Default::default()
        });
    };

    Ok(FileStructure {
        classes: db.classes_for_file(file.id)?,
        functions: db.functions_for_file(file.id)?,
        variables: db.variables_for_file(file.id)?,
        path: file.path,
    })
}
