//! Stats operations shared between CLI and MCP.

use serde::Serialize;

use crate::db::Database;
use crate::error::Result;

/// Per-extension file count.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionCount {
    /// Empty for files without an extension.
    pub extension: String,
    pub files: u64,
}

/// Result of getting index statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    pub files: u64,
    pub binary_files: u64,
    pub functions: u64,
    pub methods: u64,
    pub classes: u64,
    pub variables: u64,
    /// Most common extension first.
    pub extensions: Vec<ExtensionCount>,
}

/// Get index statistics.
pub fn get_stats(db: &Database) -> Result<StatsResult> {
    let stats = db.stats()?;

    Ok(StatsResult {
        files: stats.file_count,
        binary_files: stats.binary_count,
        functions: stats.function_count,
        methods: stats.method_count,
        classes: stats.class_count,
        variables: stats.variable_count,
        extensions: stats
            .extensions
            .into_iter()
            .map(|(extension, files)| ExtensionCount { extension, files })
            .collect(),
    })
}
