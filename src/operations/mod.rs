//! Shared operations used by both CLI and MCP server.
//!
//! Every query over the index lives here once, so `main.rs` (CLI) and
//! `mcp/server.rs` return identical results for identical inputs.

pub mod context;
pub mod entity;
pub mod failures;
pub mod files;
pub mod index;
pub mod issues;
pub mod lookup;
pub mod segment;
pub mod stats;
pub mod structure;

#[cfg(test)]
pub(crate) mod fixtures;

pub use context::get_method_context;
pub use entity::entity_at_line;
pub use failures::{list_failures, FailuresResult};
pub use files::{
    get_file_by_path, get_file_content, list_files_by_extension, list_files_in_folder,
    list_folders, FilesResult,
};
pub use index::IndexOutput;
pub use issues::{identify_issue_patterns, IssueMatch, IssueReport};
pub use lookup::{find_class, find_function, list_class_methods, LookupResult};
pub use segment::get_code_segment;
pub use stats::{get_stats, StatsResult};
pub use structure::{get_file_structure, FileStructure};
