//! MCP tool parameter types.
//!
//! Each struct corresponds to the input parameters for one MCP tool.
//! All parameter structs derive `Deserialize` and `JsonSchema` as required by rmcp.

use rmcp::schemars;
use serde::Deserialize;

use crate::edit::PatchOp;

// ── Index ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IndexParams {
    /// Path to the project root to index. Defaults to the server's root.
    #[schemars(description = "Path to the project root to index (default: server project root)")]
    pub path: Option<String>,
}

// ── Listing ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FolderParams {
    #[schemars(description = "Folder path relative to the project root (\"\" for the root)")]
    pub folder: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExtensionParams {
    #[schemars(description = "File extension without the dot, e.g. \"py\"")]
    pub extension: String,
}

// ── Files ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FileParams {
    #[schemars(description = "Relative path to the file, including folder and file name")]
    pub path: String,
    #[schemars(description = "Include the stored content (default: false)")]
    pub include_content: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathParams {
    #[schemars(description = "Relative path to the file, including folder and file name")]
    pub path: String,
}

// ── Structure ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EntityAtLineParams {
    #[schemars(description = "Relative path to the file")]
    pub path: String,
    #[schemars(description = "Line number (1-based)")]
    pub line: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FunctionParams {
    #[schemars(description = "Exact function or method name")]
    pub name: String,
    #[schemars(description = "Only methods of this class")]
    pub class_name: Option<String>,
    #[schemars(description = "Only in this file (relative path)")]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassParams {
    #[schemars(description = "Exact class name")]
    pub name: String,
    #[schemars(description = "Only in this file (relative path)")]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MethodsParams {
    #[schemars(description = "Class whose methods to list")]
    pub class_name: String,
    #[schemars(description = "Only in this file (relative path)")]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SegmentParams {
    #[schemars(description = "Relative path to the file")]
    pub path: String,
    #[schemars(description = "First line (1-based)")]
    pub start_line: i64,
    #[schemars(description = "Last line (1-based, inclusive, clamped to the file)")]
    pub end_line: i64,
}

// ── Failures ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FailuresParams {
    #[schemars(description = "Only paths starting with this prefix")]
    pub prefix: Option<String>,
}

// ── Text utilities ──────────────────────────────────────────────

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DiffParams {
    #[schemars(description = "Original file content")]
    pub original: String,
    #[schemars(description = "Modified file content")]
    pub modified: String,
    #[schemars(description = "Path label used in the a/ and b/ headers")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApplyDiffParams {
    #[schemars(description = "Original file content")]
    pub original: String,
    #[schemars(description = "Unified diff to apply")]
    pub diff: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PatchParams {
    #[schemars(description = "Original file content")]
    pub original: String,
    #[schemars(
        description = "Operations: {operation: replace|insert|delete, start_line, end_line?, content?}, 1-based inclusive"
    )]
    #[schemars(with = "Vec<serde_json::Value>")]
    pub operations: Vec<PatchOp>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IssueParams {
    #[schemars(description = "Relative path of the indexed file to scan")]
    pub path: String,
    #[schemars(description = "Issue description, traceback or bug report text")]
    pub issue: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ContextParams {
    #[schemars(description = "Relative path of the indexed file")]
    pub path: String,
    #[schemars(description = "Function or class name")]
    pub name: String,
}
