//! MCP server implementation using rmcp.
//!
//! Exposes every query operation as an MCP tool over stdio transport.
//! Each tool calls the same core logic as the CLI commands.

use std::path::PathBuf;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler, ServiceExt};
use serde::Serialize;

use crate::config::Config;
use crate::db::Database;
use crate::edit;
use crate::error::AtlasError;
use crate::indexer;
use crate::operations;

use super::tools::{
    ApplyDiffParams, ClassParams, ContextParams, DiffParams, EntityAtLineParams, ExtensionParams,
    FailuresParams, FileParams, FolderParams, FunctionParams, IndexParams, IssueParams,
    MethodsParams, PatchParams, PathParams, SegmentParams,
};

/// The Atlas MCP Server.
///
/// Holds the project configuration. The database is opened on demand for
/// each tool call so no connection outlives a request.
#[derive(Clone)]
pub struct AtlasServer {
    config: Config,
    tool_router: ToolRouter<Self>,
}

// ── Helper functions ────────────────────────────────────────────

impl AtlasServer {
    /// Open the index. Unlike the CLI, the server never builds it implicitly.
    fn open_db(&self) -> Result<Database, String> {
        indexer::open_index(&self.config).map_err(|e| Self::error(&e))
    }

    fn to_json<T: Serialize>(val: &T) -> String {
        serde_json::to_string(val).unwrap_or_else(|e| Self::error(&e))
    }

    fn error(e: &dyn std::fmt::Display) -> String {
        serde_json::json!({ "error": e.to_string() }).to_string()
    }

    /// Open the index, run `f`, and serialize its result or error.
    fn with_db<T: Serialize>(
        &self,
        f: impl FnOnce(&Database) -> crate::error::Result<T>,
    ) -> String {
        let db = match self.open_db() {
            Ok(db) => db,
            Err(e) => return e,
        };
        match f(&db) {
            Ok(result) => Self::to_json(&result),
            Err(e) => Self::error(&e),
        }
    }

    pub fn get_tool_router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }
}

// ── Tool implementations ────────────────────────────────────────

#[tool_router]
impl AtlasServer {
    #[must_use]
    pub fn new(project_root: PathBuf) -> Self {
        Self::with_config(Config::new(project_root))
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    // ─── Indexing ───────────────────────────────────────────────

    #[tool(
        description = "Rebuild the structural index (.atlas/index.db) from scratch. Returns file, entity and parse failure counts."
    )]
    async fn index(&self, Parameters(params): Parameters<IndexParams>) -> String {
        let config = match &params.path {
            Some(path) => Config::new(path),
            None => self.config.clone(),
        };
        match indexer::run_index(&config) {
            Ok(report) => {
                let output: operations::IndexOutput = report.into();
                Self::to_json(&output)
            }
            Err(e) => Self::error(&e),
        }
    }

    #[tool(description = "Index statistics: file, binary, function, method, class and variable counts plus files per extension.")]
    async fn stats(&self) -> String {
        self.with_db(operations::get_stats)
    }

    #[tool(description = "Files that failed to parse in the last index run, with the syntax error lines.")]
    async fn parse_failures(&self, Parameters(params): Parameters<FailuresParams>) -> String {
        match operations::list_failures(&self.config, params.prefix.as_deref()) {
            Ok(result) => Self::to_json(&result),
            Err(e) => Self::error(&e),
        }
    }

    // ─── Listing ────────────────────────────────────────────────

    #[tool(description = "List every folder that holds indexed files, alphabetically. The root folder is \"\".")]
    async fn get_folders(&self) -> String {
        self.with_db(operations::list_folders)
    }

    #[tool(description = "List the files directly inside a folder, sorted by name.")]
    async fn get_files_in_folder(&self, Parameters(params): Parameters<FolderParams>) -> String {
        self.with_db(|db| operations::list_files_in_folder(db, &params.folder))
    }

    #[tool(description = "List every file with the given extension.")]
    async fn get_files_by_extension(
        &self,
        Parameters(params): Parameters<ExtensionParams>,
    ) -> String {
        self.with_db(|db| operations::list_files_by_extension(db, &params.extension))
    }

    // ─── Files ──────────────────────────────────────────────────

    #[tool(description = "Resolve a file by relative path. Returns null when no such file is indexed.")]
    async fn get_file_by_path(&self, Parameters(params): Parameters<FileParams>) -> String {
        let with_content = params.include_content.unwrap_or(false);
        self.with_db(|db| operations::get_file_by_path(db, &params.path, with_content))
    }

    #[tool(description = "Raw stored content of a file. Returns null when no such file is indexed.")]
    async fn get_file_content(&self, Parameters(params): Parameters<PathParams>) -> String {
        self.with_db(|db| operations::get_file_content(db, &params.path))
    }

    // ─── Structure ──────────────────────────────────────────────

    #[tool(
        description = "The most specific entity at a line: innermost function containing it, else innermost class, else a variable declared on that exact line. Returns null when nothing matches."
    )]
    async fn get_entity_at_line(
        &self,
        Parameters(params): Parameters<EntityAtLineParams>,
    ) -> String {
        self.with_db(|db| operations::entity_at_line(db, &params.path, params.line))
    }

    #[tool(description = "Find functions and methods by exact name, optionally restricted to a class and/or file.")]
    async fn get_function_by_name(&self, Parameters(params): Parameters<FunctionParams>) -> String {
        self.with_db(|db| {
            operations::find_function(
                db,
                &params.name,
                params.class_name.as_deref(),
                params.path.as_deref(),
            )
        })
    }

    #[tool(description = "Find classes by exact name, optionally restricted to a file.")]
    async fn get_class_by_name(&self, Parameters(params): Parameters<ClassParams>) -> String {
        self.with_db(|db| operations::find_class(db, &params.name, params.path.as_deref()))
    }

    #[tool(description = "List the methods defined directly in a class.")]
    async fn get_class_methods(&self, Parameters(params): Parameters<MethodsParams>) -> String {
        self.with_db(|db| {
            operations::list_class_methods(db, &params.class_name, params.path.as_deref())
        })
    }

    #[tool(description = "All classes, functions and variables of a file, each in source order.")]
    async fn get_file_structure(&self, Parameters(params): Parameters<PathParams>) -> String {
        self.with_db(|db| operations::get_file_structure(db, &params.path))
    }

    #[tool(
        description = "Lines start_line..=end_line (1-based) of a file. Out-of-range bounds yield an empty string."
    )]
    async fn get_code_segment(&self, Parameters(params): Parameters<SegmentParams>) -> String {
        self.with_db(|db| {
            operations::get_code_segment(db, &params.path, params.start_line, params.end_line)
        })
    }

    #[tool(description = "A def/class block of an indexed file with up to 10 lines of context on each side.")]
    async fn extract_method_context(&self, Parameters(params): Parameters<ContextParams>) -> String {
        self.with_db(|db| operations::get_method_context(db, &params.path, &params.name))
    }

    #[tool(
        description = "Find traceback locations, error messages and mentioned identifiers from an issue description in an indexed file."
    )]
    async fn identify_issue_patterns(&self, Parameters(params): Parameters<IssueParams>) -> String {
        self.with_db(|db| {
            let content = operations::get_file_content(db, &params.path)?.ok_or_else(|| {
                AtlasError::FileNotFound {
                    path: params.path.clone(),
                }
            })?;
            operations::identify_issue_patterns(&content, &params.issue)
        })
    }

    // ─── Text utilities ─────────────────────────────────────────

    #[tool(description = "Unified diff (a/ and b/ headers, 3 context lines) between two versions of a file.")]
    async fn generate_diff(&self, Parameters(params): Parameters<DiffParams>) -> String {
        edit::generate_diff(&params.original, &params.modified, &params.path)
    }

    #[tool(description = "Apply a unified diff to the original content and return the result.")]
    async fn apply_diff(&self, Parameters(params): Parameters<ApplyDiffParams>) -> String {
        match edit::apply_unified_diff(&params.original, &params.diff) {
            Ok(content) => content,
            Err(e) => Self::error(&e),
        }
    }

    #[tool(
        description = "Apply replace/insert/delete line operations to content, bottom-up by start line so earlier edits never shift later ones."
    )]
    async fn apply_patch(&self, Parameters(params): Parameters<PatchParams>) -> String {
        edit::apply_patch_ops(&params.original, &params.operations)
    }
}

// ── ServerHandler implementation ────────────────────────────────

#[tool_handler]
impl ServerHandler for AtlasServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "atlas: structural index of a repository (files, functions, classes, variables). \
                 Start with get_folders and get_files_in_folder, then get_file_structure for a file. \
                 Use get_entity_at_line to map a line (e.g. from a traceback) to its innermost \
                 function or class, and get_code_segment to read just those lines. \
                 The index is not built implicitly: call index first if tools report \
                 'index not found'. Files in parse_failures have no structural records."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ── Server startup ──────────────────────────────────────────────

/// Start the MCP server on stdio transport.
pub async fn start_mcp_server(config: Config) -> crate::error::Result<()> {
    tracing::info!(root = %config.project_root.display(), "starting atlas MCP server");

    let server = AtlasServer::with_config(config);

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| AtlasError::Other(format!("MCP server error: {e}")))?;

    tracing::info!("MCP server running on stdio");

    service
        .waiting()
        .await
        .map_err(|e| AtlasError::Other(format!("MCP server error: {e}")))?;

    Ok(())
}
