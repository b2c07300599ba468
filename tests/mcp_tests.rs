//! MCP server tests.
//!
//! Tests the MCP server's public interface.
//! For tool functionality tests, see e2e_tests.rs which tests through the CLI.

use std::fs;
use std::path::PathBuf;

use rmcp::ServerHandler;
use tempfile::TempDir;

use atlas::config::Config;
use atlas::indexer;
use atlas::mcp::server::AtlasServer;

// ═══════════════════════════════════════════════════════════════════════════════
// Test Setup Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Create a temp directory with a Python file and index it.
fn setup_indexed_project() -> (TempDir, AtlasServer) {
    let tmp = TempDir::new().expect("create tempdir");

    fs::write(
        tmp.path().join("app.py"),
        r#"class Config:
    name = "app"

    def load(self, path):
        return open(path).read()


def helper(x):
    return x * 2
"#,
    )
    .expect("write test file");

    let config = Config::new(tmp.path());
    indexer::run_index(&config).expect("index project");

    let server = AtlasServer::new(tmp.path().to_path_buf());
    (tmp, server)
}

fn tool_names(server: &AtlasServer) -> Vec<String> {
    server
        .get_tool_router()
        .list_all()
        .iter()
        .map(|t| t.name.to_string())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. ServerHandler Implementation Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_server_info() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    let info = server.get_info();

    let instructions = info.instructions.expect("instructions");
    assert!(instructions.contains("atlas"));
    assert!(instructions.contains("get_entity_at_line"));
}

#[test]
fn test_server_info_mentions_explicit_indexing() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    let instructions = server.get_info().instructions.unwrap();

    assert!(
        instructions.contains("index not found"),
        "Instructions should explain that the index is built explicitly"
    );
    assert!(instructions.contains("parse_failures"));
}

#[test]
fn test_server_capabilities() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    assert!(server.get_info().capabilities.tools.is_some());
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. Tool List Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_tool_list_query_tools() {
    let names = tool_names(&AtlasServer::new(PathBuf::from("/tmp/test")));

    for expected in [
        "get_folders",
        "get_files_in_folder",
        "get_files_by_extension",
        "get_file_by_path",
        "get_file_content",
        "get_entity_at_line",
        "get_function_by_name",
        "get_class_by_name",
        "get_class_methods",
        "get_file_structure",
        "get_code_segment",
    ] {
        assert!(
            names.iter().any(|n| n == expected),
            "Should have {expected} tool"
        );
    }
}

#[test]
fn test_tool_list_index_and_utility_tools() {
    let names = tool_names(&AtlasServer::new(PathBuf::from("/tmp/test")));

    for expected in [
        "index",
        "stats",
        "parse_failures",
        "extract_method_context",
        "identify_issue_patterns",
        "generate_diff",
        "apply_diff",
        "apply_patch",
    ] {
        assert!(
            names.iter().any(|n| n == expected),
            "Should have {expected} tool"
        );
    }
}

#[test]
fn test_tool_count() {
    let names = tool_names(&AtlasServer::new(PathBuf::from("/tmp/test")));
    assert_eq!(names.len(), 19, "unexpected tool list: {names:?}");
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. Tool Description and Schema Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_tool_descriptions_informative() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    for tool in &server.get_tool_router().list_all() {
        let desc = tool
            .description
            .as_ref()
            .unwrap_or_else(|| panic!("Tool '{}' should have a description", tool.name));
        assert!(
            desc.len() >= 20,
            "Tool '{}' description too short: '{}'",
            tool.name,
            desc
        );
    }
}

#[test]
fn test_all_tools_have_valid_names() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    for tool in &server.get_tool_router().list_all() {
        assert!(
            tool.name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'),
            "Tool name '{}' should be snake_case",
            tool.name
        );
    }
}

#[test]
fn test_entity_at_line_schema_has_path_and_line() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    let tools = server.get_tool_router().list_all();
    let tool = tools
        .iter()
        .find(|t| t.name == "get_entity_at_line")
        .unwrap();

    let schema = serde_json::to_string(&tool.input_schema).unwrap();
    assert!(schema.contains("path"));
    assert!(schema.contains("line"));
}

#[test]
fn test_patch_schema_has_operations() {
    let server = AtlasServer::new(PathBuf::from("/tmp/test"));
    let tools = server.get_tool_router().list_all();
    let tool = tools.iter().find(|t| t.name == "apply_patch").unwrap();

    let schema = serde_json::to_string(&tool.input_schema).unwrap();
    assert!(schema.contains("operations"));
    assert!(schema.contains("original"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. Server With Indexed Project Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_tool_list_unchanged_with_index() {
    let (_tmp, server) = setup_indexed_project();
    assert_eq!(tool_names(&server).len(), 19);
}

#[test]
fn test_server_does_not_create_index() {
    let tmp = TempDir::new().expect("create tempdir");
    let server = AtlasServer::new(tmp.path().to_path_buf());
    let _ = server.get_info();
    let _ = tool_names(&server);

    assert!(!Config::new(tmp.path()).index_exists());
}
