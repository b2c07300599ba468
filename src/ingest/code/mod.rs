pub mod failure_log;
pub mod python;

use serde::{Deserialize, Serialize};

use crate::models::entity::FileEntities;

/// Why one file yielded no structural records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Relative file path.
    pub path: String,
    /// Human-readable reason.
    pub detail: String,
    /// 1-based lines holding syntax errors, when known.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_lines: Vec<u32>,
}

/// Result of extracting one file: either its entities or a structured failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Parsed(FileEntities),
    Failed(ParseFailure),
}

/// Turns one file's source text into structural records.
///
/// Implementations must never panic on malformed input; anything that
/// cannot be parsed comes back as [`FileOutcome::Failed`].
pub trait StructureExtractor: Send + Sync {
    /// Language identifier (e.g. "python").
    fn language(&self) -> &str;

    /// Extract classes, functions and variables from `source`.
    fn extract(&self, path: &str, source: &str) -> FileOutcome;
}

/// Helper to find error nodes in a tree-sitter tree.
/// Returns 1-based line numbers of all ERROR or MISSING nodes.
#[must_use]
pub fn find_error_lines(root: tree_sitter::Node) -> Vec<u32> {
    let mut errors = Vec::new();
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let line = node.start_position().row as u32 + 1;
            if !errors.contains(&line) {
                errors.push(line);
            }
        }
        // Only descend where an error can still be found.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                errors.sort_unstable();
                return errors;
            }
        }
    }
}
