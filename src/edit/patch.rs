//! Line-indexed patch operations.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

/// One edit against a file's line array. Lines are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum PatchOp {
    /// Replace lines `start_line..=end_line` with `content`.
    Replace {
        start_line: usize,
        end_line: usize,
        content: String,
    },
    /// Insert `content` before `start_line`.
    Insert { start_line: usize, content: String },
    /// Remove lines `start_line..=end_line`.
    Delete { start_line: usize, end_line: usize },
}

impl PatchOp {
    #[must_use]
    pub fn start_line(&self) -> usize {
        match self {
            Self::Replace { start_line, .. }
            | Self::Insert { start_line, .. }
            | Self::Delete { start_line, .. } => *start_line,
        }
    }
}

/// Apply `ops` to `original` and join the result with `\n`.
///
/// Operations run from the highest `start_line` down, so an edit never
/// shifts the lines another pending edit refers to. Ties keep their input
/// order. Bounds past either end of the file are clamped.
#[must_use]
pub fn apply_patch_ops(original: &str, ops: &[PatchOp]) -> String {
    let mut lines: Vec<String> = original.lines().map(String::from).collect();

    let mut ordered: Vec<&PatchOp> = ops.iter().collect();
    ordered.sort_by_key(|op| Reverse(op.start_line()));

    for op in ordered {
        apply_op(&mut lines, op);
    }
    lines.join("\n")
}

/// Apply a single operation to a line array.
pub fn apply_op(lines: &mut Vec<String>, op: &PatchOp) {
    let start = op.start_line().saturating_sub(1).min(lines.len());
    let end_of = |end_line: usize| end_line.min(lines.len()).max(start);

    match op {
        PatchOp::Replace {
            end_line, content, ..
        } => {
            let end = end_of(*end_line);
            lines.splice(start..end, content.lines().map(String::from));
        }
        PatchOp::Insert { content, .. } => {
            lines.splice(start..start, content.lines().map(String::from));
        }
        PatchOp::Delete { end_line, .. } => {
            let end = end_of(*end_line);
            lines.drain(start..end);
        }
    }
}
