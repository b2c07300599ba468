//! Locate a `def`/`class` block by name and pull the code around it.

use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// Lines of surrounding code returned on each side of the block.
pub const CONTEXT_LINES: usize = 10;

/// A definition block plus the code around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodContext {
    pub name: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
    pub context_before: String,
    pub context_after: String,
}

/// Find the first `def NAME(` or `class NAME(` in `content`.
///
/// The block ends at the last non-blank line before the next line indented
/// no deeper than the definition itself. `None` when no definition matches.
pub fn extract_method_context(content: &str, name: &str) -> Result<Option<MethodContext>> {
    let pattern = Regex::new(&format!(r"(?:def|class)\s+{}\s*\(", regex::escape(name)))?;
    let lines: Vec<&str> = content.lines().collect();

    let Some(start) = lines.iter().position(|l| pattern.is_match(l)) else {
        return Ok(None);
    };
    let indent = indent_width(lines[start]);

    let header_end = header_end(&lines, start);

    let mut end = header_end;
    for (i, line) in lines.iter().enumerate().skip(header_end + 1) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_width(line) <= indent {
            break;
        }
        end = i;
    }

    let before_start = start.saturating_sub(CONTEXT_LINES);
    let after_end = (end + 1 + CONTEXT_LINES).min(lines.len());

    Ok(Some(MethodContext {
        name: name.to_string(),
        start_line: start + 1,
        end_line: end + 1,
        content: lines[start..=end].join("\n"),
        context_before: lines[before_start..start].join("\n"),
        context_after: lines[end + 1..after_end].join("\n"),
    }))
}

/// Last line of the signature opened on `start`: the line where its brackets
/// balance again. A signature still open at the next definition is taken to
/// be the `start` line alone.
fn header_end(lines: &[&str], start: usize) -> usize {
    let mut depth = 0i32;
    for (i, line) in lines.iter().enumerate().skip(start) {
        if i > start && is_definition(line) {
            break;
        }
        for c in line.chars() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                _ => {}
            }
        }
        if depth <= 0 {
            return i;
        }
    }
    start
}

fn is_definition(line: &str) -> bool {
    let line = line.trim_start();
    ["def ", "async def ", "class "]
        .iter()
        .any(|kw| line.starts_with(kw))
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
