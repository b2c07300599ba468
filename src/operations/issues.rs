//! Heuristic issue-pattern matching shared between CLI and MCP.
//!
//! Scans free-form issue text (bug reports, tracebacks) for file/line
//! locations, error messages and identifier mentions, then finds where
//! those mentions occur in one file's content.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;

/// Exception names whose messages are pulled out of issue text.
pub const ERROR_TYPES: &[&str] = &[
    "TypeError",
    "ValueError",
    "AttributeError",
    "ImportError",
    "KeyError",
    "IndexError",
    "SyntaxError",
    "NameError",
];

/// Identifiers this short are ignored.
const MIN_IDENT_LEN: usize = 3;

/// A `File "...", line N` location from a traceback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracebackLocation {
    /// Last path component.
    pub file: String,
    pub line: usize,
    /// The traceback block the location came from.
    pub context: String,
}

/// `XxxError: message` mentioned in the issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMention {
    pub error_type: String,
    pub message: String,
}

/// One location in the file related to the issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueMatch {
    FunctionDefinition {
        name: String,
        line: usize,
        content: String,
    },
    FunctionCall {
        name: String,
        line: usize,
        content: String,
    },
    VariableAssignment {
        name: String,
        line: usize,
        content: String,
    },
    VariableUsage {
        name: String,
        line: usize,
        content: String,
    },
    TracebackLine {
        line: usize,
        content: String,
        context: String,
    },
}

/// Everything found for one file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueReport {
    pub tracebacks: Vec<TracebackLocation>,
    pub errors: Vec<ErrorMention>,
    pub matches: Vec<IssueMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MentionKind {
    Function,
    Variable,
}

/// Match the mentions in `issue_text` against `content`.
pub fn identify_issue_patterns(content: &str, issue_text: &str) -> Result<IssueReport> {
    let lines: Vec<&str> = content.lines().collect();
    let mut report = IssueReport {
        tracebacks: traceback_locations(issue_text)?,
        errors: error_mentions(issue_text)?,
        matches: Vec::new(),
    };

    for (name, kind) in mentioned_identifiers(issue_text)? {
        let escaped = regex::escape(&name);
        match kind {
            MentionKind::Function => {
                let def = Regex::new(&format!(r"def\s+{escaped}\s*\("))?;
                let call = Regex::new(&format!(r"\b{escaped}\s*\("))?;
                for (i, line) in lines.iter().enumerate() {
                    let (line_no, content) = (i + 1, (*line).to_string());
                    if def.is_match(line) {
                        report.matches.push(IssueMatch::FunctionDefinition {
                            name: name.clone(),
                            line: line_no,
                            content,
                        });
                    } else if call.is_match(line) {
                        report.matches.push(IssueMatch::FunctionCall {
                            name: name.clone(),
                            line: line_no,
                            content,
                        });
                    }
                }
            }
            MentionKind::Variable => {
                let assign = Regex::new(&format!(r"\b{escaped}\s*=(?:[^=]|$)"))?;
                let usage = Regex::new(&format!(r"\b{escaped}\b"))?;
                for (i, line) in lines.iter().enumerate() {
                    let (line_no, content) = (i + 1, (*line).to_string());
                    if assign.is_match(line) {
                        report.matches.push(IssueMatch::VariableAssignment {
                            name: name.clone(),
                            line: line_no,
                            content,
                        });
                    } else if usage.is_match(line) {
                        report.matches.push(IssueMatch::VariableUsage {
                            name: name.clone(),
                            line: line_no,
                            content,
                        });
                    }
                }
            }
        }
    }

    for location in &report.tracebacks {
        if let Some(text) = location.line.checked_sub(1).and_then(|i| lines.get(i)) {
            report.matches.push(IssueMatch::TracebackLine {
                line: location.line,
                content: (*text).to_string(),
                context: location.context.clone(),
            });
        }
    }

    Ok(report)
}

fn traceback_locations(issue_text: &str) -> Result<Vec<TracebackLocation>> {
    let block = Regex::new(
        r#"Traceback[^\n]*\n((?:[ \t]*File "[^"]*", line \d+[^\n]*\n(?:[ \t]{2,}[^\n]*\n)?)+)"#,
    )?;
    let location = Regex::new(r#"File "([^"]*)", line (\d+)"#)?;

    let mut out = Vec::new();
    for caps in block.captures_iter(issue_text) {
        let context = caps.get(1).map_or("", |m| m.as_str());
        for loc in location.captures_iter(context) {
            let Ok(line) = loc[2].parse::<usize>() else {
                continue;
            };
            let file = loc[1].rsplit(['/', '\\']).next().unwrap_or_default();
            out.push(TracebackLocation {
                file: file.to_string(),
                line,
                context: context.to_string(),
            });
        }
    }
    Ok(out)
}

fn error_mentions(issue_text: &str) -> Result<Vec<ErrorMention>> {
    let mut out = Vec::new();
    for error_type in ERROR_TYPES {
        if !issue_text.contains(error_type) {
            continue;
        }
        let pattern = Regex::new(&format!(r"{error_type}:[ \t]*([^\n]+)"))?;
        for caps in pattern.captures_iter(issue_text) {
            out.push(ErrorMention {
                error_type: (*error_type).to_string(),
                message: caps[1].trim_end().to_string(),
            });
        }
    }
    Ok(out)
}

/// Identifiers in first-seen order; a name followed by `(` counts as a function.
fn mentioned_identifiers(issue_text: &str) -> Result<Vec<(String, MentionKind)>> {
    let func = Regex::new(r"\b([a-zA-Z_][a-zA-Z0-9_]*)\s*\(")?;
    let ident = Regex::new(r"\b([a-zA-Z_][a-zA-Z0-9_]*)\b")?;

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (re, kind) in [(&func, MentionKind::Function), (&ident, MentionKind::Variable)] {
        for caps in re.captures_iter(issue_text) {
            let name = &caps[1];
            if name.len() >= MIN_IDENT_LEN && seen.insert(name.to_string()) {
                out.push((name.to_string(), kind));
            }
        }
    }
    Ok(out)
}
