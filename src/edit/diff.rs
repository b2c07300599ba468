//! Unified diff generation and application.

use crate::error::{AtlasError, Result};

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Unified diff from `original` to `modified` with `a/` and `b/` headers.
///
/// Returns an empty string when both texts are equal.
#[must_use]
pub fn generate_diff(original: &str, modified: &str, path: &str) -> String {
    if original == modified {
        return String::new();
    }
    let diff = similar::TextDiff::from_lines(original, modified);
    diff.unified_diff()
        .context_radius(3)
        .missing_newline_hint(true)
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string()
}

/// One `@@` block of a unified diff.
#[derive(Debug)]
struct Hunk {
    old_start: usize,
    old_len: usize,
    /// `(' ' | '-' | '+', text including its line terminator)`.
    lines: Vec<(char, String)>,
}

/// Apply a unified diff (as produced by [`generate_diff`]) to `original`.
///
/// Context and removed lines must match `original` exactly, otherwise the
/// patch is rejected with [`AtlasError::InvalidPatch`].
pub fn apply_unified_diff(original: &str, diff: &str) -> Result<String> {
    let hunks = parse_hunks(diff)?;
    let old: Vec<&str> = original.split_inclusive('\n').collect();

    let mut out = String::with_capacity(original.len());
    let mut cursor = 0usize;

    for hunk in hunks {
        let start = if hunk.old_len == 0 {
            hunk.old_start
        } else {
            hunk.old_start.saturating_sub(1)
        };
        if start < cursor || start > old.len() {
            return Err(invalid(format!(
                "hunk at line {} is out of order or past the end",
                hunk.old_start
            )));
        }
        for line in &old[cursor..start] {
            out.push_str(line);
        }
        cursor = start;

        for (tag, text) in hunk.lines {
            match tag {
                '+' => out.push_str(&text),
                _ => {
                    let Some(actual) = old.get(cursor) else {
                        return Err(invalid(format!("hunk runs past line {}", old.len())));
                    };
                    if *actual != text {
                        return Err(invalid(format!(
                            "line {} does not match: expected {:?}, found {:?}",
                            cursor + 1,
                            text,
                            actual
                        )));
                    }
                    if tag == ' ' {
                        out.push_str(actual);
                    }
                    cursor += 1;
                }
            }
        }
    }

    for line in &old[cursor..] {
        out.push_str(line);
    }
    Ok(out)
}

fn parse_hunks(diff: &str) -> Result<Vec<Hunk>> {
    let mut hunks: Vec<Hunk> = Vec::new();

    for raw in diff.split_inclusive('\n') {
        if raw.starts_with("@@") {
            let (old_start, old_len) = parse_hunk_header(raw)?;
            hunks.push(Hunk {
                old_start,
                old_len,
                lines: Vec::new(),
            });
            continue;
        }
        // File headers and anything else before the first hunk.
        let Some(hunk) = hunks.last_mut() else {
            continue;
        };
        match raw.chars().next() {
            Some(tag @ (' ' | '-' | '+')) => hunk.lines.push((tag, raw[1..].to_string())),
            Some('\\') if raw.trim_end() == NO_NEWLINE_MARKER => {
                if let Some((_, text)) = hunk.lines.last_mut() {
                    if text.ends_with('\n') {
                        text.pop();
                    }
                }
            }
            // Some tools emit blank context lines without the leading space.
            Some('\n') => hunk.lines.push((' ', "\n".to_string())),
            _ => return Err(invalid(format!("unexpected diff line {:?}", raw.trim_end()))),
        }
    }
    Ok(hunks)
}

/// `@@ -a,b +c,d @@` → `(a, b)`; a missing count means one line.
fn parse_hunk_header(line: &str) -> Result<(usize, usize)> {
    let range = line
        .strip_prefix("@@ -")
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| invalid(format!("malformed hunk header {:?}", line.trim_end())))?;

    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| invalid(format!("malformed hunk header {:?}", line.trim_end())))
    };
    match range.split_once(',') {
        Some((start, len)) => Ok((number(start)?, number(len)?)),
        None => Ok((number(range)?, 1)),
    }
}

fn invalid(detail: String) -> AtlasError {
    AtlasError::InvalidPatch { detail }
}
