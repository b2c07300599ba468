//! Index output operations shared between CLI and MCP.
//!
//! Provides consistent serialization for index results with all fields.

use serde::Serialize;

use crate::indexer::IndexReport;

/// Serializable index output.
///
/// Ensures CLI and MCP output the same fields.
#[derive(Debug, Clone, Serialize)]
pub struct IndexOutput {
    pub files_processed: usize,
    pub binary_files: usize,
    pub source_files: usize,
    pub functions: usize,
    pub classes: usize,
    pub variables: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub files_skipped: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub parse_failures: usize,
    /// Paths of files that failed to parse.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_files: Vec<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde's skip_serializing_if
fn is_zero(v: &usize) -> bool {
    *v == 0
}

impl From<IndexReport> for IndexOutput {
    fn from(report: IndexReport) -> Self {
        Self {
            files_processed: report.ingest.files_processed,
            binary_files: report.ingest.binary_files,
            source_files: report.extraction.files_scanned,
            functions: report.extraction.functions,
            classes: report.extraction.classes,
            variables: report.extraction.variables,
            files_skipped: report.ingest.files_skipped,
            parse_failures: report.extraction.parse_failures,
            failed_files: report
                .extraction
                .failures
                .into_iter()
                .map(|f| f.path)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::ExtractionStats;
    use crate::ingest::{IngestStats, ParseFailure};

    fn report(failures: Vec<ParseFailure>) -> IndexReport {
        IndexReport {
            ingest: IngestStats {
                files_processed: 12,
                binary_files: 2,
                files_skipped: 0,
                batches_committed: 1,
            },
            extraction: ExtractionStats {
                files_scanned: 5,
                files_parsed: 5 - failures.len(),
                functions: 20,
                classes: 4,
                variables: 9,
                parse_failures: failures.len(),
                failures,
            },
        }
    }

    #[test]
    fn index_output_from_report() {
        let output: IndexOutput = report(vec![]).into();
        assert_eq!(output.files_processed, 12);
        assert_eq!(output.source_files, 5);
        assert_eq!(output.functions, 20);
    }

    #[test]
    fn index_output_serialization_skips_zeros() {
        let output: IndexOutput = report(vec![]).into();
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("files_skipped"));
        assert!(!json.contains("parse_failures"));
        assert!(!json.contains("failed_files"));
    }

    #[test]
    fn index_output_lists_failed_files() {
        let output: IndexOutput = report(vec![ParseFailure {
            path: "pkg/broken.py".into(),
            detail: "syntax error at line(s) 1".into(),
            error_lines: vec![1],
        }])
        .into();
        assert_eq!(output.parse_failures, 1);
        assert_eq!(output.failed_files, vec!["pkg/broken.py"]);
    }
}
