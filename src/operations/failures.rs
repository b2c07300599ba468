//! Parse failure listing shared between CLI and MCP.

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::ingest::code::failure_log::{read_failure_log, FailureEntry};

/// Failures recorded by the last index run.
#[derive(Debug, Clone, Serialize)]
pub struct FailuresResult {
    pub count: usize,
    pub failures: Vec<FailureEntry>,
}

/// Read back the failure log, optionally keeping only paths under `prefix`.
pub fn list_failures(config: &Config, prefix: Option<&str>) -> Result<FailuresResult> {
    let mut failures = read_failure_log(&config.get_failure_log_path())?;
    if let Some(prefix) = prefix {
        failures.retain(|e| e.failure.path.starts_with(prefix));
    }
    Ok(FailuresResult {
        count: failures.len(),
        failures,
    })
}
