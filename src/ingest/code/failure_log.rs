//! Parse failure logging.
//!
//! Each failed file from an extraction run is appended to
//! `.atlas/parse-failures.log` as one JSON line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ParseFailure;

/// One logged failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    /// UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub ts: String,
    #[serde(flatten)]
    pub failure: ParseFailure,
}

/// Appends failures to a JSONL file.
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append every failure with a shared timestamp.
    pub fn append(&self, failures: &[ParseFailure]) -> std::io::Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let ts = utc_timestamp();
        for failure in failures {
            let entry = FailureEntry {
                ts: ts.clone(),
                failure: failure.clone(),
            };
            let json = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
            writeln!(file, "{json}")?;
        }
        Ok(())
    }

    /// Remove the log file.
    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Read entries back; malformed lines are skipped.
pub fn read_failure_log(path: &Path) -> std::io::Result<Vec<FailureEntry>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(entry) = serde_json::from_str::<FailureEntry>(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn utc_timestamp() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    format_timestamp(secs)
}

/// Format Unix seconds as an ISO 8601 UTC timestamp (civil-from-days).
fn format_timestamp(secs: i64) -> String {
    let days = secs.div_euclid(86_400);
    let tod = secs.rem_euclid(86_400);

    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        tod / 3600,
        (tod % 3600) / 60,
        tod % 60
    )
}
