use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::error::{AtlasError, Result};
use crate::ingest::code::failure_log::FailureLog;
use crate::ingest::{
    FileOutcome, IngestStats, ParseFailure, PythonExtractor, Scanner, StructureExtractor,
};

/// Statistics from the structural extraction pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionStats {
    /// Source files handed to the extractor.
    pub files_scanned: usize,
    /// Files that produced entities (possibly none).
    pub files_parsed: usize,
    pub functions: usize,
    pub classes: usize,
    pub variables: usize,
    pub parse_failures: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ParseFailure>,
}

/// Outcome of a full rebuild.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexReport {
    pub ingest: IngestStats,
    pub extraction: ExtractionStats,
}

/// Rebuild the index from scratch: recreate the store, ingest, then extract.
pub fn run_index(config: &Config) -> Result<IndexReport> {
    config.ensure_atlas_dir()?;

    let log = FailureLog::new(config.get_failure_log_path());
    log.clear()?;

    let db = Database::create_fresh(&config.db_path)?;
    let ingest = Scanner::new(config).ingest(&db)?;
    let extraction = extract_structure(&db, config, &PythonExtractor::new())?;

    if let Err(e) = log.append(&extraction.failures) {
        warn!(error = %e, "could not write parse failure log");
    }

    info!(
        files = ingest.files_processed,
        functions = extraction.functions,
        classes = extraction.classes,
        variables = extraction.variables,
        failures = extraction.parse_failures,
        "index rebuilt"
    );
    Ok(IndexReport { ingest, extraction })
}

/// Run `extractor` over every stored source file and persist what it finds.
///
/// Each batch is parsed in parallel and written sequentially in one
/// transaction, so ids and counts do not depend on thread scheduling.
pub fn extract_structure(
    db: &Database,
    config: &Config,
    extractor: &dyn StructureExtractor,
) -> Result<ExtractionStats> {
    let ids = db.source_file_ids(|ext| config.is_source_extension(ext))?;
    let mut stats = ExtractionStats {
        files_scanned: ids.len(),
        ..Default::default()
    };

    for batch in ids.chunks(config.batch_size()) {
        let sources = db.load_sources(batch)?;
        let outcomes: Vec<(i64, FileOutcome)> = sources
            .par_iter()
            .map(|s| (s.id, extractor.extract(&s.path, &s.content)))
            .collect();

        db.in_transaction(|db| {
            for (file_id, outcome) in outcomes {
                match outcome {
                    FileOutcome::Parsed(entities) => {
                        debug!(file_id, entities = entities.total(), "extracted");
                        let counts = db.insert_entities(file_id, &entities)?;
                        stats.files_parsed += 1;
                        stats.functions += counts.functions;
                        stats.classes += counts.classes;
                        stats.variables += counts.variables;
                    }
                    FileOutcome::Failed(failure) => {
                        warn!(
                            language = extractor.language(),
                            path = %failure.path,
                            detail = %failure.detail,
                            "parse failure"
                        );
                        stats.parse_failures += 1;
                        stats.failures.push(failure);
                    }
                }
            }
            Ok(())
        })?;
    }

    Ok(stats)
}

/// Open the index, building it first if it does not exist yet.
pub fn ensure_index(config: &Config) -> Result<Database> {
    if !config.index_exists() {
        run_index(config)?;
    }
    Database::open(&config.db_path)
}

/// Open an existing index without building one.
pub fn open_index(config: &Config) -> Result<Database> {
    if !config.index_exists() {
        return Err(AtlasError::IndexNotFound);
    }
    Database::open(&config.db_path)
}
