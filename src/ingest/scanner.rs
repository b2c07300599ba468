use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::models::file::FileRecord;

/// Counters from one ingest walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Files persisted (text and binary).
    pub files_processed: usize,
    /// Files stored with the binary sentinel.
    pub binary_files: usize,
    /// Files or directory entries that could not be read.
    pub files_skipped: usize,
    /// Number of commits issued.
    pub batches_committed: usize,
}

/// Walks a repository and persists one record per regular file.
pub struct Scanner {
    config: Config,
    batch_size: usize,
    /// Canonical paths of the store and its side files, never ingested.
    store_files: Vec<PathBuf>,
}

impl Scanner {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            batch_size: config.batch_size(),
            store_files: store_files(&config.db_path),
        }
    }

    /// Walk the tree, committing every `batch_size` files plus once at the end.
    pub fn ingest(&self, db: &Database) -> Result<IngestStats> {
        let mut stats = IngestStats::default();
        let mut pending: Vec<FileRecord> = Vec::with_capacity(self.batch_size);

        for entry in self.walker().build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    stats.files_skipped += 1;
                    continue;
                }
            };
            if entry.file_type().is_some_and(|ft| ft.is_dir()) || !entry.path().is_file() {
                continue;
            }

            let Some(record) = self.read_record(entry.path()) else {
                stats.files_skipped += 1;
                continue;
            };
            if record.is_binary {
                stats.binary_files += 1;
            }
            pending.push(record);

            if pending.len() >= self.batch_size {
                stats.files_processed += flush(db, &mut pending)?;
                stats.batches_committed += 1;
            }
        }

        if !pending.is_empty() {
            stats.files_processed += flush(db, &mut pending)?;
            stats.batches_committed += 1;
        }

        info!(
            files = stats.files_processed,
            binary = stats.binary_files,
            skipped = stats.files_skipped,
            "ingest complete"
        );
        Ok(stats)
    }

    fn walker(&self) -> WalkBuilder {
        let config = self.config.clone();
        let store = self.store_files.clone();
        let gitignore = self.config.settings.indexing.respect_gitignore;
        let mut builder = WalkBuilder::new(&self.config.project_root);
        builder
            .hidden(false)
            .ignore(false)
            .parents(gitignore)
            .git_ignore(gitignore)
            .git_exclude(gitignore)
            .git_global(false)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |e| {
                if e.depth() == 0 {
                    return true;
                }
                if e.file_type().is_some_and(|ft| ft.is_dir()) {
                    return !config.is_excluded_dir(&e.file_name().to_string_lossy());
                }
                !is_store_file(&store, e.path())
            });
        builder
    }

    /// Read one file into a record. `None` means it was logged and skipped.
    fn read_record(&self, path: &Path) -> Option<FileRecord> {
        let relative = self.config.relative_path(path);

        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %relative, error = %e, "skipping unreadable file");
                return None;
            }
        };
        let hash = hash_bytes(&bytes);

        match String::from_utf8(bytes) {
            Ok(content) => {
                debug!(path = %relative, "ingested text file");
                Some(FileRecord::text(&relative, content, hash))
            }
            Err(_) => {
                debug!(path = %relative, "ingested binary file");
                Some(FileRecord::binary(&relative, hash))
            }
        }
    }
}

/// Insert the pending batch in one transaction and clear it.
fn flush(db: &Database, pending: &mut Vec<FileRecord>) -> Result<usize> {
    let n = pending.len();
    db.in_transaction(|db| {
        for record in pending.iter() {
            db.insert_file(record)?;
        }
        Ok(())
    })?;
    pending.clear();
    debug!(files = n, "committed ingest batch");
    Ok(n)
}

/// The store file plus the journal files `SQLite` keeps next to it.
///
/// Paths are canonicalized through the parent directory; a store whose
/// directory does not exist cannot sit inside the walked tree.
fn store_files(db_path: &Path) -> Vec<PathBuf> {
    let Some(name) = db_path.file_name() else {
        return Vec::new();
    };
    let parent = match db_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Ok(dir) = parent.canonicalize() else {
        return Vec::new();
    };
    ["", "-wal", "-shm", "-journal"]
        .iter()
        .map(|suffix| {
            let mut file = name.to_os_string();
            file.push(suffix);
            dir.join(file)
        })
        .collect()
}

fn is_store_file(store: &[PathBuf], path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    store.iter().any(|s| {
        s.file_name() == Some(name) && path.canonicalize().is_ok_and(|p| p == *s)
    })
}

/// SHA-256 of a byte slice as lowercase hex.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
