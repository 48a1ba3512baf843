//! Snapshot store
//!
//! Keeps the last-known full contents of each table as
//! `{table}_latest.json` in the output directory.

use crate::error::{Result, SyncError};
use crate::source::Row;
use crate::store::artifact;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads and replaces per-table snapshots
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot for `table`
    pub fn path_for(&self, table: &str) -> PathBuf {
        self.dir.join(artifact::snapshot_file_name(table))
    }

    /// Whether a snapshot exists for `table`
    pub fn exists(&self, table: &str) -> bool {
        self.path_for(table).is_file()
    }

    /// Load the stored snapshot, or an empty baseline if none was written yet.
    ///
    /// Only absence maps to empty. A snapshot that exists but cannot be read
    /// or parsed is an error: treating it as empty would mark every row new
    /// and overwrite the baseline.
    pub fn read(&self, table: &str) -> Result<Vec<Row>> {
        let path = self.path_for(table);
        match std::fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No snapshot for '{}' at {:?}", table, path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(SyncError::io(&path, e)),
        }
        let rows = artifact::read_rows(&path)?;
        tracing::debug!("Loaded {} rows for '{}' from {:?}", rows.len(), table, path);
        Ok(rows)
    }

    /// Replace the stored snapshot with `rows` in full
    pub fn write(&self, table: &str, rows: &[Row]) -> Result<PathBuf> {
        let path = self.path_for(table);
        artifact::replace_rows(&path, rows)?;
        tracing::debug!("Wrote snapshot of {} rows to {:?}", rows.len(), path);
        Ok(path)
    }
}
