//! Change recorder
//!
//! Appends immutable, numbered change records (`changes_{table}_{n}.json`).
//! The next number is derived from a directory scan at write time rather
//! than a stored counter, so concurrent runs are not supported.

use crate::error::{IoResultExt, Result, SyncError};
use crate::source::Row;
use crate::store::artifact;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Identifier of a written change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecordId {
    /// Table the record belongs to
    pub table: String,
    /// Sequence number, starting at 1
    pub sequence: u64,
    /// File holding the record
    pub path: PathBuf,
}

impl fmt::Display for ChangeRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Writes and enumerates change records
#[derive(Debug, Clone)]
pub struct ChangeRecorder {
    dir: PathBuf,
}

impl ChangeRecorder {
    /// Create a recorder rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All records for `table`, ordered by sequence number
    pub fn list(&self, table: &str) -> Result<Vec<ChangeRecordId>> {
        let stem = artifact::file_stem(table);
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SyncError::io(&self.dir, e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.with_path(&self.dir)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some((found, sequence)) = artifact::parse_change_file_name(name) {
                if found == stem {
                    records.push(ChangeRecordId {
                        table: table.to_string(),
                        sequence,
                        path: entry.path(),
                    });
                }
            }
        }
        records.sort_by_key(|r| r.sequence);
        Ok(records)
    }

    /// Number of existing records for `table`, ignoring gaps in numbering
    pub fn count(&self, table: &str) -> Result<usize> {
        Ok(self.list(table)?.len())
    }

    /// Persist `rows` as the next change record for `table`.
    ///
    /// The sequence is `count + 1`. Existing records are never overwritten:
    /// if that name is taken (a lower record was deleted by hand) the next
    /// free number is used instead.
    pub fn append(&self, table: &str, rows: &[Row]) -> Result<ChangeRecordId> {
        let mut sequence = self.count(table)? as u64 + 1;
        loop {
            let path = self.dir.join(artifact::change_file_name(table, sequence));
            match artifact::create_rows(&path, rows) {
                Ok(()) => {
                    tracing::debug!("Wrote {} changed rows to {:?}", rows.len(), path);
                    return Ok(ChangeRecordId {
                        table: table.to_string(),
                        sequence,
                        path,
                    });
                }
                Err(SyncError::RecordExists(taken)) => {
                    tracing::warn!(
                        "Change record {:?} already exists (numbering gap), trying {}",
                        taken,
                        sequence + 1
                    );
                    sequence += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
