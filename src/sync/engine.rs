//! Sync engine
//!
//! One run fetches every table, compares it with the stored snapshot and,
//! when new rows exist, replaces the snapshot and appends a change record.
//! Tables are processed one at a time; a failed or empty fetch skips only
//! that table, while a local storage error aborts the run.

use crate::config::SyncConfig;
use crate::error::{IoResultExt, Result};
use crate::source::TableSource;
use crate::store::{ChangeRecorder, SnapshotStore};
use crate::sync::diff::new_rows;
use crate::sync::{SyncReport, TableOutcome, TableReport};
use std::time::Instant;

/// Orchestrates fetch, compare and persist for every table
pub struct SyncEngine<S> {
    config: SyncConfig,
    source: S,
    snapshots: SnapshotStore,
    recorder: ChangeRecorder,
}

impl<S: TableSource> SyncEngine<S> {
    /// Create an engine writing into `config.output_dir`
    pub fn new(config: SyncConfig, source: S) -> Self {
        let snapshots = SnapshotStore::new(&config.output_dir);
        let recorder = ChangeRecorder::new(&config.output_dir);
        Self {
            config,
            source,
            snapshots,
            recorder,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Table source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Table source (mutable)
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Snapshot store
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Change recorder
    pub fn recorder(&self) -> &ChangeRecorder {
        &self.recorder
    }

    /// Run one sync cycle for `table`
    pub fn process_table(&self, table: &str) -> Result<TableOutcome> {
        tracing::info!("Processing sheet: {}", table);

        let current = match self.source.fetch_rows(table) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Skipping sheet {}: {}", table, e);
                return Ok(TableOutcome::FetchFailed {
                    error: e.to_string(),
                });
            }
        };

        if current.is_empty() {
            tracing::info!("No data found in sheet: {}", table);
            return Ok(TableOutcome::NoData);
        }

        let previous = self.snapshots.read(table)?;
        let added = new_rows(&previous, &current);

        if added.is_empty() {
            tracing::info!("No new changes found in {}", table);
            return Ok(TableOutcome::Unchanged {
                rows: current.len(),
            });
        }

        tracing::info!("New/changed rows found in {}: {}", table, added.len());

        // Snapshot first: an interruption before the record leaves the
        // baseline updated with no record, never the reverse.
        let snapshot = self.snapshots.write(table, &current)?;
        let record = self.recorder.append(table, &added)?;
        tracing::info!("Changes saved to {}", record);

        Ok(TableOutcome::Changed {
            new_rows: added.len(),
            total_rows: current.len(),
            snapshot,
            record,
        })
    }

    /// Process every table the source lists, in order
    pub fn run(&self) -> Result<SyncReport> {
        let started = Instant::now();
        std::fs::create_dir_all(&self.config.output_dir).with_path(&self.config.output_dir)?;

        let tables = match self.source.list_tables() {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!("Could not list sheets: {}", e);
                Vec::new()
            }
        };

        let mut report = SyncReport::default();
        if tables.is_empty() {
            tracing::info!("No sheets found in the spreadsheet.");
            report.duration = started.elapsed();
            return Ok(report);
        }

        for table in tables {
            let outcome = self.process_table(&table)?;
            report.tables.push(TableReport { table, outcome });
        }

        report.duration = started.elapsed();
        tracing::info!(
            "Sync finished: {} tables, {} changed, {} new rows in {:.2?}",
            report.tables.len(),
            report.changed_count(),
            report.new_row_count(),
            report.duration
        );
        Ok(report)
    }
}
