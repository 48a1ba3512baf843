//! Run outcomes

use crate::store::ChangeRecordId;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to one table during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// The source reported an error; nothing was read or written
    FetchFailed {
        /// Error message from the source
        error: String,
    },
    /// The fetch returned no rows; nothing was read or written
    NoData,
    /// Every fetched row was already in the snapshot; nothing was written
    Unchanged {
        /// Rows fetched
        rows: usize,
    },
    /// New rows were found; snapshot replaced and a change record appended
    Changed {
        /// Rows in the change record
        new_rows: usize,
        /// Rows in the new snapshot
        total_rows: usize,
        /// Snapshot file written
        snapshot: PathBuf,
        /// Change record written
        record: ChangeRecordId,
    },
}

impl TableOutcome {
    /// Whether the outcome wrote anything
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Number of new rows recorded
    pub fn new_row_count(&self) -> usize {
        match self {
            Self::Changed { new_rows, .. } => *new_rows,
            _ => 0,
        }
    }
}

/// Outcome for a named table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    /// Table name
    pub table: String,
    /// What happened
    pub outcome: TableOutcome,
}

/// Result of a full run over all tables
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Per-table outcomes, in processing order
    pub tables: Vec<TableReport>,
    /// Wall time of the run
    pub duration: Duration,
}

impl SyncReport {
    /// Outcome for `table`, if it was processed
    pub fn outcome(&self, table: &str) -> Option<&TableOutcome> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| &t.outcome)
    }

    /// Tables that produced a change record
    pub fn changed_count(&self) -> usize {
        self.tables.iter().filter(|t| t.outcome.wrote()).count()
    }

    /// Tables fetched with no new rows
    pub fn unchanged_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| matches!(t.outcome, TableOutcome::Unchanged { .. }))
            .count()
    }

    /// Tables skipped because the fetch failed or returned nothing
    pub fn skipped_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| {
                matches!(
                    t.outcome,
                    TableOutcome::NoData | TableOutcome::FetchFailed { .. }
                )
            })
            .count()
    }

    /// New rows across all tables
    pub fn new_row_count(&self) -> usize {
        self.tables.iter().map(|t| t.outcome.new_row_count()).sum()
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        println!("\n=== Sync Summary ===");
        println!("Tables:      {}", self.tables.len());
        println!("Changed:     {}", self.changed_count());
        println!("Unchanged:   {}", self.unchanged_count());
        println!("Skipped:     {}", self.skipped_count());
        println!("New rows:    {}", self.new_row_count());
        println!("Duration:    {:.2?}", self.duration);

        let changed: Vec<_> = self.tables.iter().filter(|t| t.outcome.wrote()).collect();
        if !changed.is_empty() {
            println!("\nChange records:");
            for t in changed {
                if let TableOutcome::Changed { new_rows, record, .. } = &t.outcome {
                    println!("  {} - {} rows -> {}", t.table, new_rows, record);
                }
            }
        }

        let failed: Vec<_> = self
            .tables
            .iter()
            .filter_map(|t| match &t.outcome {
                TableOutcome::FetchFailed { error } => Some((&t.table, error)),
                _ => None,
            })
            .collect();
        if !failed.is_empty() {
            println!("\nFetch failures: {}", failed.len());
            for (table, error) in failed {
                println!("  {} - {}", table, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SyncReport {
        SyncReport {
            tables: vec![
                TableReport {
                    table: "A".to_string(),
                    outcome: TableOutcome::Changed {
                        new_rows: 3,
                        total_rows: 5,
                        snapshot: PathBuf::from("out/A_latest.json"),
                        record: ChangeRecordId {
                            table: "A".to_string(),
                            sequence: 1,
                            path: PathBuf::from("out/changes_A_1.json"),
                        },
                    },
                },
                TableReport {
                    table: "B".to_string(),
                    outcome: TableOutcome::Unchanged { rows: 4 },
                },
                TableReport {
                    table: "C".to_string(),
                    outcome: TableOutcome::NoData,
                },
                TableReport {
                    table: "D".to_string(),
                    outcome: TableOutcome::FetchFailed {
                        error: "HTTP 500".to_string(),
                    },
                },
            ],
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_counts() {
        let r = report();
        assert_eq!(r.changed_count(), 1);
        assert_eq!(r.unchanged_count(), 1);
        assert_eq!(r.skipped_count(), 2);
        assert_eq!(r.new_row_count(), 3);
        assert_eq!(r.outcome("C"), Some(&TableOutcome::NoData));
        assert!(r.outcome("Z").is_none());
    }

    #[test]
    fn test_empty_report() {
        let r = SyncReport::default();
        assert_eq!(r.changed_count(), 0);
        assert_eq!(r.new_row_count(), 0);
    }
}
