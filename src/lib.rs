//! # SheetSync - Spreadsheet Snapshots and Change Records
//!
//! SheetSync polls every sheet of a spreadsheet, compares the rows with the
//! last stored snapshot and persists two artifacts per sheet:
//!
//! - `{sheet}_latest.json`: the full rows from the latest fetch that found changes
//! - `changes_{sheet}_{n}.json`: only the rows not present in the previous snapshot
//!
//! It is built for scheduled, non-overlapping runs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetsync::config::SyncConfig;
//! use sheetsync::source::SheetsSource;
//! use sheetsync::sync::SyncEngine;
//!
//! let config = SyncConfig::default();
//! let source = SheetsSource::new(&config).unwrap();
//! let engine = SyncEngine::new(config, source);
//!
//! let report = engine.run().unwrap();
//! report.print_summary();
//! ```
//!
//! ## Custom Sources
//!
//! ```
//! use sheetsync::config::SyncConfig;
//! use sheetsync::source::MemorySource;
//! use sheetsync::sync::{SyncEngine, TableOutcome};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let source = MemorySource::new().with_table(
//!     "Sheet1",
//!     vec![vec!["id".to_string(), "name".to_string()]],
//! );
//! let engine = SyncEngine::new(SyncConfig::with_output_dir(dir.path()), source);
//!
//! let outcome = engine.process_table("Sheet1").unwrap();
//! assert_eq!(outcome.new_row_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod source;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use source::{Row, TableSource};
pub use sync::{SyncEngine, SyncReport, TableOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
