//! Snapshot synchronization
//!
//! Provides the change detection and the engine that drives a run:
//! - Value-based row diff against the last snapshot
//! - Full snapshot replacement on change
//! - Numbered change records per table

mod diff;
mod engine;
mod report;

pub use diff::new_rows;
pub use engine::SyncEngine;
pub use report::{SyncReport, TableOutcome, TableReport};
