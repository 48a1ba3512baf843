//! Local persistence
//!
//! Snapshots and change records live side by side in one output directory:
//! - `{table}_latest.json` holds the full rows from the last sync that found changes
//! - `changes_{table}_{n}.json` holds only the rows that sync found new

mod artifact;
mod changes;
mod snapshot;

pub use artifact::{change_file_name, parse_change_file_name, snapshot_file_name};
pub use changes::{ChangeRecordId, ChangeRecorder};
pub use snapshot::SnapshotStore;
