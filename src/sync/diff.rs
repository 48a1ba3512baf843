//! Row-level change detection
//!
//! A row is new when no row of the previous snapshot equals it cell for
//! cell. Position is irrelevant, so reordering never produces new rows.
//! Removals are not reported.

use crate::source::Row;
use std::collections::HashSet;

/// Rows of `current`, in order, that appear nowhere in `previous`.
///
/// Every occurrence is tested on its own: a row repeated in `current` and
/// absent from `previous` is returned once per occurrence.
pub fn new_rows(previous: &[Row], current: &[Row]) -> Vec<Row> {
    let known: HashSet<&Row> = previous.iter().collect();
    current
        .iter()
        .filter(|row| !known.contains(row))
        .cloned()
        .collect()
}
