//! In-memory table source

use crate::error::{Result, SyncError};
use crate::source::{Row, TableSource};
use std::cell::Cell;
use std::collections::HashSet;

/// Table source backed by vectors held in memory.
///
/// Useful for tests and for embedding the engine over data obtained some
/// other way. Individual tables, or the listing itself, can be made to fail.
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: Vec<(String, Vec<Row>)>,
    failing: HashSet<String>,
    fail_listing: bool,
    fetches: Cell<usize>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table (builder style)
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.set_rows(name, rows);
        self
    }

    /// Replace a table's rows, adding the table if it is new
    pub fn set_rows(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        let name = name.into();
        match self.tables.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = rows,
            None => self.tables.push((name, rows)),
        }
    }

    /// Make fetches of `name` fail
    pub fn fail_table(&mut self, name: impl Into<String>) {
        self.failing.insert(name.into());
    }

    /// Make the table listing fail
    pub fn fail_listing(&mut self, fail: bool) {
        self.fail_listing = fail;
    }

    /// Number of `fetch_rows` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl TableSource for MemorySource {
    fn list_tables(&self) -> Result<Vec<String>> {
        if self.fail_listing {
            return Err(SyncError::remote("", "listing unavailable"));
        }
        Ok(self.tables.iter().map(|(n, _)| n.clone()).collect())
    }

    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>> {
        self.fetches.set(self.fetches.get() + 1);
        if self.failing.contains(table) {
            return Err(SyncError::remote(table, "fetch unavailable"));
        }
        self.tables
            .iter()
            .find(|(n, _)| n == table)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| SyncError::remote(table, "no such table"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keeps_insertion_order() {
        let source = MemorySource::new()
            .with_table("b", vec![])
            .with_table("a", vec![vec!["1".to_string()]]);
        assert_eq!(source.list_tables().unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn test_set_rows_replaces() {
        let mut source = MemorySource::new().with_table("a", vec![vec!["1".to_string()]]);
        source.set_rows("a", vec![vec!["2".to_string()]]);
        assert_eq!(source.fetch_rows("a").unwrap(), vec![vec!["2".to_string()]]);
        assert_eq!(source.list_tables().unwrap().len(), 1);
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn test_failures() {
        let mut source = MemorySource::new().with_table("a", vec![]);
        source.fail_table("a");
        assert!(source.fetch_rows("a").is_err());
        assert!(source.fetch_rows("missing").is_err());
        source.fail_listing(true);
        assert!(source.list_tables().is_err());
    }
}
