//! Remote table sources
//!
//! A source enumerates the tables of one spreadsheet and returns each
//! table's rows. Errors are returned rather than collapsed into empty
//! results, so callers can tell "fetch failed" from "sheet is empty".

mod memory;
mod sheets;

pub use memory::MemorySource;
pub use sheets::SheetsSource;

use crate::error::Result;

/// One row of cells. Trailing empty cells may be omitted, so rows of the
/// same table can differ in length.
pub type Row = Vec<String>;

/// Provider of tabular data
pub trait TableSource {
    /// Names of all tables, in spreadsheet order
    fn list_tables(&self) -> Result<Vec<String>>;

    /// Current rows of `table`, in sheet order
    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn list_tables(&self) -> Result<Vec<String>> {
        (**self).list_tables()
    }

    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>> {
        (**self).fetch_rows(table)
    }
}

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn list_tables(&self) -> Result<Vec<String>> {
        (**self).list_tables()
    }

    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>> {
        (**self).fetch_rows(table)
    }
}
