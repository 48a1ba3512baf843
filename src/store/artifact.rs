//! On-disk artifact naming and encoding
//!
//! Snapshots and change records share one directory and one format: a JSON
//! array of rows, each row an array of strings, indented by four spaces and
//! written as raw UTF-8.

use crate::error::{IoResultExt, Result, SyncError};
use crate::source::Row;
use percent_encoding::percent_encode_byte;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

const SNAPSHOT_SUFFIX: &str = "_latest.json";
const CHANGE_PREFIX: &str = "changes_";
const JSON_EXT: &str = ".json";

/// Make a table name safe to embed in a file name.
///
/// `%`, path separators and NUL are percent-encoded; everything else is
/// kept verbatim. The mapping is one-to-one, so distinct sheets never share
/// a snapshot or a change series.
pub fn file_stem(table: &str) -> String {
    let mut stem = String::with_capacity(table.len());
    for c in table.chars() {
        match c {
            '%' | '/' | '\\' | '\0' => stem.push_str(percent_encode_byte(c as u8)),
            other => stem.push(other),
        }
    }
    stem
}

/// `{table}_latest.json`
pub fn snapshot_file_name(table: &str) -> String {
    format!("{}{}", file_stem(table), SNAPSHOT_SUFFIX)
}

/// `changes_{table}_{seq}.json`
pub fn change_file_name(table: &str, sequence: u64) -> String {
    format!("{}{}_{}{}", CHANGE_PREFIX, file_stem(table), sequence, JSON_EXT)
}

/// Split a change record file name into its table stem and sequence number.
///
/// The sequence is the digits after the last `_`, so table names that
/// themselves contain underscores or digits parse unambiguously.
pub fn parse_change_file_name(file_name: &str) -> Option<(&str, u64)> {
    let body = file_name
        .strip_prefix(CHANGE_PREFIX)?
        .strip_suffix(JSON_EXT)?;
    let (stem, seq) = body.rsplit_once('_')?;
    if seq.is_empty() || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    seq.parse().ok().map(|n| (stem, n))
}

fn encode(rows: &[Row], path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    rows.serialize(&mut ser)
        .map_err(|e| SyncError::snapshot(path, e.to_string()))?;
    Ok(buf)
}

/// Read rows from an artifact. The file must exist.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let content = std::fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).map_err(|e| SyncError::snapshot(path, e.to_string()))
}

/// Write rows, replacing whatever is at `path`.
pub fn replace_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let data = encode(rows, path)?;
    std::fs::write(path, data).with_path(path)
}

/// Write rows to a file that must not exist yet.
pub fn create_rows(path: &Path, rows: &[Row]) -> Result<()> {
    let data = encode(rows, path)?;
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(SyncError::RecordExists(path.to_path_buf()))
        }
        Err(e) => return Err(SyncError::io(path, e)),
    };
    file.write_all(&data).with_path(path)?;
    file.sync_all().with_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(snapshot_file_name("Sheet1"), "Sheet1_latest.json");
        assert_eq!(change_file_name("Sheet1", 3), "changes_Sheet1_3.json");
        assert_eq!(snapshot_file_name("a/b\\c"), "a%2Fb%5Cc_latest.json");
        assert_eq!(change_file_name("50%\0", 1), "changes_50%25%00_1.json");
    }

    #[test]
    fn test_file_stem_is_one_to_one() {
        let names = ["Q1/Q2", "Q1_Q2", "Q1%2FQ2", "Q1\\Q2", "Q1\0Q2", "Q1%Q2", "Q1Q2"];
        let stems: std::collections::HashSet<String> = names.iter().map(|n| file_stem(n)).collect();
        assert_eq!(stems.len(), names.len());
        assert_eq!(file_stem("naïve sheet"), "naïve sheet");
    }

    #[test]
    fn test_parse_change_file_name() {
        assert_eq!(parse_change_file_name("changes_Sheet1_12.json"), Some(("Sheet1", 12)));
        assert_eq!(parse_change_file_name("changes_Q1_2024_7.json"), Some(("Q1_2024", 7)));
        assert_eq!(parse_change_file_name("changes_Sheet1_.json"), None);
        assert_eq!(parse_change_file_name("changes_Sheet1_+2.json"), None);
        assert_eq!(parse_change_file_name("changes_Sheet1_2.json.bak"), None);
        assert_eq!(parse_change_file_name("Sheet1_latest.json"), None);
    }

    #[test]
    fn test_encoding_is_indented_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.json");
        replace_rows(&path, &[row(&["id", "naïve"])]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n    [\n        \"id\",\n        \"naïve\"\n    ]\n]");
        assert_eq!(read_rows(&path).unwrap(), vec![row(&["id", "naïve"])]);
    }

    #[test]
    fn test_create_rows_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("changes_S_1.json");
        create_rows(&path, &[row(&["a"])]).unwrap();

        let err = create_rows(&path, &[row(&["b"])]).unwrap_err();
        assert!(matches!(err, SyncError::RecordExists(_)));
        assert_eq!(read_rows(&path).unwrap(), vec![row(&["a"])]);
    }

    #[test]
    fn test_read_rows_reports_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not rows}").unwrap();
        assert!(matches!(read_rows(&path), Err(SyncError::Snapshot { .. })));
    }
}
