//! Configuration settings for SheetSync
//!
//! Defines the CLI arguments, built-in defaults and the runtime
//! configuration handed to the sync engine.

use crate::error::{Result, SyncError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Spreadsheet synchronized when nothing else is configured
pub const DEFAULT_SPREADSHEET_ID: &str = "1BeOZFEa00aC8jGFB_jH_KCT-Y_YoLDqlHtQqJtoed7I";

/// Directory holding snapshots and change records
pub const DEFAULT_OUTPUT_DIR: &str = "output_data";

/// Credential file written by the authorization flow
pub const DEFAULT_TOKEN_PATH: &str = "token.json";

/// Rightmost column fetched for every sheet (range `A1:Z`)
pub const DEFAULT_LAST_COLUMN: &str = "Z";

/// Sheets REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// SheetSync - snapshot a spreadsheet and record new rows per sheet
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sheetsync")]
#[command(author = "SheetSync Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Snapshot spreadsheet sheets and record new rows")]
#[command(long_about = r#"
SheetSync fetches every sheet of a spreadsheet, compares it with the last
stored snapshot and writes:

  <output>/<sheet>_latest.json       full current rows
  <output>/changes_<sheet>_<n>.json  rows not present in the previous snapshot

Run it from a scheduler; runs must not overlap.

Examples:
  sheetsync                                   # built-in spreadsheet and output_data/
  sheetsync --output-dir /var/lib/sheetsync   # alternate output directory
  RUST_LOG=sheetsync=debug sheetsync          # file-level logging
"#)]
pub struct CliArgs {
    /// Spreadsheet identifier
    #[arg(long, env = "SHEETSYNC_SPREADSHEET_ID", value_name = "ID")]
    pub spreadsheet_id: Option<String>,

    /// Directory for snapshots and change records
    #[arg(short = 'o', long, env = "SHEETSYNC_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Credential file holding an OAuth access token
    #[arg(long, env = "SHEETSYNC_TOKEN", value_name = "PATH")]
    pub token: Option<PathBuf>,

    /// Rightmost column to fetch (e.g. Z, AZ)
    #[arg(long, env = "SHEETSYNC_LAST_COLUMN", value_name = "COL")]
    pub last_column: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "60", value_name = "SECS")]
    pub timeout: u64,

    /// Emit logs as JSON
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (no summary)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Runtime configuration for a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Spreadsheet to synchronize
    pub spreadsheet_id: String,
    /// Directory for snapshots and change records
    pub output_dir: PathBuf,
    /// Credential file read by the Sheets source
    pub token_path: PathBuf,
    /// Rightmost fetched column
    pub last_column: String,
    /// Sheets API base URL
    pub api_base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            last_column: DEFAULT_LAST_COLUMN.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl SyncConfig {
    /// Create a configuration for an alternate output directory
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Build configuration from CLI arguments layered over the defaults
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(id) = &args.spreadsheet_id {
            config.spreadsheet_id = id.trim().to_string();
        }
        if let Some(dir) = &args.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(token) = &args.token {
            config.token_path = token.clone();
        }
        if let Some(col) = &args.last_column {
            config.last_column = col.trim().to_ascii_uppercase();
        }
        config.timeout = Duration::from_secs(args.timeout);

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.spreadsheet_id.is_empty() {
            return Err(SyncError::config("Spreadsheet id is required"));
        }
        if self.last_column.is_empty()
            || !self.last_column.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(SyncError::config(format!(
                "Invalid last column '{}': expected letters such as Z or AZ",
                self.last_column
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(SyncError::config("Output directory is required"));
        }
        Ok(())
    }

    /// A1 range covering a whole sheet, e.g. `'Sheet1'!A1:Z`
    ///
    /// The title is always quoted, with embedded quotes doubled.
    pub fn range_for(&self, table: &str) -> String {
        format!("'{}'!A1:{}", table.replace('\'', "''"), self.last_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.output_dir, PathBuf::from("output_data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_cli_overrides() {
        let args = CliArgs {
            spreadsheet_id: Some("abc".to_string()),
            output_dir: Some(PathBuf::from("/tmp/out")),
            last_column: Some("az".to_string()),
            timeout: 5,
            ..Default::default()
        };
        let config = SyncConfig::from_cli(&args).unwrap();
        assert_eq!(config.spreadsheet_id, "abc");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.last_column, "AZ");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
    }

    #[test]
    fn test_validate_rejects_bad_column() {
        let config = SyncConfig {
            last_column: "Z9".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let args = CliArgs {
            spreadsheet_id: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(SyncConfig::from_cli(&args).is_err());
    }

    #[test]
    fn test_range_for() {
        let config = SyncConfig::default();
        assert_eq!(config.range_for("Sheet1"), "'Sheet1'!A1:Z");
        assert_eq!(config.range_for("Bob's list"), "'Bob''s list'!A1:Z");
    }
}
