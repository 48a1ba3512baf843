//! Google Sheets v4 source
//!
//! Reads sheet titles from the spreadsheet metadata and cell values from
//! the `values` endpoint using a pre-issued OAuth access token. Obtaining or
//! refreshing that token is left to whatever wrote the credential file.

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::source::{Row, TableSource};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides the credential file
pub const ACCESS_TOKEN_ENV: &str = "SHEETSYNC_ACCESS_TOKEN";

#[derive(Debug, Deserialize)]
struct TokenFile {
    token: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Load the access token from the environment or the credential file
pub fn load_access_token(path: &Path) -> Result<String> {
    if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
        if !token.trim().is_empty() {
            return Ok(token.trim().to_string());
        }
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        SyncError::Auth(format!("cannot read credential file {:?}: {}", path, e))
    })?;
    parse_token(&content)
        .map_err(|msg| SyncError::Auth(format!("credential file {:?}: {}", path, msg)))
}

fn parse_token(content: &str) -> std::result::Result<String, String> {
    let file: TokenFile = serde_json::from_str(content).map_err(|e| e.to_string())?;
    file.token
        .or(file.access_token)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "no 'token' or 'access_token' field".to_string())
}

/// Formatted values arrive as strings; anything else is rendered as JSON text.
fn to_row(cells: Vec<serde_json::Value>) -> Row {
    cells
        .into_iter()
        .map(|cell| match cell {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect()
}

/// Table source backed by the Google Sheets REST API
#[derive(Debug)]
pub struct SheetsSource {
    client: Client,
    base_url: Url,
    config: SyncConfig,
    token: String,
}

impl SheetsSource {
    /// Create a source, loading the token from `config.token_path`
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let token = load_access_token(&config.token_path)?;
        Self::with_token(config, token)
    }

    /// Create a source with an explicit access token
    pub fn with_token(config: &SyncConfig, token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            SyncError::config(format!("invalid API URL '{}': {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::config(format!(
                "API URL '{}' cannot carry a path",
                config.api_base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| SyncError::config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            config: config.clone(),
            token: token.into(),
        })
    }

    /// `{base}/spreadsheets/{id}/{extra...}` with every segment percent-encoded
    fn endpoint(&self, extra: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("spreadsheets")
                .push(&self.config.spreadsheet_id)
                .extend(extra);
        }
        url
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, table: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| SyncError::remote(table, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SyncError::remote(table, format!("HTTP {}: {}", status, body.trim())));
        }
        resp.json::<T>()
            .map_err(|e| SyncError::remote(table, format!("unexpected response: {}", e)))
    }
}

impl TableSource for SheetsSource {
    fn list_tables(&self) -> Result<Vec<String>> {
        let mut url = self.endpoint(&[]);
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let meta: SpreadsheetMeta = self.get_json(url, "")?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>> {
        let range = self.config.range_for(table);
        let url = self.endpoint(&["values", &range]);
        let body: ValueRange = self.get_json(url, table)?;
        Ok(body.values.into_iter().map(to_row).collect())
    }
}
