//! Error types for SheetSync
//!
//! This module defines the error type shared by the remote source, the
//! on-disk stores and the sync engine.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SheetSync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// I/O error while reading or writing an artifact
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot or change record could not be parsed or serialized
    #[error("Malformed artifact '{path}': {message}")]
    Snapshot {
        /// Artifact file
        path: PathBuf,
        /// Parser or serializer message
        message: String,
    },

    /// A change record with the computed name is already on disk
    #[error("Change record already exists: {0}")]
    RecordExists(PathBuf),

    /// Remote table source failure (network, HTTP status, response shape)
    #[error("Source error for '{table}': {message}")]
    Source {
        /// Table being fetched, empty for the listing
        table: String,
        /// Failure description
        message: String,
    },

    /// Credential could not be loaded
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed artifact error
    pub fn snapshot(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Snapshot {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a source error for a table (or for the listing, with an empty name)
    pub fn remote(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Errors raised by local storage abort the run; source errors only skip a table
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Snapshot { .. } | Self::RecordExists(_)
        )
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::Snapshot { path, .. } | Self::RecordExists(path) => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Result type alias for SheetSync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SyncError::io(path, e))
    }
}
