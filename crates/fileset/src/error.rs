//! Error types for fileset

use std::path::PathBuf;

/// Result type for fileset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fileset operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A write-class operation needs exactly one target.
    #[error("Pattern '{pattern}' resolves to {count} targets, expected exactly one file")]
    TargetAmbiguity { pattern: String, count: usize },

    #[error("Failed to decode {format} content at {path}: {message}")]
    ContentFormat {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Content at {path} changed: expected {expected}, found {actual}")]
    StaleContent {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ContentFormat {
            path: path.into(),
            format: "JSON".into(),
            message: source.to_string(),
        }
    }
}
