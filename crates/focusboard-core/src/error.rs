//! Core error types for focusboard-core.
//!
//! Domain failures (`InvalidInput`, `IndexOutOfRange`, `NothingToExport`,
//! `StoreReadMalformed`) are all recoverable: the operation that raised them
//! leaves state untouched. Infrastructure failures wrap the store and I/O
//! layers. Configuration has its own [`ConfigError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad duration or empty goal text.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Toggle/delete on a position that does not exist.
    #[error("Index {index} out of range (length: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Export requested on an empty goal list.
    #[error("No goals to export")]
    NothingToExport,

    /// Persisted goal data could not be parsed.
    #[error("Stored value under '{key}' is malformed: {message}")]
    StoreReadMalformed { key: String, message: String },

    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Persistent store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[source] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_mentions_bounds() {
        let err = CoreError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Index 5 out of range (length: 2)");
    }

    #[test]
    fn store_error_converts_into_core_error() {
        let err: CoreError = StoreError::Locked.into();
        assert!(matches!(err, CoreError::Store(StoreError::Locked)));
    }
}
