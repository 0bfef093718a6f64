//! Error types for the curtain store.

use thiserror::Error;

/// Errors raised while writing or reading a curtain store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem preparation failed (creating or clobbering the store root).
    #[error("Store directory error at {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Underlying Zarr storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Store attributes are missing or malformed.
    #[error("Invalid store metadata: {0}")]
    InvalidMetadata(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested variable has no array in the store.
    #[error("Variable not found in store: {0}")]
    VariableNotFound(String),
}

impl StoreError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    pub fn invalid_metadata(err: impl std::fmt::Display) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
