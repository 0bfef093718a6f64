//! Error types for the tiler.

use thiserror::Error;

/// Errors raised while planning or writing tiles.
#[derive(Error, Debug)]
pub enum TileError {
    /// Filesystem error under the tile output directory.
    #[error("Tile directory error at {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the source store failed.
    #[error("Store read error: {0}")]
    Store(#[from] curtain_store::StoreError),

    /// Tile serialization failed.
    #[error("Tile serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for tiler operations.
pub type Result<T> = std::result::Result<T, TileError>;
