//! Error types for the ingest crate.

use thiserror::Error;

/// Errors that can occur while acquiring or cleaning a raw dataset.
///
/// All ingest failures are fatal to the pipeline run; there is no retry.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {location}: {source}")]
    FileRead {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported location '{0}': expected a local path or s3://bucket/key")]
    InvalidLocation(String),

    #[error("object store fetch failed for {location}: {source}")]
    ObjectFetch {
        location: String,
        #[source]
        source: object_store::Error,
    },

    #[error("object store configuration invalid: {0}")]
    ObjectStoreConfig(String),

    #[error("failed to open NetCDF dataset {location}: {source}")]
    DatasetOpen {
        location: String,
        #[source]
        source: netcdf::Error,
    },

    #[error("dataset {location} is missing required variable '{variable}'")]
    MissingVariable { location: String, variable: String },

    #[error("failed to read variable '{variable}' from {location}: {source}")]
    VariableRead {
        location: String,
        variable: String,
        #[source]
        source: netcdf::Error,
    },

    #[error("dataset {location} is malformed: {source}")]
    Shape {
        location: String,
        #[source]
        source: curtain_common::FrameError,
    },

    #[error("failed to release dataset handle for {location}: {source}")]
    Release {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
