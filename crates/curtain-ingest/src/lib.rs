//! Ingestion for airborne radar curtain data.
//!
//! Opens a raw NetCDF sensor dataset from a local path or an object-store
//! URL, validates that the variables the pipeline needs are present, and
//! projects the dataset down to a [`RawSensorFrame`]. The dataset handle is
//! a scoped resource: callers must close it explicitly once the frame has
//! been extracted, on every exit path.

pub mod dataset;
pub mod error;
pub mod frame;
pub mod location;
pub mod metadata;

pub use dataset::{open_dataset, DatasetHandle};
pub use error::{IngestError, Result};
pub use frame::{extract_frame, SensorVariables};
pub use location::{DataLocation, ObjectStoreConfig};
pub use metadata::flight_date_from_name;

pub use curtain_common::RawSensorFrame;
