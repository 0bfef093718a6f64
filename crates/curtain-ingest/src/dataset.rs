//! Lazily-backed dataset handles.

use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::frame::SensorVariables;
use crate::location::{fetch_object, DataLocation, ObjectStoreConfig};

/// An open raw sensor dataset.
///
/// The handle keeps the NetCDF file (and, for remote datasets, the scratch
/// file it was spooled to) alive without loading variable data; reads are
/// deferred to [`crate::extract_frame`]. Callers must call [`close`] exactly
/// once on every exit path; `Drop` only serves as a backstop for panics and
/// does not report cleanup failures.
///
/// [`close`]: DatasetHandle::close
#[derive(Debug)]
pub struct DatasetHandle {
    file: netcdf::File,
    location: String,
    /// Holds the spooled copy of a remote dataset until close.
    scratch: Option<TempDir>,
}

impl DatasetHandle {
    pub fn file(&self) -> &netcdf::File {
        &self.file
    }

    /// The location string this handle was opened from, for diagnostics.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Release the dataset and any scratch storage backing it.
    pub fn close(self) -> Result<()> {
        let Self {
            file,
            location,
            scratch,
        } = self;
        drop(file);
        if let Some(dir) = scratch {
            dir.close().map_err(|e| IngestError::Release {
                location: location.clone(),
                source: e,
            })?;
        }
        debug!(location = %location, "Released dataset handle");
        Ok(())
    }
}

/// Open a dataset from a local path or an object-store location and verify
/// that every variable the pipeline needs is present.
///
/// Remote datasets are fetched in full (blocking, no retry) and spooled to
/// a scratch file, since the NetCDF library reads through file handles.
pub async fn open_dataset(
    location: &DataLocation,
    store_config: &ObjectStoreConfig,
    variables: &SensorVariables,
) -> Result<DatasetHandle> {
    let described = location.describe();

    let (file, scratch) = match location {
        DataLocation::Local(path) => (open_netcdf(path, &described)?, None),
        DataLocation::ObjectStore { bucket, key, .. } => {
            let bytes = fetch_object(store_config, bucket, key, &described).await?;

            let dir = TempDir::new().map_err(|e| IngestError::FileRead {
                location: described.clone(),
                source: e,
            })?;
            let spool_path = dir.path().join("dataset.nc");
            let mut spool =
                std::fs::File::create(&spool_path).map_err(|e| IngestError::FileRead {
                    location: described.clone(),
                    source: e,
                })?;
            spool
                .write_all(&bytes)
                .map_err(|e| IngestError::FileRead {
                    location: described.clone(),
                    source: e,
                })?;
            drop(spool);

            (open_netcdf(&spool_path, &described)?, Some(dir))
        }
    };

    let handle = DatasetHandle {
        file,
        location: described.clone(),
        scratch,
    };

    // Fail before any data is read if the dataset cannot feed the pipeline.
    for name in variables.all() {
        if handle.file.variable(name).is_none() {
            // The handle drops here, releasing the scratch file.
            return Err(IngestError::MissingVariable {
                location: described,
                variable: name.to_string(),
            });
        }
    }

    info!(location = %described, "Opened sensor dataset");
    Ok(handle)
}

fn open_netcdf(path: &Path, location: &str) -> Result<netcdf::File> {
    netcdf::open(path).map_err(|e| IngestError::DatasetOpen {
        location: location.to_string(),
        source: e,
    })
}
