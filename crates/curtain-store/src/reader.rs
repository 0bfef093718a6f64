//! Reader for an existing curtain store.

use std::path::Path;
use std::sync::Arc;

use zarrs::array::Array;
use zarrs::array_subset::ArraySubset;
use zarrs::group::Group;
use zarrs_filesystem::FilesystemStore;

use crate::error::{Result, StoreError};
use crate::metadata::StoreMetadata;
use crate::writer::ChunkEntry;

/// The de-interleaved location columns of a store.
#[derive(Debug, Default)]
pub struct LocationColumns {
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub alt: Vec<f64>,
}

/// Read access to a curtain store written by [`crate::CurtainStoreWriter`].
pub struct CurtainStoreReader {
    store: Arc<FilesystemStore>,
    metadata: StoreMetadata,
    epoch: i64,
    rows: u64,
}

impl CurtainStoreReader {
    /// Open the store rooted at `root` and parse its identifying metadata.
    pub fn open(root: &Path) -> Result<Self> {
        let store = Arc::new(FilesystemStore::new(root).map_err(StoreError::storage)?);

        let group = Group::open(store.clone(), "/").map_err(StoreError::storage)?;
        let (metadata, epoch) = StoreMetadata::from_attributes(group.attributes())?;

        let time_array = Array::open(store.clone(), "/time").map_err(StoreError::storage)?;
        let rows = time_array.shape().first().copied().unwrap_or(0);

        Ok(Self {
            store,
            metadata,
            epoch,
            rows,
        })
    }

    pub fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// The chunk index: (row_offset, start_time) per chunk, in row order.
    pub fn chunk_index(&self) -> Result<Vec<ChunkEntry>> {
        let data = self.read_elements::<i64>("/chunk_id")?;
        Ok(data
            .chunks_exact(2)
            .map(|pair| ChunkEntry {
                row_offset: pair[0] as u64,
                start_time: pair[1],
            })
            .collect())
    }

    /// Absolute times (epoch seconds) for every row.
    pub fn read_time(&self) -> Result<Vec<i64>> {
        let deltas = self.read_elements::<u32>("/time")?;
        Ok(deltas.iter().map(|&d| self.epoch + d as i64).collect())
    }

    /// Lon/lat/alt columns for every row.
    pub fn read_location(&self) -> Result<LocationColumns> {
        let interleaved = self.read_elements::<f64>("/location")?;
        let n = interleaved.len() / 3;
        let mut columns = LocationColumns {
            lon: Vec::with_capacity(n),
            lat: Vec::with_capacity(n),
            alt: Vec::with_capacity(n),
        };
        for row in interleaved.chunks_exact(3) {
            columns.lon.push(row[0]);
            columns.lat.push(row[1]);
            columns.alt.push(row[2]);
        }
        Ok(columns)
    }

    /// Values for every row of one persisted variable.
    pub fn read_value(&self, variable: &str) -> Result<Vec<f32>> {
        if !self.metadata.variables.iter().any(|v| v == variable) {
            return Err(StoreError::VariableNotFound(variable.to_string()));
        }
        self.read_elements::<f32>(&format!("/value/{variable}"))
    }

    /// Read an entire array as a flat element vector.
    fn read_elements<T: zarrs::array::ElementOwned>(&self, path: &str) -> Result<Vec<T>> {
        let array = Array::open(self.store.clone(), path).map_err(StoreError::storage)?;
        let shape = array.shape().to_vec();
        let subset = ArraySubset::new_with_start_shape(vec![0; shape.len()], shape)
            .map_err(StoreError::storage)?;
        array
            .retrieve_array_subset_elements::<T>(&subset)
            .map_err(StoreError::storage)
    }
}
