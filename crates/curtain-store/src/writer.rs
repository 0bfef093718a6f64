//! Zarr V3 writer for the chunked columnar curtain store.
//!
//! Produces a directory store with a fixed hierarchy: a root group whose
//! attributes identify the dataset, a `/chunk_id` index, the shared
//! `/location` and `/time` arrays, and one `/value/<name>` array for the
//! persisted variable.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use walkdir::WalkDir;
use zarrs::array::codec::bytes_to_bytes::blosc::{
    BloscCodec, BloscCompressionLevel, BloscCompressor, BloscShuffleMode,
};
use zarrs::array::{ArrayBuilder, DataType, FillValue};
use zarrs::array_subset::ArraySubset;
use zarrs::group::GroupBuilder;
use zarrs_filesystem::FilesystemStore;

use curtain_common::CurtainPoints;

use crate::config::{StoreConfig, ZarrCompression};
use crate::error::{Result, StoreError};
use crate::metadata::StoreMetadata;

/// One entry in the chunk index: where a row chunk starts and the absolute
/// time of its first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Row offset of the chunk's first row.
    pub row_offset: u64,
    /// Absolute time (epoch seconds) of the chunk's first row.
    pub start_time: i64,
}

/// Result of writing a curtain store.
#[derive(Debug)]
pub struct StoreWriteResult {
    /// Rows persisted.
    pub rows: u64,
    /// Epoch (minimum time) the time array is encoded against.
    pub epoch: i64,
    /// Chunk index as written.
    pub chunks: Vec<ChunkEntry>,
    /// Total bytes on disk under the store root.
    pub bytes_written: u64,
}

/// Build the chunk index for a time-sorted time column.
pub fn chunk_entries(time: &[i64], chunk_size: usize) -> Vec<ChunkEntry> {
    (0..time.len())
        .step_by(chunk_size.max(1))
        .map(|offset| ChunkEntry {
            row_offset: offset as u64,
            start_time: time[offset],
        })
        .collect()
}

/// Writer for creating a curtain store from a filtered, time-sorted point
/// set.
pub struct CurtainStoreWriter {
    config: StoreConfig,
}

impl CurtainStoreWriter {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Write `points` to a new store at `root`, replacing any store already
    /// there.
    ///
    /// The value column is persisted under the single name listed in
    /// `metadata.variables`. Points are expected to be time-sorted; the
    /// chunk index records the first-row time of each chunk.
    pub fn write(
        &self,
        root: &Path,
        points: &CurtainPoints,
        metadata: &StoreMetadata,
    ) -> Result<StoreWriteResult> {
        self.config.validate()?;
        let variable = match metadata.variables.as_slice() {
            [name] => name.as_str(),
            other => {
                return Err(StoreError::Config(format!(
                    "exactly one variable per store write, got {}",
                    other.len()
                )))
            }
        };

        let n = points.len();
        let epoch = points.time.iter().copied().min().unwrap_or(0);

        if root.exists() {
            std::fs::remove_dir_all(root).map_err(|source| StoreError::Directory {
                path: root.display().to_string(),
                source,
            })?;
        }
        std::fs::create_dir_all(root).map_err(|source| StoreError::Directory {
            path: root.display().to_string(),
            source,
        })?;

        let store = Arc::new(FilesystemStore::new(root).map_err(StoreError::storage)?);

        // Root group carries the dataset identity and the epoch.
        let attrs = metadata.to_attributes(epoch)?;
        let mut group_builder = GroupBuilder::new();
        group_builder.attributes(attrs);
        let group = group_builder
            .build(store.clone(), "/")
            .map_err(StoreError::storage)?;
        group.store_metadata().map_err(StoreError::storage)?;

        let value_group = GroupBuilder::new()
            .build(store.clone(), "/value")
            .map_err(StoreError::storage)?;
        value_group.store_metadata().map_err(StoreError::storage)?;

        // Chunk index: [num_chunks, 2] of (row_offset, start_time).
        let chunks = chunk_entries(&points.time, self.config.chunk_size);
        let chunk_data: Vec<i64> = chunks
            .iter()
            .flat_map(|c| [c.row_offset as i64, c.start_time])
            .collect();
        self.write_array(
            &store,
            "/chunk_id",
            vec![chunks.len() as u64, 2],
            vec![chunks.len().max(1) as u64, 2],
            DataType::Int64,
            FillValue::from(0i64),
            &chunk_data,
        )?;

        // Location: [N, 3] of (lon, lat, alt).
        let location: Vec<f64> = (0..n)
            .flat_map(|i| [points.lon[i], points.lat[i], points.alt[i]])
            .collect();
        self.write_array(
            &store,
            "/location",
            vec![n as u64, 3],
            vec![self.config.chunk_size as u64, 3],
            DataType::Float64,
            FillValue::from(f64::NAN),
            &location,
        )?;

        // Time: [N] of seconds since the epoch attribute.
        let deltas: Vec<u32> = points.time.iter().map(|t| (t - epoch) as u32).collect();
        self.write_array(
            &store,
            "/time",
            vec![n as u64],
            vec![self.config.chunk_size as u64],
            DataType::UInt32,
            FillValue::from(0u32),
            &deltas,
        )?;

        // Value: [N] Float32 under the variable's name.
        self.write_array(
            &store,
            &format!("/value/{variable}"),
            vec![n as u64],
            vec![self.config.chunk_size as u64],
            DataType::Float32,
            FillValue::from(f32::NAN),
            &points.value,
        )?;

        let bytes_written = directory_size(root);
        info!(
            rows = n,
            chunks = chunks.len(),
            epoch,
            bytes_written,
            path = %root.display(),
            "Wrote curtain store"
        );

        Ok(StoreWriteResult {
            rows: n as u64,
            epoch,
            chunks,
            bytes_written,
        })
    }

    /// Build one Zarr array and store its metadata and contents.
    fn write_array<T: zarrs::array::Element + Copy>(
        &self,
        store: &Arc<FilesystemStore>,
        path: &str,
        shape: Vec<u64>,
        chunk_shape: Vec<u64>,
        data_type: DataType,
        fill_value: FillValue,
        data: &[T],
    ) -> Result<()> {
        let chunk_grid: zarrs::array::ChunkGrid = chunk_shape
            .try_into()
            .map_err(|e| StoreError::Config(format!("{e:?}")))?;

        let mut builder = ArrayBuilder::new(shape.clone(), data_type, chunk_grid, fill_value);
        if self.config.compression != ZarrCompression::None {
            let codec = self.compression_codec(std::mem::size_of::<T>())?;
            builder.bytes_to_bytes_codecs(vec![codec]);
        }
        let array = builder
            .build(store.clone(), path)
            .map_err(StoreError::storage)?;

        array.store_metadata().map_err(StoreError::storage)?;

        if !data.is_empty() {
            let subset = ArraySubset::new_with_start_shape(vec![0; shape.len()], shape)
                .map_err(StoreError::storage)?;
            array
                .store_array_subset_elements(&subset, data)
                .map_err(StoreError::storage)?;
        }
        Ok(())
    }

    /// Create the compression codec based on configuration.
    fn compression_codec(
        &self,
        typesize: usize,
    ) -> Result<Arc<dyn zarrs::array::codec::BytesToBytesCodecTraits>> {
        let level = BloscCompressionLevel::try_from(self.config.compression_level)
            .map_err(|_| StoreError::Config("Invalid compression level".to_string()))?;

        let shuffle = if self.config.shuffle {
            BloscShuffleMode::Shuffle
        } else {
            BloscShuffleMode::NoShuffle
        };

        // typesize is required when shuffle is enabled
        let typesize = self.config.shuffle.then_some(typesize);

        let compressor = match self.config.compression {
            ZarrCompression::None => {
                return Err(StoreError::Config(
                    "No compression configured".to_string(),
                ))
            }
            ZarrCompression::BloscLz4 => BloscCompressor::LZ4,
            ZarrCompression::BloscZstd => BloscCompressor::Zstd,
        };

        let codec = BloscCodec::new(compressor, level, None, shuffle, typesize)
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Arc::new(codec))
    }
}

/// Sum of file sizes under a directory.
fn directory_size(root: &Path) -> u64 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_entries_partial_last_chunk() {
        let time: Vec<i64> = (100..110).collect();
        let chunks = chunk_entries(&time, 4);
        assert_eq!(
            chunks,
            vec![
                ChunkEntry {
                    row_offset: 0,
                    start_time: 100
                },
                ChunkEntry {
                    row_offset: 4,
                    start_time: 104
                },
                ChunkEntry {
                    row_offset: 8,
                    start_time: 108
                },
            ]
        );
    }

    #[test]
    fn test_chunk_entries_empty() {
        assert!(chunk_entries(&[], 4).is_empty());
    }

    #[test]
    fn test_chunk_entries_single_chunk() {
        let time = vec![5, 6, 7];
        let chunks = chunk_entries(&time, 100);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start_time, 5);
    }

    #[test]
    fn test_write_requires_single_variable() {
        let writer = CurtainStoreWriter::new(StoreConfig::default());
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let metadata = StoreMetadata::default();
        let result = writer.write(
            &temp_dir.path().join("empty.zarr"),
            &CurtainPoints::default(),
            &metadata,
        );
        assert!(result.is_err());
    }
}
