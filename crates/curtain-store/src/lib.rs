//! Append-only chunked columnar store for curtain points.
//!
//! Persists a filtered, time-sorted point set as a Zarr V3 directory store
//! with a fixed row-chunked layout:
//!
//! - `/chunk_id`: `[num_chunks, 2]` Int64 (row_offset, chunk start time)
//! - `/location`: `[N, 3]` Float64 (lon, lat, alt)
//! - `/time`: `[N]` UInt32 delta from the stored epoch
//! - `/value/<name>`: `[N]` Float32, one array per persisted variable
//!
//! Root group attributes carry campaign/collection identifiers, the
//! variable list, renderer hints, and the epoch (minimum time across all
//! rows).

pub mod config;
pub mod error;
pub mod metadata;
pub mod reader;
pub mod writer;

pub use config::{StoreConfig, ZarrCompression};
pub use error::{Result, StoreError};
pub use metadata::{RendererHint, StoreMetadata};
pub use reader::{CurtainStoreReader, LocationColumns};
pub use writer::{ChunkEntry, CurtainStoreWriter, StoreWriteResult};
