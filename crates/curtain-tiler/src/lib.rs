//! Tiling of a curtain store into bounded point-count tiles.
//!
//! Splits the store's row space into contiguous tiles of at most a
//! configured number of points, aligned to store chunk boundaries, and
//! writes one JSON tile file per (variable, tile index). Tile time windows
//! partition the dataset's time range; the bounding box is computed once
//! over the whole dataset and padded so every tile shares the same extent.

pub mod config;
pub mod error;
pub mod tiles;
pub mod writer;

pub use config::TilerConfig;
pub use error::{Result, TileError};
pub use tiles::{plan_tiles, TileSpan};
pub use writer::{Tile, TilePoints, TileWriteResult, TileWriter};
