//! Tile file output.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use curtain_common::BoundingBox3;
use curtain_store::{CurtainStoreReader, LocationColumns};

use crate::config::TilerConfig;
use crate::error::{Result, TileError};
use crate::tiles::{plan_tiles, TileSpan};

/// Point columns carried by one tile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilePoints {
    pub time: Vec<i64>,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub alt: Vec<f64>,
    pub value: Vec<f32>,
}

/// One tile file: a bounded slice of the curtain for one variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Variable this tile belongs to.
    pub variable: String,
    /// Zero-based index within the variable's tile sequence.
    pub tile_index: usize,
    /// Half-open covered time window `[start, end)` in epoch seconds; the
    /// last tile's end is the dataset's maximum time.
    pub time_window: [i64; 2],
    /// Dataset-wide padded bounding box, identical across all tiles:
    /// `[min_lon, min_lat, max_lon, max_lat, min_alt, max_alt]`.
    pub bounding_box: [f64; 6],
    /// Number of points in this tile.
    pub point_count: usize,
    /// The tile's point columns.
    pub points: TilePoints,
}

/// Result of a tiling run.
#[derive(Debug)]
pub struct TileWriteResult {
    /// Total tile files written across all variables.
    pub tiles_written: usize,
    /// The shared padded bounding box.
    pub bounding_box: BoundingBox3,
}

/// Writes per-variable tile files from an open curtain store.
pub struct TileWriter {
    config: TilerConfig,
}

impl TileWriter {
    pub fn new(config: TilerConfig) -> Self {
        Self { config }
    }

    /// Tile every variable in the store into `root/<variable>/tile_<i>.json`.
    ///
    /// Existing tile directories for the store's variables are replaced.
    pub fn write(&self, root: &Path, reader: &CurtainStoreReader) -> Result<TileWriteResult> {
        self.config.validate()?;

        let time = reader.read_time()?;
        let location = reader.read_location()?;
        let chunks = reader.chunk_index()?;

        let max_time = time.iter().copied().max().unwrap_or(0);
        let spans = plan_tiles(
            &chunks,
            reader.rows(),
            max_time,
            self.config.max_points_per_tile,
        );

        let bbox = BoundingBox3::from_points(&location.lon, &location.lat, &location.alt)
            .padded(self.config.bbox_padding_deg);

        let mut tiles_written = 0;
        for variable in &reader.metadata().variables {
            let value = reader.read_value(variable)?;

            let variable_dir = root.join(variable);
            if variable_dir.exists() {
                std::fs::remove_dir_all(&variable_dir).map_err(|source| TileError::Directory {
                    path: variable_dir.display().to_string(),
                    source,
                })?;
            }
            std::fs::create_dir_all(&variable_dir).map_err(|source| TileError::Directory {
                path: variable_dir.display().to_string(),
                source,
            })?;

            for span in &spans {
                let tile = build_tile(variable, span, &bbox, &time, &location, &value);
                let path = variable_dir.join(format!("tile_{}.json", span.index));
                let file = std::fs::File::create(&path).map_err(|source| TileError::Directory {
                    path: path.display().to_string(),
                    source,
                })?;
                serde_json::to_writer(std::io::BufWriter::new(file), &tile)?;

                debug!(
                    variable,
                    tile_index = span.index,
                    rows = span.rows(),
                    window = ?span.window,
                    "Wrote tile"
                );
                tiles_written += 1;
            }
        }

        info!(
            tiles_written,
            variables = reader.metadata().variables.len(),
            bbox = ?bbox.to_array(),
            path = %root.display(),
            "Wrote curtain tiles"
        );

        Ok(TileWriteResult {
            tiles_written,
            bounding_box: bbox,
        })
    }
}

fn build_tile(
    variable: &str,
    span: &TileSpan,
    bbox: &BoundingBox3,
    time: &[i64],
    location: &LocationColumns,
    value: &[f32],
) -> Tile {
    let range = span.start_row as usize..span.end_row as usize;
    let points = TilePoints {
        time: time[range.clone()].to_vec(),
        lon: location.lon[range.clone()].to_vec(),
        lat: location.lat[range.clone()].to_vec(),
        alt: location.alt[range.clone()].to_vec(),
        value: value[range.clone()].to_vec(),
    };

    Tile {
        variable: variable.to_string(),
        tile_index: span.index,
        time_window: span.window,
        bounding_box: bbox.to_array(),
        point_count: points.time.len(),
        points,
    }
}
