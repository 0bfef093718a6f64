//! The sequential curtain generation pipeline.
//!
//! One run takes a raw flight dataset through ingest, cleaning, projection,
//! time normalization, filtering, persistence, and tiling, in that order.
//! Stages are strictly sequential with no checkpointing; a failed run is
//! restarted from the beginning. The dataset handle opened during ingest is
//! closed on every exit path before the run returns.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use curtain_common::{BoundingBox3, Stage};
use curtain_ingest::{
    extract_frame, flight_date_from_name, open_dataset, DataLocation, IngestError,
};
use curtain_processor::{filter_valid, normalize_and_sort, project_frame};
use curtain_store::{
    CurtainStoreReader, CurtainStoreWriter, RendererHint, StoreError, StoreMetadata,
};
use curtain_tiler::{TileError, TileWriter};

use crate::config::PipelineConfig;

/// Errors from one pipeline run, attributed to the stage that raised them.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No flight date (YYYYMMDD) in input name: {0}")]
    MissingFlightDate(String),

    #[error("Ingest failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("Output directory error at {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store write failed: {0}")]
    Store(#[from] StoreError),

    #[error("Tiling failed: {0}")]
    Tile(#[from] TileError),
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Raw points extracted from the dataset (pulses x gates).
    pub points_extracted: usize,
    /// Points surviving the quality filter and persisted.
    pub points_kept: usize,
    /// Epoch the store's time axis is encoded against.
    pub epoch: i64,
    /// Store directory.
    pub store_path: PathBuf,
    /// Tile files written.
    pub tiles_written: usize,
    /// Dataset-wide padded bounding box shared by all tiles.
    pub bounding_box: BoundingBox3,
}

/// Runs the curtain generation stages over one input dataset.
pub struct CurtainPipeline {
    config: PipelineConfig,
}

impl CurtainPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    /// Run the full pipeline: read `input` (local path or object-store URL)
    /// and write the store and tiles under `output_dir`.
    pub async fn run(&self, input: &str, output_dir: &Path) -> Result<PipelineReport, PipelineError> {
        let result = self.run_inner(input, output_dir).await;
        match &result {
            Ok(report) => info!(
                stage = %Stage::Done,
                points = report.points_kept,
                tiles = report.tiles_written,
                "Pipeline run complete"
            ),
            Err(e) => error!(stage = %Stage::Failed, error = %e, "Pipeline run failed"),
        }
        result
    }

    async fn run_inner(
        &self,
        input: &str,
        output_dir: &Path,
    ) -> Result<PipelineReport, PipelineError> {
        let location: DataLocation = input.parse()?;
        let base_date = flight_date_from_name(input)
            .ok_or_else(|| PipelineError::MissingFlightDate(input.to_string()))?;

        info!(stage = %Stage::Ingesting, input, date = %base_date, "Opening dataset");
        let handle = open_dataset(&location, &self.config.object_store, &self.config.variables)
            .await?;

        info!(stage = %Stage::Cleaning, "Extracting sensor frame");
        // The handle must be released whether or not extraction succeeds;
        // an extraction error takes precedence over a close error.
        let frame_result = extract_frame(&handle, &self.config.variables);
        let close_result = handle.close();
        let frame = frame_result?;
        close_result?;
        let points_extracted = frame.point_count();

        info!(
            stage = %Stage::Projecting,
            pulses = frame.pulses,
            gates = frame.gates,
            "Projecting beam geometry"
        );
        let sweep = project_frame(&frame, &self.config.projection);

        info!(stage = %Stage::Sorting, "Normalizing and sorting times");
        let points = normalize_and_sort(sweep, base_date);

        info!(stage = %Stage::Filtering, "Applying quality filter");
        let points = filter_valid(&points);

        std::fs::create_dir_all(output_dir).map_err(|source| PipelineError::Output {
            path: output_dir.display().to_string(),
            source,
        })?;
        let store_path = output_dir.join(self.config.store_name());

        info!(stage = %Stage::Persisting, path = %store_path.display(), "Writing store");
        let metadata = StoreMetadata {
            campaign: self.config.campaign.clone(),
            collection: self.config.collection.clone(),
            variables: vec![self.config.variables.reflectivity.clone()],
            renderers: vec![RendererHint::for_variable(
                self.config.variables.reflectivity.clone(),
            )],
        };
        let write_result = CurtainStoreWriter::new(self.config.store.clone()).write(
            &store_path,
            &points,
            &metadata,
        )?;

        info!(stage = %Stage::Tiling, "Writing tiles");
        let reader = CurtainStoreReader::open(&store_path)?;
        let tiles_path = output_dir.join("tiles");
        let tile_result =
            TileWriter::new(self.config.tiler.clone()).write(&tiles_path, &reader)?;

        Ok(PipelineReport {
            points_extracted,
            points_kept: points.len(),
            epoch: write_result.epoch,
            store_path,
            tiles_written: tile_result.tiles_written,
            bounding_box: tile_result.bounding_box,
        })
    }
}
