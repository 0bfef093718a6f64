//! Curtain generation service.
//!
//! Reads a raw airborne radar flight file (local or object store), projects
//! it into a geo-referenced point curtain, and writes a chunked columnar
//! store plus bounded JSON tiles for visualization.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use curtain_gen::{CurtainPipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "curtain-gen")]
#[command(about = "Curtain store and tile generator for airborne radar data")]
struct Args {
    /// Input dataset: a local path or an object-store URL
    /// (e.g. s3://bucket/flights/crs_20151110.nc)
    input: String,

    /// Output directory for the store and tiles
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Configuration file path (YAML); environment variables apply when
    /// omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting curtain generator");

    let config = match &args.config {
        Some(path) => PipelineConfig::from_yaml(path)?,
        None => PipelineConfig::from_env(),
    };
    info!(
        campaign = %config.campaign,
        collection = %config.collection,
        "Loaded configuration"
    );

    let pipeline = CurtainPipeline::new(config)?;
    let report = pipeline.run(&args.input, &args.output).await?;

    info!(
        points_extracted = report.points_extracted,
        points_kept = report.points_kept,
        epoch = report.epoch,
        tiles = report.tiles_written,
        store = %report.store_path.display(),
        "Curtain generation finished"
    );

    Ok(())
}
