//! End-to-end pipeline test over a small synthetic flight file.
//!
//! Builds a CRS-shaped NetCDF with known values, runs the full pipeline,
//! and checks the store contents and tile output point by point.

use std::path::Path;

use curtain_gen::{CurtainPipeline, PipelineConfig, PipelineError};
use curtain_store::CurtainStoreReader;

/// 2015-11-10 17:00:00 UTC.
const T0: i64 = 1_447_113_600 + 61_200;

/// Write a 2-pulse x 3-gate flight in level flight at (lon -100, lat 40),
/// nadir-pointing.
///
/// With zero attitude the beam points straight down, so each point keeps
/// the aircraft's position and its altitude is `aircraft_alt - range`.
/// Pulse 0 flies at 250 m, so its 300 m gate lands below ground (-50 m)
/// and is dropped; pulse 1 flies at 350 m and all its gates stay above
/// ground. Reflectivity at (pulse 0, gate 0) is NaN and is dropped too,
/// leaving 4 valid points of the original 6.
fn write_flight_file(path: &Path) {
    let mut file = netcdf::create(path).expect("create netcdf");
    file.add_dimension("time", 2).unwrap();
    file.add_dimension("range", 3).unwrap();

    let mut v = file
        .add_variable::<f32>("zku", &["time", "range"])
        .unwrap();
    v.put_values(&[f32::NAN, 1.0, 2.0, 3.0, 4.0, 5.0], ..)
        .unwrap();

    let mut v = file.add_variable::<f32>("range", &["range"]).unwrap();
    v.put_values(&[100.0, 200.0, 300.0], ..).unwrap();

    let per_pulse: [(&str, [f64; 2]); 7] = [
        ("timed", [17.0, 17.001]),
        ("lat", [40.0, 40.0]),
        ("lon", [-100.0, -100.0]),
        ("altitude", [250.0, 350.0]),
        ("roll", [0.0, 0.0]),
        ("pitch", [0.0, 0.0]),
        ("head", [0.0, 0.0]),
    ];
    for (name, data) in per_pulse {
        let mut v = file.add_variable::<f64>(name, &["time"]).unwrap();
        v.put_values(&data, ..).unwrap();
    }
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("olympex_crs_20151110_flight.nc");
    let output = dir.path().join("out");
    write_flight_file(&input);

    let pipeline = CurtainPipeline::new(PipelineConfig::default()).unwrap();
    let report = pipeline
        .run(input.to_str().unwrap(), &output)
        .await
        .expect("pipeline run failed");

    assert_eq!(report.points_extracted, 6);
    assert_eq!(report.points_kept, 4);
    assert_eq!(report.epoch, T0);
    assert_eq!(report.tiles_written, 1);

    // Store contents: the 4 surviving points in time order. 17.001 h is
    // 61203.6 s, rounded to T0 + 4.
    let reader = CurtainStoreReader::open(&report.store_path).unwrap();
    assert_eq!(reader.rows(), 4);
    assert_eq!(reader.metadata().campaign, "olympex");
    assert_eq!(reader.metadata().collection, "crs");
    assert_eq!(reader.metadata().variables, vec!["zku"]);

    assert_eq!(reader.read_time().unwrap(), vec![T0, T0 + 4, T0 + 4, T0 + 4]);
    assert_eq!(reader.read_value("zku").unwrap(), vec![1.0, 3.0, 4.0, 5.0]);

    let location = reader.read_location().unwrap();
    assert_eq!(location.lon, vec![-100.0; 4]);
    assert_eq!(location.lat, vec![40.0; 4]);
    assert_eq!(location.alt, vec![50.0, 250.0, 150.0, 50.0]);

    // Tile output: one tile holding all 4 points, with the padded
    // dataset bounding box.
    let tile_path = output.join("tiles").join("zku").join("tile_0.json");
    let tile: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(&tile_path).unwrap()).unwrap();

    assert_eq!(tile["variable"], "zku");
    assert_eq!(tile["point_count"], 4);
    assert_eq!(tile["time_window"][0], T0);
    assert_eq!(tile["time_window"][1], T0 + 4);

    let bbox = tile["bounding_box"].as_array().unwrap();
    assert!((bbox[0].as_f64().unwrap() - (-100.2)).abs() < 1e-9);
    assert!((bbox[1].as_f64().unwrap() - 39.8).abs() < 1e-9);
    assert!((bbox[2].as_f64().unwrap() - (-99.8)).abs() < 1e-9);
    assert!((bbox[3].as_f64().unwrap() - 40.2).abs() < 1e-9);
    assert_eq!(bbox[4].as_f64().unwrap(), 50.0);
    assert_eq!(bbox[5].as_f64().unwrap(), 250.0);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("olympex_crs_20151110_flight.nc");
    let output = dir.path().join("out");
    write_flight_file(&input);

    let pipeline = CurtainPipeline::new(PipelineConfig::default()).unwrap();
    let first = pipeline.run(input.to_str().unwrap(), &output).await.unwrap();
    let second = pipeline.run(input.to_str().unwrap(), &output).await.unwrap();

    assert_eq!(first.points_kept, second.points_kept);
    assert_eq!(first.epoch, second.epoch);
    assert_eq!(first.tiles_written, second.tiles_written);
}

#[tokio::test]
async fn test_input_without_flight_date_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flight.nc");
    let output = dir.path().join("out");
    write_flight_file(&input);

    let pipeline = CurtainPipeline::new(PipelineConfig::default()).unwrap();
    let err = pipeline
        .run(input.to_str().unwrap(), &output)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::MissingFlightDate(_)));
}

#[tokio::test]
async fn test_missing_input_fails_at_ingest() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out");

    let pipeline = CurtainPipeline::new(PipelineConfig::default()).unwrap();
    let err = pipeline
        .run("/nonexistent/crs_20151110.nc", &output)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(_)));
    // No partial output on a failed run.
    assert!(!output.exists());
}
