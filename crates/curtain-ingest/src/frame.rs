//! Cleaning: project the raw dataset down to the variables the pipeline
//! needs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use curtain_common::RawSensorFrame;

use crate::dataset::DatasetHandle;
use crate::error::{IngestError, Result};

/// Names of the dataset variables the pipeline consumes. Defaults match the
/// CRS (Cloud Radar System) file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorVariables {
    /// Per-pulse hour of day.
    pub time: String,
    /// 2D (pulse x gate) radar reflectivity.
    pub reflectivity: String,
    /// Per-gate slant range, meters.
    pub range: String,
    pub lat: String,
    pub lon: String,
    /// Aircraft altitude, meters.
    pub altitude: String,
    pub roll: String,
    pub pitch: String,
    pub heading: String,
}

impl Default for SensorVariables {
    fn default() -> Self {
        Self {
            time: "timed".to_string(),
            reflectivity: "zku".to_string(),
            range: "range".to_string(),
            lat: "lat".to_string(),
            lon: "lon".to_string(),
            altitude: "altitude".to_string(),
            roll: "roll".to_string(),
            pitch: "pitch".to_string(),
            heading: "head".to_string(),
        }
    }
}

impl SensorVariables {
    /// Every required variable name, for presence validation.
    pub fn all(&self) -> [&str; 9] {
        [
            &self.time,
            &self.reflectivity,
            &self.range,
            &self.lat,
            &self.lon,
            &self.altitude,
            &self.roll,
            &self.pitch,
            &self.heading,
        ]
    }
}

/// Extract a validated [`RawSensorFrame`] from an open dataset, reading only
/// the named variables and dropping everything else.
///
/// The reflectivity shape is taken from the variable's own dimensions; any
/// disagreement with the per-pulse or per-gate arrays is an error.
pub fn extract_frame(
    handle: &DatasetHandle,
    variables: &SensorVariables,
) -> Result<RawSensorFrame> {
    let file = handle.file();
    let location = handle.location();

    let reflectivity_var =
        file.variable(&variables.reflectivity)
            .ok_or_else(|| IngestError::MissingVariable {
                location: location.to_string(),
                variable: variables.reflectivity.clone(),
            })?;
    let dims = reflectivity_var.dimensions();
    let (pulses, gates) = match dims {
        [p, g] => (p.len(), g.len()),
        _ => {
            return Err(IngestError::Shape {
                location: location.to_string(),
                source: curtain_common::FrameError::PulseMismatch {
                    rows: dims.first().map(|d| d.len()).unwrap_or(0),
                    pulses: 0,
                },
            })
        }
    };

    let reflectivity: Vec<f32> = reflectivity_var
        .get_values(..)
        .map_err(|e| read_error(location, &variables.reflectivity, e))?;

    let time_hours = read_f64(handle, &variables.time)?;
    let lat = read_f64(handle, &variables.lat)?;
    let lon = read_f64(handle, &variables.lon)?;
    let alt = read_f64(handle, &variables.altitude)?;
    let roll = read_f64(handle, &variables.roll)?;
    let pitch = read_f64(handle, &variables.pitch)?;
    let heading = read_f64(handle, &variables.heading)?;
    let range = read_f32(handle, &variables.range)?;

    debug!(
        location = %location,
        pulses = pulses,
        gates = gates,
        "Extracted sensor frame"
    );

    RawSensorFrame::new(
        reflectivity,
        pulses,
        gates,
        time_hours,
        lat,
        lon,
        alt,
        roll,
        pitch,
        heading,
        range,
    )
    .map_err(|e| IngestError::Shape {
        location: location.to_string(),
        source: e,
    })
}

fn read_f64(handle: &DatasetHandle, name: &str) -> Result<Vec<f64>> {
    let var = lookup(handle, name)?;
    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| read_error(handle.location(), name, e))?;
    Ok(values)
}

fn read_f32(handle: &DatasetHandle, name: &str) -> Result<Vec<f32>> {
    let var = lookup(handle, name)?;
    let values: Vec<f32> = var
        .get_values(..)
        .map_err(|e| read_error(handle.location(), name, e))?;
    Ok(values)
}

fn lookup<'f>(handle: &'f DatasetHandle, name: &str) -> Result<netcdf::Variable<'f>> {
    handle
        .file()
        .variable(name)
        .ok_or_else(|| IngestError::MissingVariable {
            location: handle.location().to_string(),
            variable: name.to_string(),
        })
}

fn read_error(location: &str, variable: &str, source: netcdf::Error) -> IngestError {
    IngestError::VariableRead {
        location: location.to_string(),
        variable: variable.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{DataLocation, ObjectStoreConfig};
    use crate::open_dataset;

    /// Write a tiny CRS-shaped NetCDF file for round-trip testing.
    fn write_sample_dataset(path: &std::path::Path, pulses: usize, gates: usize) {
        let mut file = netcdf::create(path).expect("create netcdf");
        file.add_dimension("time", pulses).unwrap();
        file.add_dimension("range", gates).unwrap();

        let vars = SensorVariables::default();
        let mut v = file
            .add_variable::<f32>(&vars.reflectivity, &["time", "range"])
            .unwrap();
        let reflectivity: Vec<f32> = (0..pulses * gates).map(|i| i as f32).collect();
        v.put_values(&reflectivity, ..).unwrap();

        let mut v = file.add_variable::<f32>(&vars.range, &["range"]).unwrap();
        let range: Vec<f32> = (1..=gates).map(|g| (g * 100) as f32).collect();
        v.put_values(&range, ..).unwrap();

        for (name, base) in [
            (vars.time.as_str(), 17.5),
            (vars.lat.as_str(), 40.0),
            (vars.lon.as_str(), -100.0),
            (vars.altitude.as_str(), 9000.0),
            (vars.roll.as_str(), 0.0),
            (vars.pitch.as_str(), 0.0),
            (vars.heading.as_str(), 0.0),
        ] {
            let mut v = file.add_variable::<f64>(name, &["time"]).unwrap();
            let data: Vec<f64> = (0..pulses).map(|p| base + p as f64 * 1e-3).collect();
            v.put_values(&data, ..).unwrap();
        }
    }

    #[tokio::test]
    async fn test_extract_frame_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crs_20151110_sample.nc");
        write_sample_dataset(&path, 4, 3);

        let vars = SensorVariables::default();
        let location = DataLocation::Local(path);
        let handle = open_dataset(&location, &ObjectStoreConfig::default(), &vars)
            .await
            .unwrap();

        let frame = extract_frame(&handle, &vars).unwrap();
        assert_eq!(frame.pulses, 4);
        assert_eq!(frame.gates, 3);
        assert_eq!(frame.point_count(), 12);
        assert_eq!(frame.range, vec![100.0, 200.0, 300.0]);
        assert_eq!(frame.reflectivity[5], 5.0);

        handle.close().unwrap();
    }

    #[tokio::test]
    async fn test_missing_variable_is_rejected_at_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.nc");
        {
            let mut file = netcdf::create(&path).unwrap();
            file.add_dimension("time", 2).unwrap();
            let mut v = file.add_variable::<f64>("timed", &["time"]).unwrap();
            v.put_values(&[0.0, 1.0], ..).unwrap();
        }

        let location = DataLocation::Local(path);
        let err = open_dataset(
            &location,
            &ObjectStoreConfig::default(),
            &SensorVariables::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, IngestError::MissingVariable { .. }));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let location = DataLocation::Local("/nonexistent/flight.nc".into());
        let err = open_dataset(
            &location,
            &ObjectStoreConfig::default(),
            &SensorVariables::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, IngestError::DatasetOpen { .. }));
    }
}
