//! Raw sensor frame: one flight of range-gated radar returns plus the
//! aircraft navigation needed to project them.

use thiserror::Error;

/// Shape violations detected when assembling a frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(
        "reflectivity has {rows} rows but the pulse arrays have {pulses} samples"
    )]
    PulseMismatch { rows: usize, pulses: usize },

    #[error(
        "reflectivity has {cols} columns but the range array has {gates} gates"
    )]
    GateMismatch { cols: usize, gates: usize },

    #[error("per-pulse array '{name}' has {len} samples, expected {pulses}")]
    NavigationMismatch {
        name: &'static str,
        len: usize,
        pulses: usize,
    },
}

/// A two-dimensional (pulse x gate) reflectivity sweep with parallel
/// per-pulse navigation arrays and a per-gate slant-range array.
///
/// Attitude angles are in degrees as recorded by the sensor; altitude and
/// range are meters; time is fractional hours of day UTC.
#[derive(Debug, Clone)]
pub struct RawSensorFrame {
    /// Row-major reflectivity, `pulses * gates` values.
    pub reflectivity: Vec<f32>,
    pub pulses: usize,
    pub gates: usize,
    /// Per-pulse hour of day (may wrap past midnight mid-flight).
    pub time_hours: Vec<f64>,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub alt: Vec<f64>,
    pub roll: Vec<f64>,
    pub pitch: Vec<f64>,
    pub heading: Vec<f64>,
    /// Per-gate slant range from the aircraft, meters.
    pub range: Vec<f32>,
}

impl RawSensorFrame {
    /// Assemble a frame, validating that the 2D reflectivity shape agrees
    /// with every parallel array.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reflectivity: Vec<f32>,
        pulses: usize,
        gates: usize,
        time_hours: Vec<f64>,
        lat: Vec<f64>,
        lon: Vec<f64>,
        alt: Vec<f64>,
        roll: Vec<f64>,
        pitch: Vec<f64>,
        heading: Vec<f64>,
        range: Vec<f32>,
    ) -> Result<Self, FrameError> {
        if pulses * gates != reflectivity.len() {
            return Err(FrameError::PulseMismatch {
                rows: if gates == 0 { 0 } else { reflectivity.len() / gates },
                pulses,
            });
        }
        if range.len() != gates {
            return Err(FrameError::GateMismatch {
                cols: gates,
                gates: range.len(),
            });
        }
        for (name, len) in [
            ("time", time_hours.len()),
            ("lat", lat.len()),
            ("lon", lon.len()),
            ("alt", alt.len()),
            ("roll", roll.len()),
            ("pitch", pitch.len()),
            ("heading", heading.len()),
        ] {
            if len != pulses {
                return Err(FrameError::NavigationMismatch { name, len, pulses });
            }
        }

        Ok(Self {
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
        })
    }

    /// Number of (pulse, gate) pairs the frame will flatten into.
    pub fn point_count(&self) -> usize {
        self.pulses * self.gates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(n: usize) -> Vec<f64> {
        vec![0.0; n]
    }

    #[test]
    fn test_valid_frame() {
        let frame = RawSensorFrame::new(
            vec![0.0; 6],
            2,
            3,
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            vec![100.0, 200.0, 300.0],
        )
        .unwrap();
        assert_eq!(frame.point_count(), 6);
    }

    #[test]
    fn test_gate_mismatch() {
        let err = RawSensorFrame::new(
            vec![0.0; 6],
            2,
            3,
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            vec![100.0, 200.0],
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::GateMismatch { .. }));
    }

    #[test]
    fn test_navigation_mismatch() {
        let err = RawSensorFrame::new(
            vec![0.0; 6],
            2,
            3,
            nav(2),
            nav(3),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            nav(2),
            vec![100.0, 200.0, 300.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FrameError::NavigationMismatch { name: "lat", .. }
        ));
    }
}
