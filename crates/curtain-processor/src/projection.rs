//! Attitude-compensated beam projection.
//!
//! For every (pulse, gate) pair, converts the aircraft's position and
//! attitude at that pulse plus the gate's slant range into a
//! ground-projected 3D point. Uses a flat-earth meters-per-degree
//! conversion, valid only for ranges small relative to Earth's radius.

use curtain_common::RawSensorFrame;

use crate::config::ProjectionConfig;

/// Flattened projection output, one row per (pulse, gate) pair in pulse-major
/// order. Time is still the sensor's fractional hour of day; absolute time
/// is assigned by [`crate::timeline`].
#[derive(Debug, Clone, Default)]
pub struct ProjectedSweep {
    pub time_hours: Vec<f64>,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub alt: Vec<f64>,
    pub value: Vec<f32>,
}

impl ProjectedSweep {
    pub fn len(&self) -> usize {
        self.time_hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_hours.is_empty()
    }
}

/// Unit vector from the aircraft toward its beam target, from attitude
/// angles in radians.
///
/// Level flight (roll = pitch = heading = 0) yields (0, 0, -1): straight
/// down.
pub fn down_vector(roll: f64, pitch: f64, heading: f64) -> (f64, f64, f64) {
    let x = roll.sin() * heading.cos() + roll.cos() * pitch.sin() * heading.sin();
    let y = -roll.sin() * heading.sin() + roll.cos() * pitch.sin() * heading.cos();
    let z = -roll.cos() * pitch.cos();
    (x, y, z)
}

/// Project every (pulse, gate) pair of the frame into a flattened sweep.
///
/// Per-pulse attitude and position are broadcast across all gates of the
/// pulse, and the per-gate range across all pulses, reshaping the 2D sensor
/// grid into flat parallel arrays of length `pulses * gates`.
///
/// NaN navigation values propagate as NaN positions; nothing is dropped
/// here so that the quality filter can apply one mask over the complete
/// point set.
pub fn project_frame(frame: &RawSensorFrame, config: &ProjectionConfig) -> ProjectedSweep {
    let n = frame.point_count();
    let k = config.meters_per_degree;

    let mut sweep = ProjectedSweep {
        time_hours: Vec::with_capacity(n),
        lon: Vec::with_capacity(n),
        lat: Vec::with_capacity(n),
        alt: Vec::with_capacity(n),
        value: Vec::with_capacity(n),
    };

    for p in 0..frame.pulses {
        // Sensor attitude is recorded in degrees.
        let (x, y, z) = down_vector(
            frame.roll[p].to_radians(),
            frame.pitch[p].to_radians(),
            frame.heading[p].to_radians(),
        );
        let lat = frame.lat[p];
        let lon = frame.lon[p];
        let alt = frame.alt[p];
        let cos_lat = lat.to_radians().cos();

        for g in 0..frame.gates {
            let r = frame.range[g] as f64;

            let lon_offset = x * r / (k * cos_lat);
            let lat_offset = y * r / k;
            let alt_offset = z * r;

            sweep.time_hours.push(frame.time_hours[p]);
            sweep.lon.push(lon - lon_offset);
            sweep.lat.push(lat - lat_offset);
            sweep.alt.push(alt + alt_offset);
            sweep.value.push(frame.reflectivity[p * frame.gates + g]);
        }
    }

    sweep
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::level_flight_frame;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_down_vector_nadir() {
        let (x, y, z) = down_vector(0.0, 0.0, 0.0);
        assert!(x.abs() < EPS);
        assert!(y.abs() < EPS);
        assert!((z + 1.0).abs() < EPS);
    }

    #[test]
    fn test_down_vector_is_unit_length() {
        for (roll, pitch, head) in [
            (0.1, -0.05, 1.2),
            (-0.4, 0.3, 4.0),
            (0.0, 0.5, 0.0),
        ] {
            let (x, y, z) = down_vector(roll, pitch, head);
            let norm = (x * x + y * y + z * z).sqrt();
            assert!((norm - 1.0).abs() < 1e-9, "norm {} for ({}, {}, {})", norm, roll, pitch, head);
        }
    }

    #[test]
    fn test_flatten_count_is_pulses_times_gates() {
        let frame = level_flight_frame(5, 7);
        let sweep = project_frame(&frame, &ProjectionConfig::default());
        assert_eq!(sweep.len(), 35);
    }

    #[test]
    fn test_level_flight_projects_straight_down() {
        let frame = level_flight_frame(2, 3);
        let sweep = project_frame(&frame, &ProjectionConfig::default());

        for (i, &alt) in sweep.alt.iter().enumerate() {
            let p = i / 3;
            let g = i % 3;
            // Straight down: altitude drops by exactly the slant range.
            let expected = frame.alt[p] - frame.range[g] as f64;
            assert!((alt - expected).abs() < 1e-9);
            assert!((sweep.lon[i] - frame.lon[p]).abs() < EPS);
            assert!((sweep.lat[i] - frame.lat[p]).abs() < EPS);
        }
    }

    #[test]
    fn test_nan_navigation_propagates() {
        let mut frame = level_flight_frame(2, 2);
        frame.lat[1] = f64::NAN;
        let sweep = project_frame(&frame, &ProjectionConfig::default());
        assert_eq!(sweep.len(), 4);
        assert!(sweep.lat[2].is_nan());
        assert!(sweep.lat[3].is_nan());
        // The other pulse is untouched.
        assert!(sweep.lat[0].is_finite());
    }

    #[test]
    fn test_offsets_match_formula() {
        let mut frame = level_flight_frame(1, 1);
        frame.roll[0] = 10.0;
        frame.pitch[0] = -5.0;
        frame.heading[0] = 90.0;
        let config = ProjectionConfig::default();
        let sweep = project_frame(&frame, &config);

        let (x, y, z) = down_vector(
            10.0f64.to_radians(),
            (-5.0f64).to_radians(),
            90.0f64.to_radians(),
        );
        let r = frame.range[0] as f64;
        let k = config.meters_per_degree;
        let expected_lon = frame.lon[0] - x * r / (k * frame.lat[0].to_radians().cos());
        let expected_lat = frame.lat[0] - y * r / k;
        let expected_alt = frame.alt[0] + z * r;

        assert!((sweep.lon[0] - expected_lon).abs() < EPS);
        assert!((sweep.lat[0] - expected_lat).abs() < EPS);
        assert!((sweep.alt[0] - expected_alt).abs() < 1e-9);
    }
}
