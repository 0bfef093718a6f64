//! Test data generation utilities.
//!
//! Small frame builders with known values, shared by the unit tests in
//! this crate and by the store/tiler/pipeline tests downstream.

use curtain_common::{CurtainPoints, RawSensorFrame};

/// A level-flight frame: zero attitude, fixed position, ranges of
/// 100, 200, ... meters and reflectivity `pulse * gates + gate`.
///
/// With zero attitude every point projects straight down, which makes
/// expected positions trivial to compute in tests.
pub fn level_flight_frame(pulses: usize, gates: usize) -> RawSensorFrame {
    let reflectivity: Vec<f32> = (0..pulses * gates).map(|i| i as f32).collect();
    let range: Vec<f32> = (1..=gates).map(|g| (g * 100) as f32).collect();

    RawSensorFrame::new(
        reflectivity,
        pulses,
        gates,
        (0..pulses).map(|p| 17.0 + p as f64 * 1e-3).collect(),
        vec![40.0; pulses],
        vec![-100.0; pulses],
        vec![9_000.0; pulses],
        vec![0.0; pulses],
        vec![0.0; pulses],
        vec![0.0; pulses],
        range,
    )
    .expect("test frame shapes are consistent")
}

/// Sorted points with linearly spaced times and values, for store and
/// tiler tests.
pub fn sequential_points(n: usize, start_time: i64) -> CurtainPoints {
    CurtainPoints {
        time: (0..n).map(|i| start_time + i as i64).collect(),
        lon: (0..n).map(|i| -100.0 + i as f64 * 1e-4).collect(),
        lat: (0..n).map(|i| 40.0 + i as f64 * 1e-4).collect(),
        alt: (0..n).map(|i| 1_000.0 + i as f64).collect(),
        value: (0..n).map(|i| i as f32 * 0.5).collect(),
    }
}
