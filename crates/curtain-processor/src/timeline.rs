//! Time normalization and global sort.
//!
//! The sensor clock is hour-of-day and can wrap at midnight UTC mid-flight.
//! Rollover is corrected against the first sample, absolute time is anchored
//! to the flight's base date, and the flattened points are stably sorted by
//! time as one permutation across every parallel array.

use chrono::NaiveDate;
use tracing::debug;

use curtain_common::CurtainPoints;

use crate::projection::ProjectedSweep;

/// Drop rows whose clock sample is non-finite.
///
/// A missing time cannot be recovered, and letting it reach the integer
/// conversion would silently turn it into the base date's midnight. Runs
/// before rollover correction so the first sample compared against is a
/// real one.
fn drop_invalid_clock(sweep: ProjectedSweep) -> ProjectedSweep {
    if sweep.time_hours.iter().all(|h| h.is_finite()) {
        return sweep;
    }

    let n = sweep.len();
    let mut kept = ProjectedSweep::default();
    for i in 0..n {
        if sweep.time_hours[i].is_finite() {
            kept.time_hours.push(sweep.time_hours[i]);
            kept.lon.push(sweep.lon[i]);
            kept.lat.push(sweep.lat[i]);
            kept.alt.push(sweep.alt[i]);
            kept.value.push(sweep.value[i]);
        }
    }
    debug!(
        dropped = n - kept.len(),
        "Dropped samples with non-finite clock values"
    );
    kept
}

/// Add 24 hours to any sample whose hour value is below the first sample's,
/// turning a midnight wrap into a monotonically meaningful sequence.
pub fn unwrap_day_rollover(hours: &mut [f64]) {
    let Some(&first) = hours.first() else {
        return;
    };
    for h in hours.iter_mut() {
        if *h < first {
            *h += 24.0;
        }
    }
}

/// Convert corrected hours of day into Unix epoch seconds relative to the
/// flight's base date (midnight UTC).
pub fn to_epoch_seconds(hours: &[f64], base_date: NaiveDate) -> Vec<i64> {
    let base = base_date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0);
    hours
        .iter()
        .map(|h| base + (h * 3600.0).round() as i64)
        .collect()
}

/// Assign absolute time to a projected sweep and globally sort the result.
///
/// Rows with a non-finite clock sample are dropped here; the quality
/// filter cannot catch them later because time is an integer by then.
pub fn normalize_and_sort(sweep: ProjectedSweep, base_date: NaiveDate) -> CurtainPoints {
    let mut sweep = drop_invalid_clock(sweep);
    unwrap_day_rollover(&mut sweep.time_hours);
    let time = to_epoch_seconds(&sweep.time_hours, base_date);

    let mut points = CurtainPoints {
        time,
        lon: sweep.lon,
        lat: sweep.lat,
        alt: sweep.alt,
        value: sweep.value,
    };
    points.sort_by_time();

    debug!(
        rows = points.len(),
        window = ?points.time_window(),
        "Normalized and sorted point times"
    );
    points
}
