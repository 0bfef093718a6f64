//! Quality filtering of projected points.

use tracing::debug;

use curtain_common::CurtainPoints;

/// Drop physically invalid points: non-finite reflectivity or an altitude
/// at or below ground level.
///
/// Runs only after projection and sorting, so the mask is computed over the
/// complete point set and applied to every parallel array at once. An
/// altitude that is NaN fails the `> 0` test and is dropped with the rest.
pub fn filter_valid(points: &CurtainPoints) -> CurtainPoints {
    let mask: Vec<bool> = (0..points.len())
        .map(|i| points.value[i].is_finite() && points.alt[i] > 0.0)
        .collect();

    let kept = points.apply_mask(&mask);
    debug!(
        before = points.len(),
        after = kept.len(),
        dropped = points.len() - kept.len(),
        "Applied quality filter"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_nan_and_infinite_values() {
        let points = CurtainPoints {
            time: vec![1, 2, 3, 4],
            lon: vec![0.0; 4],
            lat: vec![0.0; 4],
            alt: vec![100.0; 4],
            value: vec![1.0, f32::NAN, f32::INFINITY, 2.0],
        };
        let kept = filter_valid(&points);
        assert_eq!(kept.time, vec![1, 4]);
        assert_eq!(kept.value, vec![1.0, 2.0]);
    }

    #[test]
    fn test_drops_non_positive_and_nan_altitude() {
        let points = CurtainPoints {
            time: vec![1, 2, 3, 4],
            lon: vec![0.0; 4],
            lat: vec![0.0; 4],
            alt: vec![100.0, 0.0, -50.0, f64::NAN],
            value: vec![1.0; 4],
        };
        let kept = filter_valid(&points);
        assert_eq!(kept.time, vec![1]);
    }

    #[test]
    fn test_all_valid_is_identity() {
        let points = CurtainPoints {
            time: vec![1, 2],
            lon: vec![10.0, 11.0],
            lat: vec![20.0, 21.0],
            alt: vec![100.0, 200.0],
            value: vec![1.0, 2.0],
        };
        let kept = filter_valid(&points);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.lon, points.lon);
    }
}
