//! Flattened, geo-referenced curtain points as parallel columns.

/// The flattened point set produced by projection, kept as parallel arrays
/// so it can be written straight into the columnar store.
///
/// Every operation that reorders or drops rows must be applied to all five
/// columns through the same permutation or mask; the methods here are the
/// only mutation paths.
#[derive(Debug, Clone, Default)]
pub struct CurtainPoints {
    /// Absolute time, Unix epoch seconds.
    pub time: Vec<i64>,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    pub alt: Vec<f64>,
    pub value: Vec<f32>,
}

impl CurtainPoints {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            time: Vec::with_capacity(n),
            lon: Vec::with_capacity(n),
            lat: Vec::with_capacity(n),
            alt: Vec::with_capacity(n),
            value: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Minimum and maximum time across all rows, if any.
    pub fn time_window(&self) -> Option<(i64, i64)> {
        let min = *self.time.iter().min()?;
        let max = *self.time.iter().max()?;
        Some((min, max))
    }

    /// Stable sort by ascending time, applied as one permutation across all
    /// columns so row correspondence is preserved.
    pub fn sort_by_time(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.time[i]);

        self.time = order.iter().map(|&i| self.time[i]).collect();
        self.lon = order.iter().map(|&i| self.lon[i]).collect();
        self.lat = order.iter().map(|&i| self.lat[i]).collect();
        self.alt = order.iter().map(|&i| self.alt[i]).collect();
        self.value = order.iter().map(|&i| self.value[i]).collect();
    }

    /// Keep only the rows selected by `mask` (one flag per row), applied to
    /// every column.
    pub fn apply_mask(&self, mask: &[bool]) -> Self {
        debug_assert_eq!(mask.len(), self.len());
        let kept = mask.iter().filter(|&&m| m).count();
        let mut out = Self::with_capacity(kept);
        for (i, &keep) in mask.iter().enumerate() {
            if keep {
                out.time.push(self.time[i]);
                out.lon.push(self.lon[i]);
                out.lat.push(self.lat[i]);
                out.alt.push(self.alt[i]);
                out.value.push(self.value[i]);
            }
        }
        out
    }

    /// True if rows are in non-decreasing time order.
    pub fn is_sorted_by_time(&self) -> bool {
        self.time.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CurtainPoints {
        CurtainPoints {
            time: vec![30, 10, 20],
            lon: vec![3.0, 1.0, 2.0],
            lat: vec![-3.0, -1.0, -2.0],
            alt: vec![300.0, 100.0, 200.0],
            value: vec![3.5, 1.5, 2.5],
        }
    }

    #[test]
    fn test_sort_permutes_all_columns() {
        let mut points = sample();
        points.sort_by_time();
        assert_eq!(points.time, vec![10, 20, 30]);
        assert_eq!(points.lon, vec![1.0, 2.0, 3.0]);
        assert_eq!(points.lat, vec![-1.0, -2.0, -3.0]);
        assert_eq!(points.alt, vec![100.0, 200.0, 300.0]);
        assert_eq!(points.value, vec![1.5, 2.5, 3.5]);
        assert!(points.is_sorted_by_time());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut points = CurtainPoints {
            time: vec![5, 5, 5],
            lon: vec![1.0, 2.0, 3.0],
            lat: vec![0.0; 3],
            alt: vec![0.0; 3],
            value: vec![0.0; 3],
        };
        points.sort_by_time();
        assert_eq!(points.lon, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_apply_mask() {
        let points = sample();
        let masked = points.apply_mask(&[true, false, true]);
        assert_eq!(masked.len(), 2);
        assert_eq!(masked.time, vec![30, 20]);
        assert_eq!(masked.value, vec![3.5, 2.5]);
    }

    #[test]
    fn test_time_window() {
        assert_eq!(sample().time_window(), Some((10, 30)));
        assert_eq!(CurtainPoints::default().time_window(), None);
    }
}
