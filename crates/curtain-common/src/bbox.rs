//! 3D bounding box for geo-referenced point sets.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounds over longitude/latitude (degrees) and altitude
/// (meters).
///
/// Accumulation ignores non-finite coordinates, so a box built over a point
/// set that still carries NaN navigation values reflects only the usable
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
    pub min_alt: f64,
    pub max_alt: f64,
}

impl BoundingBox3 {
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        min_alt: f64,
        max_alt: f64,
    ) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
            min_alt,
            max_alt,
        }
    }

    /// An empty box that any finite point will tighten.
    pub fn empty() -> Self {
        Self {
            min_lon: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_alt: f64::INFINITY,
            max_alt: f64::NEG_INFINITY,
        }
    }

    /// True if no finite point has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// Extend the box with a point; non-finite components are skipped.
    pub fn extend(&mut self, lon: f64, lat: f64, alt: f64) {
        if lon.is_finite() && lat.is_finite() {
            self.min_lon = self.min_lon.min(lon);
            self.max_lon = self.max_lon.max(lon);
            self.min_lat = self.min_lat.min(lat);
            self.max_lat = self.max_lat.max(lat);
        }
        if alt.is_finite() {
            self.min_alt = self.min_alt.min(alt);
            self.max_alt = self.max_alt.max(alt);
        }
    }

    /// Build a box over parallel coordinate arrays.
    pub fn from_points(lon: &[f64], lat: &[f64], alt: &[f64]) -> Self {
        let mut bbox = Self::empty();
        for i in 0..lon.len().min(lat.len()).min(alt.len()) {
            bbox.extend(lon[i], lat[i], alt[i]);
        }
        bbox
    }

    /// Pad the horizontal extent by `margin_deg` degrees on every side.
    /// Altitude bounds are left exact.
    pub fn padded(&self, margin_deg: f64) -> Self {
        Self {
            min_lon: self.min_lon - margin_deg,
            min_lat: self.min_lat - margin_deg,
            max_lon: self.max_lon + margin_deg,
            max_lat: self.max_lat + margin_deg,
            min_alt: self.min_alt,
            max_alt: self.max_alt,
        }
    }

    /// Flatten to the `[lonMin, latMin, lonMax, latMax, altMin, altMax]`
    /// layout used in tile headers.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min_lon,
            self.min_lat,
            self.max_lon,
            self.max_lat,
            self.min_alt,
            self.max_alt,
        ]
    }
}
