//! Configuration for the beam projection.

use serde::{Deserialize, Serialize};

/// Parameters of the flat-earth beam projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Meters per degree of arc used to convert horizontal beam offsets to
    /// longitude/latitude deltas. A fixed small-range approximation; the
    /// projection is not valid for ranges that are a significant fraction
    /// of Earth's radius.
    pub meters_per_degree: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            meters_per_degree: 111_000.0,
        }
    }
}

impl ProjectionConfig {
    /// Load overrides from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(val) = std::env::var("CURTAIN_METERS_PER_DEGREE") {
            if let Ok(m) = val.parse() {
                config.meters_per_degree = m;
            }
        }
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.meters_per_degree.is_finite() || self.meters_per_degree <= 0.0 {
            return Err("meters_per_degree must be a positive finite number".to_string());
        }
        Ok(())
    }
}
