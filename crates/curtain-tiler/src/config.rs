//! Tiler configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileError};

/// Configuration for tile planning and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TilerConfig {
    /// Upper bound on points per tile. Tiles are cut at store chunk
    /// boundaries, so a single oversized chunk still becomes one tile.
    pub max_points_per_tile: u64,

    /// Margin in degrees added to the dataset bounding box on the lon/lat
    /// axes.
    pub bbox_padding_deg: f64,
}

impl Default for TilerConfig {
    fn default() -> Self {
        Self {
            max_points_per_tile: 500_000,
            bbox_padding_deg: 0.2,
        }
    }
}

impl TilerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("CURTAIN_TILE_MAX_POINTS") {
            if let Ok(n) = v.parse() {
                config.max_points_per_tile = n;
            }
        }
        if let Ok(v) = std::env::var("CURTAIN_TILE_BBOX_PADDING") {
            if let Ok(n) = v.parse() {
                config.bbox_padding_deg = n;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_points_per_tile == 0 {
            return Err(TileError::Config(
                "max_points_per_tile must be non-zero".to_string(),
            ));
        }
        if !self.bbox_padding_deg.is_finite() || self.bbox_padding_deg < 0.0 {
            return Err(TileError::Config(format!(
                "bbox_padding_deg must be a non-negative number, got {}",
                self.bbox_padding_deg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_points_per_tile, 500_000);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let config = TilerConfig {
            max_points_per_tile: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TilerConfig {
            bbox_padding_deg: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
