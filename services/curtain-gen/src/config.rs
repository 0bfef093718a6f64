//! Pipeline configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use curtain_ingest::{ObjectStoreConfig, SensorVariables};
use curtain_processor::ProjectionConfig;
use curtain_store::StoreConfig;
use curtain_tiler::TilerConfig;

/// Top-level configuration for one curtain generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Field campaign identifier.
    pub campaign: String,

    /// Instrument collection identifier.
    pub collection: String,

    /// Dataset variable names to read.
    pub variables: SensorVariables,

    /// Beam projection parameters.
    pub projection: ProjectionConfig,

    /// Columnar store settings.
    pub store: StoreConfig,

    /// Tiling settings.
    pub tiler: TilerConfig,

    /// Object-store access for remote inputs.
    pub object_store: ObjectStoreConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            campaign: "olympex".to_string(),
            collection: "crs".to_string(),
            variables: SensorVariables::default(),
            projection: ProjectionConfig::default(),
            store: StoreConfig::default(),
            tiler: TilerConfig::default(),
            object_store: ObjectStoreConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let config: Self = serde_yaml::from_reader(file)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = env::var("CURTAIN_CAMPAIGN") {
            config.campaign = v;
        }
        if let Ok(v) = env::var("CURTAIN_COLLECTION") {
            config.collection = v;
        }
        config.projection = ProjectionConfig::from_env();
        config.store = StoreConfig::from_env();
        config.tiler = TilerConfig::from_env();
        config.object_store = ObjectStoreConfig::from_env();

        config
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        if self.campaign.is_empty() {
            anyhow::bail!("campaign must not be empty");
        }
        if self.collection.is_empty() {
            anyhow::bail!("collection must not be empty");
        }
        self.projection
            .validate()
            .map_err(|e| anyhow::anyhow!(e))?;
        self.store.validate()?;
        self.tiler.validate()?;
        Ok(())
    }

    /// Directory name of the store under the output root.
    pub fn store_name(&self) -> String {
        format!("{}_{}.zarr", self.campaign, self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store_name(), "olympex_crs.zarr");
        assert_eq!(config.variables.reflectivity, "zku");
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "campaign: impacts\nstore:\n  chunk_size: 1024\ntiler:\n  max_points_per_tile: 100\n",
        )
        .unwrap();

        let config = PipelineConfig::from_yaml(&path).unwrap();
        assert_eq!(config.campaign, "impacts");
        // Unset sections keep their defaults.
        assert_eq!(config.collection, "crs");
        assert_eq!(config.store.chunk_size, 1024);
        assert_eq!(config.tiler.max_points_per_tile, 100);
        assert_eq!(config.projection.meters_per_degree, 111_000.0);
    }

    #[test]
    fn test_empty_campaign_rejected() {
        let config = PipelineConfig {
            campaign: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
