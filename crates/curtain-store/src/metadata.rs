//! Dataset-level metadata stored as root group attributes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

fn default_renderer() -> String {
    "point_cloud".to_string()
}

fn default_vmin() -> f32 {
    -10.0
}

fn default_vmax() -> f32 {
    30.0
}

fn default_point_size() -> f32 {
    2.0
}

/// Display hint for one variable, consumed by downstream viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererHint {
    /// Variable name the hint applies to.
    pub variable: String,
    /// Renderer identifier.
    #[serde(default = "default_renderer")]
    pub renderer: String,
    /// Lower bound of the color ramp.
    #[serde(default = "default_vmin")]
    pub vmin: f32,
    /// Upper bound of the color ramp.
    #[serde(default = "default_vmax")]
    pub vmax: f32,
    /// Point size in display units.
    #[serde(default = "default_point_size")]
    pub point_size: f32,
}

impl RendererHint {
    /// Reflectivity-style defaults for a variable.
    pub fn for_variable(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            renderer: default_renderer(),
            vmin: default_vmin(),
            vmax: default_vmax(),
            point_size: default_point_size(),
        }
    }
}

/// Identifying metadata for a curtain store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreMetadata {
    /// Field campaign identifier (e.g. "olympex").
    pub campaign: String,
    /// Instrument collection identifier (e.g. "crs").
    pub collection: String,
    /// Names of the persisted value arrays.
    pub variables: Vec<String>,
    /// Display hints, one per variable.
    pub renderers: Vec<RendererHint>,
}

impl StoreMetadata {
    /// Serialize into root group attributes, adding the epoch.
    pub fn to_attributes(&self, epoch: i64) -> Result<serde_json::Map<String, serde_json::Value>> {
        let value = serde_json::to_value(self).map_err(StoreError::invalid_metadata)?;
        let mut attrs = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(StoreError::invalid_metadata(format!(
                    "expected object, got {other}"
                )))
            }
        };
        attrs.insert("epoch".to_string(), serde_json::json!(epoch));
        Ok(attrs)
    }

    /// Parse metadata and epoch back out of root group attributes.
    pub fn from_attributes(
        attrs: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(Self, i64)> {
        let epoch = attrs
            .get("epoch")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| StoreError::invalid_metadata("missing epoch attribute"))?;

        let metadata = serde_json::from_value(serde_json::Value::Object(attrs.clone()))
            .map_err(StoreError::invalid_metadata)?;

        Ok((metadata, epoch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_roundtrip() {
        let metadata = StoreMetadata {
            campaign: "olympex".to_string(),
            collection: "crs".to_string(),
            variables: vec!["zku".to_string()],
            renderers: vec![RendererHint::for_variable("zku")],
        };

        let attrs = metadata.to_attributes(1_447_113_600).unwrap();
        let (restored, epoch) = StoreMetadata::from_attributes(&attrs).unwrap();

        assert_eq!(epoch, 1_447_113_600);
        assert_eq!(restored.campaign, "olympex");
        assert_eq!(restored.variables, vec!["zku"]);
        assert_eq!(restored.renderers[0].vmin, -10.0);
        assert_eq!(restored.renderers[0].vmax, 30.0);
    }

    #[test]
    fn test_missing_epoch_rejected() {
        let attrs = serde_json::Map::new();
        assert!(StoreMetadata::from_attributes(&attrs).is_err());
    }
}
