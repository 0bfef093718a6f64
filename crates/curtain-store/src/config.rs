//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Compression codec for store arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZarrCompression {
    /// No compression.
    None,
    /// Blosc with LZ4 (fast).
    BloscLz4,
    /// Blosc with Zstd (better ratio).
    BloscZstd,
}

impl ZarrCompression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BloscLz4 => "blosc_lz4",
            Self::BloscZstd => "blosc_zstd",
        }
    }
}

/// Configuration for the curtain store writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Rows per chunk in the point arrays.
    pub chunk_size: usize,

    /// Compression codec.
    pub compression: ZarrCompression,

    /// Compression level (0-9).
    pub compression_level: u8,

    /// Enable byte shuffle before compression.
    pub shuffle: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: 262_144,
            compression: ZarrCompression::BloscZstd,
            compression_level: 3,
            shuffle: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("CURTAIN_STORE_CHUNK_SIZE") {
            if let Ok(n) = v.parse() {
                config.chunk_size = n;
            }
        }
        if let Ok(v) = std::env::var("CURTAIN_STORE_COMPRESSION") {
            match v.as_str() {
                "none" => config.compression = ZarrCompression::None,
                "blosc_lz4" => config.compression = ZarrCompression::BloscLz4,
                "blosc_zstd" => config.compression = ZarrCompression::BloscZstd,
                _ => {}
            }
        }
        if let Ok(v) = std::env::var("CURTAIN_STORE_COMPRESSION_LEVEL") {
            if let Ok(n) = v.parse() {
                config.compression_level = n;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(StoreError::Config("chunk_size must be non-zero".to_string()));
        }
        if self.compression_level > 9 {
            return Err(StoreError::Config(format!(
                "compression_level must be 0-9, got {}",
                self.compression_level
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
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 262_144);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = StoreConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compression_level_range() {
        let config = StoreConfig {
            compression_level: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
