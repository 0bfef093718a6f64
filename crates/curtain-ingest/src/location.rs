//! Dataset locations and object-store access.

use std::path::PathBuf;
use std::str::FromStr;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::{path::Path as ObjectPath, ObjectStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Where a raw sensor dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// An object addressed as `scheme://bucket/key...`.
    ObjectStore {
        scheme: String,
        bucket: String,
        key: String,
    },
}

impl DataLocation {
    /// Human-readable form for logs and error context.
    pub fn describe(&self) -> String {
        match self {
            DataLocation::Local(path) => path.display().to_string(),
            DataLocation::ObjectStore {
                scheme,
                bucket,
                key,
            } => format!("{}://{}/{}", scheme, bucket, key),
        }
    }
}

impl FromStr for DataLocation {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((scheme, rest)) = s.split_once("://") {
            // Only S3-compatible stores are supported; anything else would
            // otherwise be fetched as if its host were a bucket name.
            if scheme != "s3" {
                return Err(IngestError::InvalidLocation(s.to_string()));
            }
            let (bucket, key) = rest
                .split_once('/')
                .ok_or_else(|| IngestError::InvalidLocation(s.to_string()))?;
            if bucket.is_empty() || key.is_empty() {
                return Err(IngestError::InvalidLocation(s.to_string()));
            }
            return Ok(DataLocation::ObjectStore {
                scheme: scheme.to_string(),
                bucket: bucket.to_string(),
                // Keys must not start with '/'.
                key: key.trim_start_matches('/').to_string(),
            });
        }
        Ok(DataLocation::Local(PathBuf::from(s)))
    }
}

/// Configuration for the S3-compatible object store used for remote
/// datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStoreConfig {
    /// Endpoint URL; `None` uses the AWS default for the region.
    pub endpoint: Option<String>,
    /// AWS region (use "us-east-1" for MinIO).
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Allow HTTP (for local MinIO).
    pub allow_http: bool,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            allow_http: false,
        }
    }
}

impl ObjectStoreConfig {
    /// Load overrides from `CURTAIN_S3_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CURTAIN_S3_ENDPOINT") {
            config.endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("CURTAIN_S3_REGION") {
            config.region = val;
        }
        if let Ok(val) = std::env::var("CURTAIN_S3_ACCESS_KEY_ID") {
            config.access_key_id = Some(val);
        }
        if let Ok(val) = std::env::var("CURTAIN_S3_SECRET_ACCESS_KEY") {
            config.secret_access_key = Some(val);
        }
        if let Ok(val) = std::env::var("CURTAIN_S3_ALLOW_HTTP") {
            config.allow_http = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Build an S3 client for the given bucket.
    fn build(&self, bucket: &str) -> Result<impl ObjectStore> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(&self.region);

        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if let Some(key_id) = &self.access_key_id {
            builder = builder.with_access_key_id(key_id);
        }
        if let Some(secret) = &self.secret_access_key {
            builder = builder.with_secret_access_key(secret);
        }
        if self.allow_http {
            builder = builder.with_allow_http(true);
        }

        builder
            .build()
            .map_err(|e| IngestError::ObjectStoreConfig(e.to_string()))
    }
}

/// Fetch a remote object in full.
///
/// The fetch is the only externally-blocking call in the pipeline; there is
/// no timeout or retry, a failure aborts the run.
pub(crate) async fn fetch_object(
    config: &ObjectStoreConfig,
    bucket: &str,
    key: &str,
    location: &str,
) -> Result<Bytes> {
    let store = config.build(bucket)?;
    let path = ObjectPath::from(key);

    let result = store
        .get(&path)
        .await
        .map_err(|e| IngestError::ObjectFetch {
            location: location.to_string(),
            source: e,
        })?;

    let bytes = result
        .bytes()
        .await
        .map_err(|e| IngestError::ObjectFetch {
            location: location.to_string(),
            source: e,
        })?;

    debug!(location = %location, size = bytes.len(), "Fetched remote dataset");
    Ok(bytes)
}
