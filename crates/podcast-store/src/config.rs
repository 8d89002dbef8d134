use crate::error::StoreError;
use crate::store::{AudioStore, LocalStore, S3Store};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Which object store podcasts are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files on local disk, served by the HTTP server under `/files`.
    #[default]
    Local,
    /// An S3 bucket.
    S3,
}

impl std::str::FromStr for StorageBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(StoreError::Config(format!(
                "unknown storage backend: {:?}",
                other
            ))),
        }
    }
}

fn default_local_dir() -> String {
    "data/podcasts".to_string()
}

fn default_signed_url_ttl_secs() -> u64 {
    3600
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Root directory for the local backend.
    #[serde(default = "default_local_dir")]
    pub local_dir: String,
    /// Base URL prepended to storage keys. Required for the local backend
    /// unless the server fills it in from its own listen address. For S3,
    /// setting this disables presigning.
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    /// Region for S3. Falls back to `AWS_REGION` when unset.
    #[serde(default)]
    pub region: Option<String>,
    /// Optional key prefix, e.g. a tenant or environment name.
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "default_signed_url_ttl_secs")]
    pub signed_url_ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            local_dir: default_local_dir(),
            public_base_url: None,
            bucket: None,
            region: None,
            prefix: None,
            signed_url_ttl_secs: default_signed_url_ttl_secs(),
        }
    }
}

/// Builds the configured store.
///
/// `fallback_base_url` is used by the local backend when no
/// `public_base_url` is configured.
pub fn build_store(
    config: &StorageConfig,
    fallback_base_url: &str,
) -> Result<Arc<dyn AudioStore>, StoreError> {
    match config.backend {
        StorageBackend::Local => {
            if config.local_dir.trim().is_empty() {
                return Err(StoreError::Config("local_dir is empty".to_string()));
            }
            let base = config
                .public_base_url
                .clone()
                .unwrap_or_else(|| fallback_base_url.to_string());
            Ok(Arc::new(LocalStore::new(&config.local_dir, base)))
        }
        StorageBackend::S3 => {
            let bucket = config
                .bucket
                .as_deref()
                .ok_or_else(|| StoreError::Config("bucket is required for s3".to_string()))?;
            if config.signed_url_ttl_secs == 0 {
                return Err(StoreError::Config(
                    "signed_url_ttl_secs must be greater than zero".to_string(),
                ));
            }
            let store = S3Store::new(
                bucket,
                config.region.as_deref(),
                Duration::from_secs(config.signed_url_ttl_secs),
                config.public_base_url.clone(),
            )?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let config: StorageConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend, StorageBackend::Local);
        assert_eq!(config.local_dir, "data/podcasts");
        assert_eq!(config.signed_url_ttl_secs, 3600);
        assert!(config.bucket.is_none());
    }

    #[test]
    fn parses_s3_section() {
        let config: StorageConfig = toml::from_str(
            r#"
            backend = "s3"
            bucket = "podcasts-prod"
            region = "us-west-2"
            prefix = "staging"
            signed_url_ttl_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, StorageBackend::S3);
        assert_eq!(config.bucket.as_deref(), Some("podcasts-prod"));
        assert_eq!(config.prefix.as_deref(), Some("staging"));
        assert_eq!(config.signed_url_ttl_secs, 600);
    }

    #[test]
    fn backend_from_str_is_case_insensitive() {
        assert_eq!("S3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            " local ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert!("gcs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn s3_without_bucket_is_rejected() {
        let config = StorageConfig {
            backend: StorageBackend::S3,
            ..Default::default()
        };
        assert!(matches!(
            build_store(&config, "http://localhost/files"),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn s3_with_zero_ttl_is_rejected() {
        let config = StorageConfig {
            backend: StorageBackend::S3,
            bucket: Some("b".to_string()),
            signed_url_ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            build_store(&config, "http://localhost/files"),
            Err(StoreError::Config(_))
        ));
    }
}
