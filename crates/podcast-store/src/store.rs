//! Object storage backends for published podcasts.

use crate::error::StoreError;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Key → bytes storage that can hand out a retrieval URL.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Writes `data` under `key` and returns a URL a client can fetch it from.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, StoreError>;
}

/// Stores files under a local directory served by the HTTP server.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    /// `public_base_url` is the URL prefix the `root` directory is served at.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if key.is_empty() || !is_plain {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AudioStore for LocalStore {
    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> Result<String, StoreError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::PublishFailure(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        tokio::fs::write(&path, &data).await.map_err(|e| {
            StoreError::PublishFailure(format!("failed to write {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = data.len(), "wrote podcast to local store");
        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key
        ))
    }
}

/// Stores objects in S3 and returns presigned GET URLs, or static URLs when a
/// public base URL is configured (e.g. a CDN in front of the bucket).
#[derive(Debug)]
pub struct S3Store {
    store: AmazonS3,
    signed_url_ttl: Duration,
    public_base_url: Option<String>,
}

impl S3Store {
    /// Builds an S3 client for `bucket`. Credentials and endpoint overrides
    /// are read from the standard `AWS_*` environment variables.
    pub fn new(
        bucket: &str,
        region: Option<&str>,
        signed_url_ttl: Duration,
        public_base_url: Option<String>,
    ) -> Result<Self, StoreError> {
        if bucket.trim().is_empty() {
            return Err(StoreError::Config("S3 bucket name is empty".to_string()));
        }
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(region) = region {
            builder = builder.with_region(region);
        }
        let store = builder
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build S3 client: {}", e)))?;

        Ok(Self {
            store,
            signed_url_ttl,
            public_base_url,
        })
    }
}

#[async_trait]
impl AudioStore for S3Store {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, StoreError> {
        let path = ObjectPath::parse(key).map_err(|e| StoreError::InvalidKey(e.to_string()))?;

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let size = data.len();
        self.store
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| StoreError::PublishFailure(format!("S3 put failed: {}", e)))?;
        debug!(key, bytes = size, "wrote podcast to S3");

        if let Some(base) = &self.public_base_url {
            return Ok(format!("{}/{}", base.trim_end_matches('/'), key));
        }

        let url = self
            .store
            .signed_url(http::Method::GET, &path, self.signed_url_ttl)
            .await
            .map_err(|e| StoreError::PublishFailure(format!("failed to sign URL: {}", e)))?;
        Ok(url.to_string())
    }
}
