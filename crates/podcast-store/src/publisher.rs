use crate::error::StoreError;
use crate::store::AudioStore;
use bytes::Bytes;
use podcast_types::AudioFormat;
use std::sync::Arc;
use tracing::{error, info};

/// Request ids become part of the storage key, so only a conservative
/// character set is accepted.
fn is_valid_request_id(request_id: &str) -> bool {
    !request_id.is_empty()
        && request_id.len() <= 128
        && request_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Writes finished podcasts to the configured store.
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn AudioStore>,
    prefix: Option<String>,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Publisher {
    pub fn new(store: Arc<dyn AudioStore>, prefix: Option<String>) -> Self {
        let prefix = prefix
            .map(|p| p.trim().trim_matches('/').to_string())
            .filter(|p| !p.is_empty());
        Self { store, prefix }
    }

    /// Storage key for a request: `{prefix}/podcasts/{request_id}.{ext}`.
    ///
    /// Deterministic in `request_id`; two requests reusing an id overwrite
    /// each other.
    pub fn storage_key(&self, request_id: &str, format: AudioFormat) -> Result<String, StoreError> {
        if !is_valid_request_id(request_id) {
            return Err(StoreError::InvalidKey(format!(
                "invalid request id: {:?}",
                request_id
            )));
        }
        let key = format!("podcasts/{}.{}", request_id, format.extension());
        Ok(match &self.prefix {
            Some(prefix) => format!("{}/{}", prefix, key),
            None => key,
        })
    }

    /// Uploads the podcast once and returns its retrieval URL.
    ///
    /// Store errors surface as `PublishFailure`; nothing is retried here.
    pub async fn publish(
        &self,
        audio: Bytes,
        format: AudioFormat,
        request_id: &str,
    ) -> Result<String, StoreError> {
        let key = self.storage_key(request_id, format)?;
        let size = audio.len();

        match self.store.put(&key, audio, format.content_type()).await {
            Ok(url) => {
                info!(request_id, key = %key, bytes = size, "published podcast");
                Ok(url)
            }
            Err(e) => {
                error!(request_id, key = %key, error = %e, "failed to publish podcast");
                Err(match e {
                    StoreError::PublishFailure(_) => e,
                    other => StoreError::PublishFailure(other.to_string()),
                })
            }
        }
    }
}
