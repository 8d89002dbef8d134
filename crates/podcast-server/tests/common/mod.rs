#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use bytes::Bytes;
use podcast_script::{ScriptError, ScriptWriter};
use podcast_server::AppState;
use podcast_store::{AudioStore, LocalStore, Publisher, StoreError};
use podcast_types::{AudioFormat, ConversationTurn, Persona};
use podcast_voice::{Pipeline, SpeechProvider, SpeechRequest, TurnSynthesizer, VoiceError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the request text as audio and counts calls.
#[derive(Default)]
pub struct CountingProvider {
    calls: AtomicUsize,
    pub fail_all: bool,
}

impl CountingProvider {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_all: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for CountingProvider {
    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, VoiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(VoiceError::Provider("throttled".to_string()));
        }
        Ok(Bytes::from(format!("[{}]", request.text)))
    }
}

pub struct RejectingStore;

#[async_trait]
impl AudioStore for RejectingStore {
    async fn put(&self, _key: &str, _data: Bytes, _ct: &str) -> Result<String, StoreError> {
        Err(StoreError::PublishFailure("bucket does not exist".to_string()))
    }
}

/// Replies with `"{name} speaks after {n} turns"`.
pub struct FakeWriter;

#[async_trait]
impl ScriptWriter for FakeWriter {
    async fn next_utterance(
        &self,
        persona: &Persona,
        history: &[ConversationTurn],
        _all: &[Persona],
    ) -> Result<String, ScriptError> {
        if persona.name == "Broken" {
            return Err(ScriptError::Api {
                status: 500,
                body: "upstream down".to_string(),
            });
        }
        Ok(format!("{} speaks after {} turns", persona.name, history.len()))
    }
}

pub struct TestApp {
    pub state: AppState,
    pub provider: Arc<CountingProvider>,
    pub dir: TempDir,
}

pub fn test_app(provider: CountingProvider) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(provider);
    let synthesizer = TurnSynthesizer::with_default_chain(provider.clone());
    let store = LocalStore::new(dir.path(), "http://localhost:3000/files");
    let state = AppState {
        pipeline: Arc::new(Pipeline::new(synthesizer)),
        publisher: Arc::new(Publisher::new(Arc::new(store), None)),
        script_writer: Some(Arc::new(FakeWriter)),
        local_files_dir: Some(dir.path().to_string_lossy().into_owned()),
    };
    TestApp {
        state,
        provider,
        dir,
    }
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
