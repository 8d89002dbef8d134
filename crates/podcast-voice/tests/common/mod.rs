#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use podcast_types::{AudioFormat, ConversationTurn, Persona};
use podcast_voice::{SpeechProvider, SpeechRequest, VoiceError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn persona(id: &str, sex: &str, character: &str) -> Persona {
    Persona {
        id: id.to_string(),
        name: id.to_uppercase(),
        sex: Some(sex.to_string()),
        age: 30,
        voice_character: Some(character.to_string()),
        personality: None,
        is_ai: false,
    }
}

pub fn turn(id: &str, person_id: &str, text: &str) -> ConversationTurn {
    ConversationTurn {
        id: id.to_string(),
        person_id: person_id.to_string(),
        text: text.to_string(),
        is_generated: false,
    }
}

/// Fails the first `failures` calls, then answers with
/// `"{engine}/{text_type}/{voice}"`.
pub struct FlakyProvider {
    failures: usize,
    calls: AtomicUsize,
    pub requests: Mutex<Vec<SpeechRequest>>,
}

impl FlakyProvider {
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for FlakyProvider {
    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, VoiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if call < self.failures {
            return Err(VoiceError::Provider(format!("tier failure #{}", call + 1)));
        }
        Ok(Bytes::from(format!(
            "{}/{:?}/{}",
            request.engine, request.text_type, request.voice
        )))
    }
}

/// Echoes the request text back as audio after a per-text delay. Texts in
/// `failing` always error.
#[derive(Default)]
pub struct EchoProvider {
    pub delays: HashMap<String, Duration>,
    pub failing: Vec<String>,
    pub completed: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl EchoProvider {
    pub fn with_delays(delays: &[(&str, u64)]) -> Self {
        Self {
            delays: delays
                .iter()
                .map(|(text, ms)| (text.to_string(), Duration::from_millis(*ms)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing: texts.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for EchoProvider {
    fn output_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, VoiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&request.text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&request.text) {
            return Err(VoiceError::Provider(format!("cannot say {:?}", request.text)));
        }
        self.completed.lock().unwrap().push(request.text.clone());
        Ok(Bytes::from(request.text.clone().into_bytes()))
    }
}
