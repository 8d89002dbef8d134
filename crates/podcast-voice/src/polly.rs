//! Amazon Polly speech provider.
//!
//! Uses the `SynthesizeSpeech` operation, which returns the whole audio
//! payload in one response. Credentials come from the default AWS chain
//! (environment, shared config, instance/task role).

use crate::config::SynthesisConfig;
use crate::error::VoiceError;
use crate::provider::{Engine, SpeechProvider, SpeechRequest, TextType};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_polly::types::{
    Engine as PollyEngine, LanguageCode, OutputFormat, TextType as PollyTextType,
    VoiceId as PollyVoiceId,
};
use aws_sdk_polly::Client;
use bytes::Bytes;
use podcast_types::AudioFormat;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

fn engine_to_sdk(engine: Engine) -> PollyEngine {
    match engine {
        Engine::Neural => PollyEngine::Neural,
        Engine::Standard => PollyEngine::Standard,
    }
}

fn text_type_to_sdk(text_type: TextType) -> PollyTextType {
    match text_type {
        TextType::Text => PollyTextType::Text,
        TextType::Ssml => PollyTextType::Ssml,
    }
}

fn output_format_to_sdk(format: AudioFormat) -> OutputFormat {
    match format {
        AudioFormat::Mp3 => OutputFormat::Mp3,
        AudioFormat::OggVorbis => OutputFormat::OggVorbis,
        AudioFormat::Pcm => OutputFormat::Pcm,
    }
}

/// [`SpeechProvider`] backed by Amazon Polly.
#[derive(Debug)]
pub struct PollySpeechProvider {
    client: Client,
    output_format: AudioFormat,
    language_code: String,
    request_counter: AtomicU64,
}

impl PollySpeechProvider {
    /// Wraps an existing Polly client.
    pub fn new(client: Client, config: &SynthesisConfig) -> Self {
        Self {
            client,
            output_format: config.output_format,
            language_code: config.language_code.clone(),
            request_counter: AtomicU64::new(0),
        }
    }

    /// Builds a client from the default AWS credential chain for the
    /// configured region.
    pub async fn from_env(config: &SynthesisConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        Self::new(Client::new(&aws_config), config)
    }
}

#[async_trait]
impl SpeechProvider for PollySpeechProvider {
    fn output_format(&self) -> AudioFormat {
        self.output_format
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, VoiceError> {
        let request_id = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;

        debug!(
            request_id,
            text_len = request.text.len(),
            voice = %request.voice,
            engine = %request.engine,
            "synthesizing text with Amazon Polly"
        );

        let response = self
            .client
            .synthesize_speech()
            .text(&request.text)
            .text_type(text_type_to_sdk(request.text_type))
            .voice_id(PollyVoiceId::from(request.voice.as_str()))
            .engine(engine_to_sdk(request.engine))
            .output_format(output_format_to_sdk(self.output_format))
            .language_code(LanguageCode::from(self.language_code.as_str()))
            .send()
            .await
            .map_err(|e| {
                error!(request_id, error = %e, "Polly API error");
                VoiceError::Provider(format!("Polly API error: {}", e))
            })?;

        let audio = response.audio_stream.collect().await.map_err(|e| {
            error!(request_id, error = %e, "failed to read Polly audio stream");
            VoiceError::Provider(format!("failed to read audio stream: {}", e))
        })?;

        Ok(audio.into_bytes())
    }
}
