//! Speech provider capability.
//!
//! The synthesizer talks to the outside world only through [`SpeechProvider`],
//! so the production Polly client and test fakes are interchangeable.

use crate::error::VoiceError;
use async_trait::async_trait;
use bytes::Bytes;
use podcast_types::{AudioFormat, VoiceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthesis engine quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    Neural,
    Standard,
}

impl Engine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neural => "neural",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the provider should interpret [`SpeechRequest::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    Text,
    Ssml,
}

/// A single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub text_type: TextType,
    pub voice: VoiceId,
    pub engine: Engine,
}

/// Text-to-speech backend.
///
/// Implementations fix the output format and language for every call so that
/// segments from any tier can be concatenated.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Container format of every payload returned by [`synthesize`](Self::synthesize).
    fn output_format(&self) -> AudioFormat;

    /// Performs one synthesis call and returns the complete audio payload.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, VoiceError>;
}
