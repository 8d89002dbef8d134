use crate::error::VoiceError;
use crate::provider::{Engine, SpeechProvider, SpeechRequest, TextType};
use crate::ssml::prosody_document;
use bytes::Bytes;
use podcast_types::{AudioFormat, ConversationTurn, VoiceId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Maximum turn text length in characters (Polly's billed-character limit
/// per request).
const MAX_TURN_TEXT_CHARS: usize = 3_000;

/// Rejects blank text and text longer than the per-request limit.
pub fn validate_turn_text(turn: &ConversationTurn) -> Result<(), VoiceError> {
    if turn.text.trim().is_empty() {
        return Err(VoiceError::InvalidRequest(format!(
            "turn {} has no text",
            turn.id
        )));
    }
    let chars = turn.text.chars().count();
    if chars > MAX_TURN_TEXT_CHARS {
        return Err(VoiceError::InvalidRequest(format!(
            "turn {} text exceeds maximum length: {} characters (limit: {})",
            turn.id, chars, MAX_TURN_TEXT_CHARS
        )));
    }
    Ok(())
}

/// One synthesis strategy in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisTier {
    /// Neural engine with SSML prosody markup.
    NeuralSsml,
    /// Neural engine, plain text.
    NeuralPlain,
    /// Standard engine, plain text.
    StandardPlain,
}

impl SynthesisTier {
    /// Tiers in the order they are attempted by default.
    pub const DEFAULT_CHAIN: [SynthesisTier; 3] =
        [Self::NeuralSsml, Self::NeuralPlain, Self::StandardPlain];

    pub fn name(self) -> &'static str {
        match self {
            Self::NeuralSsml => "neural_ssml",
            Self::NeuralPlain => "neural_plain",
            Self::StandardPlain => "standard_plain",
        }
    }

    pub fn engine(self) -> Engine {
        match self {
            Self::NeuralSsml | Self::NeuralPlain => Engine::Neural,
            Self::StandardPlain => Engine::Standard,
        }
    }

    pub fn text_type(self) -> TextType {
        match self {
            Self::NeuralSsml => TextType::Ssml,
            Self::NeuralPlain | Self::StandardPlain => TextType::Text,
        }
    }

    /// Builds the provider request for this tier from raw turn text.
    ///
    /// Escaping happens here and only for the markup tier.
    pub fn request(self, text: &str, voice: &VoiceId) -> SpeechRequest {
        let text = match self.text_type() {
            TextType::Ssml => prosody_document(text),
            TextType::Text => text.to_string(),
        };
        SpeechRequest {
            text,
            text_type: self.text_type(),
            voice: voice.clone(),
            engine: self.engine(),
        }
    }
}

/// Synthesizes single turns, walking the fallback chain until a tier succeeds.
#[derive(Clone)]
pub struct TurnSynthesizer {
    provider: Arc<dyn SpeechProvider>,
    tiers: Vec<SynthesisTier>,
}

impl std::fmt::Debug for TurnSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnSynthesizer")
            .field("tiers", &self.tiers)
            .finish_non_exhaustive()
    }
}

impl TurnSynthesizer {
    /// Creates a synthesizer over the given provider and tier order.
    pub fn new(
        provider: Arc<dyn SpeechProvider>,
        tiers: Vec<SynthesisTier>,
    ) -> Result<Self, VoiceError> {
        if tiers.is_empty() {
            return Err(VoiceError::Config(
                "fallback chain must contain at least one synthesis tier".to_string(),
            ));
        }
        Ok(Self { provider, tiers })
    }

    /// Creates a synthesizer with [`SynthesisTier::DEFAULT_CHAIN`].
    pub fn with_default_chain(provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            provider,
            tiers: SynthesisTier::DEFAULT_CHAIN.to_vec(),
        }
    }

    pub fn tiers(&self) -> &[SynthesisTier] {
        &self.tiers
    }

    pub fn output_format(&self) -> AudioFormat {
        self.provider.output_format()
    }

    /// Synthesizes one turn with the given voice.
    ///
    /// Every provider error advances to the next tier regardless of its
    /// cause. Returns the bytes of the first tier that succeeds, or
    /// `SynthesisFailure` carrying the last provider error once the chain is
    /// exhausted.
    pub async fn synthesize_turn(
        &self,
        turn: &ConversationTurn,
        voice: &VoiceId,
    ) -> Result<Bytes, VoiceError> {
        validate_turn_text(turn)?;

        let mut last_error = None;
        for (attempt, tier) in self.tiers.iter().copied().enumerate() {
            let request = tier.request(&turn.text, voice);
            let started = Instant::now();
            match self.provider.synthesize(&request).await {
                Ok(audio) => {
                    debug!(
                        turn_id = %turn.id,
                        voice = %voice,
                        tier = tier.name(),
                        attempt,
                        audio_bytes = audio.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "turn synthesized"
                    );
                    return Ok(audio);
                }
                Err(e) => {
                    warn!(
                        turn_id = %turn.id,
                        voice = %voice,
                        tier = tier.name(),
                        attempt,
                        error = %e,
                        "synthesis tier failed, falling back"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(VoiceError::SynthesisFailure {
            turn_id: turn.id.clone(),
            reason: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no synthesis tiers configured".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_degrades_in_order() {
        let chain = SynthesisTier::DEFAULT_CHAIN;
        assert_eq!(chain[0].engine(), Engine::Neural);
        assert_eq!(chain[0].text_type(), TextType::Ssml);
        assert_eq!(chain[1].engine(), Engine::Neural);
        assert_eq!(chain[1].text_type(), TextType::Text);
        assert_eq!(chain[2].engine(), Engine::Standard);
    }

    #[test]
    fn markup_tier_escapes_text() {
        let request = SynthesisTier::NeuralSsml.request("Q&A", &VoiceId::from("Joanna"));
        assert_eq!(request.text_type, TextType::Ssml);
        assert!(request.text.contains("Q&amp;A"));
        assert!(request.text.starts_with("<speak>"));
    }

    #[test]
    fn plain_tiers_send_raw_text() {
        for tier in [SynthesisTier::NeuralPlain, SynthesisTier::StandardPlain] {
            let request = tier.request("Q&A <now>", &VoiceId::from("Matthew"));
            assert_eq!(request.text, "Q&A <now>");
            assert_eq!(request.voice.as_str(), "Matthew");
        }
    }

    #[test]
    fn tiers_deserialize_from_config_names() {
        #[derive(Deserialize)]
        struct Chain {
            tiers: Vec<SynthesisTier>,
        }
        let chain: Chain =
            toml::from_str(r#"tiers = ["neural_ssml", "neural_plain", "standard_plain"]"#).unwrap();
        assert_eq!(chain.tiers, SynthesisTier::DEFAULT_CHAIN.to_vec());
        for tier in chain.tiers {
            assert!(["neural_ssml", "neural_plain", "standard_plain"].contains(&tier.name()));
        }
    }
}
