use crate::tts::SynthesisTier;
use podcast_types::AudioFormat;
use serde::{Deserialize, Serialize};

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_tiers() -> Vec<SynthesisTier> {
    SynthesisTier::DEFAULT_CHAIN.to_vec()
}

/// Speech synthesis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// AWS region of the Polly endpoint.
    #[serde(default = "default_region")]
    pub region: String,
    /// Language code sent with every request.
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// Container format for every segment. Default: mp3.
    #[serde(default)]
    pub output_format: AudioFormat,
    /// Fallback chain, tried in order.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<SynthesisTier>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            language_code: default_language_code(),
            output_format: AudioFormat::default(),
            tiers: default_tiers(),
        }
    }
}
