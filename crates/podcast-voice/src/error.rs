use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid persona: {0}")]
    InvalidPersona(String),

    /// A single provider call failed. Consumed by the fallback chain.
    #[error("speech provider error: {0}")]
    Provider(String),

    #[error("speech synthesis failed for turn {turn_id}: {reason}")]
    SynthesisFailure { turn_id: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}
