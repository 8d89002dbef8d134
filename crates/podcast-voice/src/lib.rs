//! Speech synthesis for the podcast studio.
//!
//! Maps personas to provider voices, synthesizes each conversation turn
//! through an ordered fallback chain of synthesis tiers, and renders a whole
//! conversation by synthesizing all turns concurrently and concatenating the
//! segments in playback order.
//!
//! The provider is reached only through [`SpeechProvider`]; production code
//! injects [`PollySpeechProvider`], tests inject fakes.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod polly;
pub mod provider;
pub mod selector;
pub mod ssml;
pub mod tts;

pub use config::SynthesisConfig;
pub use error::VoiceError;
pub use pipeline::{Pipeline, PodcastAudio};
pub use polly::PollySpeechProvider;
pub use provider::{Engine, SpeechProvider, SpeechRequest, TextType};
pub use selector::{select_voice, VoiceMap};
pub use ssml::escape_markup;
pub use tts::{validate_turn_text, SynthesisTier, TurnSynthesizer};
