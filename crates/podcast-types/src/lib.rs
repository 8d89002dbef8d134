//! Shared types for the podcast studio.
//!
//! This crate defines the request and response shapes exchanged with the
//! client (personas, conversation turns, response envelopes) and the voice
//! attribute types used by the synthesis pipeline.
//!
//! Every other crate in the workspace depends on `podcast-types` for these
//! definitions, and `podcast-types` depends on nothing internal.

use serde::{Deserialize, Serialize};

pub mod voice;

pub use voice::{AttributeError, AudioFormat, Sex, VoiceCharacter, VoiceId};

/// A speaker in the conversation.
///
/// Sex and voice character are carried as raw strings so that the voice
/// selector can reject unknown values with a persona error instead of the
/// whole request failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Identifier, unique within one request.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Categorical sex attribute (`male` or `female`).
    #[serde(default)]
    pub sex: Option<String>,
    /// Age in years.
    #[serde(default)]
    pub age: u32,
    /// Voice character (`energetic`, `calm`, `sophisticated`).
    #[serde(default, alias = "personalityType")]
    pub voice_character: Option<String>,
    /// Free-text personality description. Only used for script generation.
    #[serde(default)]
    pub personality: Option<String>,
    /// Whether this persona is driven by the script writer.
    #[serde(default, rename = "isAI", alias = "isAi")]
    pub is_ai: bool,
}

/// One utterance by one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    /// Turn identifier.
    pub id: String,
    /// The [`Persona::id`] of the speaker.
    pub person_id: String,
    /// Literal utterance text.
    pub text: String,
    /// Whether the text came from the script writer.
    #[serde(default)]
    pub is_generated: bool,
}

/// Request body for `POST /api/generate-podcast`.
///
/// Both fields are optional at the parse level so the handler can answer a
/// missing field with its own client error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePodcastRequest {
    #[serde(default)]
    pub persons: Option<Vec<Persona>>,
    #[serde(default)]
    pub turns: Option<Vec<ConversationTurn>>,
}

/// Success body for `POST /api/generate-podcast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePodcastResponse {
    /// URL the client can fetch the finished audio from.
    pub audio_url: String,
    /// Human-readable status message.
    pub message: String,
}

/// Error envelope shared by all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request body for `POST /api/generate-turn`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTurnRequest {
    /// All personas in the conversation.
    pub persons: Vec<Persona>,
    /// Conversation so far, in playback order.
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    /// The persona that should speak next.
    pub person_id: String,
}

/// Success body for `POST /api/generate-turn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateTurnResponse {
    pub text: String,
}
