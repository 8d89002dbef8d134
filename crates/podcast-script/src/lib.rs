//! AI-assisted script writing.
//!
//! Given a persona and the conversation so far, a [`ScriptWriter`] produces
//! that persona's next utterance. [`OpenAiScriptWriter`] talks to any
//! OpenAI-compatible chat completions endpoint.

pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use podcast_types::{ConversationTurn, Persona};

pub use config::ScriptConfig;
pub use error::ScriptError;
pub use openai::OpenAiScriptWriter;
pub use prompt::{system_prompt, user_prompt};

/// Generates the next line of dialogue for a persona.
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    async fn next_utterance(
        &self,
        persona: &Persona,
        history: &[ConversationTurn],
        all_personas: &[Persona],
    ) -> Result<String, ScriptError>;
}
