//! OpenAI-compatible chat completions client.

use crate::config::ScriptConfig;
use crate::error::ScriptError;
use crate::prompt::{system_prompt, user_prompt};
use crate::ScriptWriter;
use async_trait::async_trait;
use podcast_types::{ConversationTurn, Persona};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;
const TOP_P: f32 = 0.9;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// [`ScriptWriter`] backed by a `/chat/completions` endpoint.
pub struct OpenAiScriptWriter {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for OpenAiScriptWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiScriptWriter")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiScriptWriter {
    /// Returns `Config` when no API key is set.
    pub fn new(config: &ScriptConfig) -> Result<Self, ScriptError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ScriptError::Config("api_key is not set".to_string()))?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ScriptWriter for OpenAiScriptWriter {
    async fn next_utterance(
        &self,
        persona: &Persona,
        history: &[ConversationTurn],
        all_personas: &[Persona],
    ) -> Result<String, ScriptError> {
        let system = system_prompt(persona);
        let user = user_prompt(persona, history, all_personas);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        debug!(
            persona = %persona.id,
            history_len = history.len(),
            model = %self.model,
            "requesting next utterance"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "chat completion request failed");
            return Err(ScriptError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScriptError::Response(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ScriptError::Response("no message content in choices".to_string()))
    }
}
