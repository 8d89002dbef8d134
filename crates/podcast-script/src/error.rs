use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected chat completion response: {0}")]
    Response(String),

    #[error("script writer misconfigured: {0}")]
    Config(String),
}
