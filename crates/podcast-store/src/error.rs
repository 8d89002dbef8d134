use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("failed to publish podcast: {0}")]
    PublishFailure(String),

    #[error("invalid storage configuration: {0}")]
    Config(String),
}
