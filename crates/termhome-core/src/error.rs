use thiserror::Error;

/// Errors surfaced by the core library. The session renders every variant as a
/// single error line; nothing here is retried.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(String),
}
