use thiserror::Error;

/// Errors produced by the gateway, orchestrator and favorites store.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Bad input caught before any network call is made.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Missing or unusable provider credential.
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider answered with a non-success status or an error payload.
    #[error("provider error: {0}")]
    Upstream(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, WeatherError>;
