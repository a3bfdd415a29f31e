//! Error types for crewline-llm

use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// Unknown provider name
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// API error
    #[error("api error: {0}")]
    Api(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Mock provider ran out of queued responses
    #[error("no queued response left")]
    Exhausted,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
