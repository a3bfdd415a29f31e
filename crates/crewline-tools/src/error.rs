//! Error types for crewline-tools

use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Tool not found
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Input failed schema validation
    #[error("validation error: {0}")]
    Validation(String),

    /// Permission denied (blocked URL, path outside sandbox)
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Required credential missing
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// External service answered with something we could not read
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was raised before any external call
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
