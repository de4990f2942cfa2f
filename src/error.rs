//! Error types for Kilde.

use thiserror::Error;

/// Library-level error type for Kilde operations.
#[derive(Error, Debug)]
pub enum KildeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Provider call failed: {0}")]
    ProviderCall(String),

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("URL unreachable: {0}")]
    UrlUnreachable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl KildeError {
    /// Whether the pipeline may degrade to the next fallback tier instead of
    /// surfacing this error to the caller.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, KildeError::InvalidInput(_) | KildeError::Config(_))
    }
}

/// Result type alias for Kilde operations.
pub type Result<T> = std::result::Result<T, KildeError>;
