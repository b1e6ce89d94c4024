//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, safety block, empty candidate list)
    #[error("API error: {0}")]
    Api(String),

    /// The model's candidate text was not valid JSON after fence-stripping
    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
}
