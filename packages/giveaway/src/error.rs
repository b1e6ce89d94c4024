//! Typed errors for the giveaway analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use crate::prompts::TemplateError;

/// Errors that can occur while analyzing a giveaway image.
#[derive(Debug, Error)]
pub enum GiveawayError {
    /// Model call failed (network, API, or non-JSON output)
    #[error("model error: {0}")]
    Model(#[from] gemini_client::GeminiError),

    /// The extractor reported an error or could not read the image
    #[error("extractor failed: {reason}")]
    Extractor { reason: String },

    /// A stage's parsed result is missing a required field
    #[error("{stage} result is missing field: {field}")]
    MissingField {
        stage: &'static str,
        field: &'static str,
    },

    /// A stage returned JSON with an unexpected shape
    #[error("{stage} returned an unexpected shape: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Prompt template rendering failed
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type alias for giveaway operations.
pub type Result<T> = std::result::Result<T, GiveawayError>;
