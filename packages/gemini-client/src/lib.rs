//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Sends a prompt (optionally with an inline JPEG
//! image) and parses the model's textual answer as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new("AIza...");
//!
//! let value = client
//!     .generate_json("Reply with a JSON object {\"ok\": true}", None)
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{strip_code_fences, Content, GenerateRequest, InlineData, Part};

use reqwest::Client;
use tracing::{debug, warn};

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            model: "gemini-1.5-flash-latest".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the model (default: gemini-1.5-flash-latest).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content and parse the model's answer as JSON.
    ///
    /// Sends one POST to `generateContent` with the prompt as text content
    /// and, when supplied, the base64 image as an inline JPEG part. The call
    /// is attempted exactly once; there is no retry.
    ///
    /// Fails with [`GeminiError::Api`] on a non-2xx status or an empty
    /// candidate list (safety blocks surface this way), and with
    /// [`GeminiError::InvalidOutput`] when the candidate text is not valid
    /// JSON after stripping Markdown code fences.
    pub async fn generate_json(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> Result<serde_json::Value> {
        let start = std::time::Instant::now();
        let request = GenerateRequest::user(prompt, image_base64);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        // The API returns a JSON body on errors too; prefer its message.
        let parsed: types::GenerateResponseRaw = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                warn!(status = %status, "Gemini API error");
                return Err(GeminiError::Api(format!("HTTP {status}: {body}")));
            }
            Err(e) => return Err(GeminiError::Api(e.to_string())),
        };

        if !status.is_success() || parsed.candidates.is_empty() {
            let message = parsed
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "invalid response (no candidates)".to_string());
            warn!(status = %status, error = %message, "Gemini API error");
            return Err(GeminiError::Api(message));
        }

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| GeminiError::Api("candidate has no text part".into()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        parse_candidate_json(&text)
    }
}

/// Parse a candidate's text as JSON after stripping code fences.
fn parse_candidate_json(text: &str) -> Result<serde_json::Value> {
    let clean = strip_code_fences(text);
    serde_json::from_str(clean).map_err(|e| {
        warn!(error = %e, text = %text, "model returned non-JSON output");
        GeminiError::InvalidOutput(e.to_string())
    })
}
