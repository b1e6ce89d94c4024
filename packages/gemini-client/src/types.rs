//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// generateContent request
// =============================================================================

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Conversation contents (single-turn: one user entry)
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// Create a single-turn user request from a prompt and an optional
    /// base64-encoded JPEG image.
    pub fn user(prompt: impl Into<String>, image_base64: Option<&str>) -> Self {
        let mut parts = vec![Part::text(prompt)];
        if let Some(data) = image_base64 {
            parts.push(Part::inline_jpeg(strip_data_url_prefix(data)));
        }
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// Role: "user" or "model"
    pub role: String,

    /// Content parts (text and/or inline media)
    pub parts: Vec<Part>,
}

/// A content part: text or inline media.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text part
    Text { text: String },

    /// Inline media part (base64 payload)
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an inline JPEG image part.
    pub fn inline_jpeg(data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".to_string(),
                data: data.into(),
            },
        }
    }
}

/// Inline media payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload
    pub mime_type: String,

    /// Base64-encoded bytes
    pub data: String,
}

// =============================================================================
// generateContent response
// =============================================================================

/// Raw response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseRaw {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    pub text: String,
}

/// Error object the API returns alongside (or instead of) candidates.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

// =============================================================================
// Utilities
// =============================================================================

/// Strip Markdown code-fence delimiters from a model response.
pub fn strip_code_fences(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Drop the `data:image/jpeg;base64,` prefix if the caller sent a data URL.
pub fn strip_data_url_prefix(data: &str) -> &str {
    match data.split_once(',') {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => data,
    }
}
