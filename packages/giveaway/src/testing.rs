//! Testing utilities including a mock model.
//!
//! Useful for exercising the pipeline (and applications built on it)
//! without making real Gemini calls.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use gemini_client::GeminiError;
use serde_json::Value;

use crate::model::Model;

/// A mock model for tests.
///
/// Responses are keyed by a fragment of the prompt (each prompt template
/// opens with a distinctive role line), and every call is recorded so tests
/// can assert on call counts and interpolated prompt content.
#[derive(Default)]
pub struct MockModel {
    /// (prompt fragment, canned response) pairs, first match wins
    responses: Arc<RwLock<Vec<(String, Value)>>>,

    /// Prompt fragments whose calls fail with an API error
    failures: Arc<RwLock<Vec<String>>>,

    /// Every call made, in order
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

/// Record of one call made to the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The full rendered prompt
    pub prompt: String,

    /// Whether an image was attached
    pub has_image: bool,
}

impl MockModel {
    /// Create a mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned response for prompts containing `fragment`.
    pub fn with_response(self, fragment: impl Into<String>, response: Value) -> Self {
        self.responses
            .write()
            .expect("mock lock poisoned")
            .push((fragment.into(), response));
        self
    }

    /// Make calls whose prompt contains `fragment` fail with an API error.
    pub fn with_failure(self, fragment: impl Into<String>) -> Self {
        self.failures
            .write()
            .expect("mock lock poisoned")
            .push(fragment.into());
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().expect("mock lock poisoned").clone()
    }

    /// Total number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().expect("mock lock poisoned").len()
    }

    /// Calls whose prompt contains `fragment`.
    pub fn calls_matching(&self, fragment: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.prompt.contains(fragment))
            .collect()
    }
}

#[async_trait]
impl Model for MockModel {
    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> gemini_client::Result<Value> {
        self.calls.write().expect("mock lock poisoned").push(RecordedCall {
            prompt: prompt.to_string(),
            has_image: image_base64.is_some(),
        });

        let failing = self
            .failures
            .read()
            .expect("mock lock poisoned")
            .iter()
            .any(|f| prompt.contains(f));
        if failing {
            return Err(GeminiError::Api("mock failure".into()));
        }

        self.responses
            .read()
            .expect("mock lock poisoned")
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment))
            .map(|(_, response)| response.clone())
            .ok_or_else(|| {
                let head: String = prompt.chars().take(60).collect();
                GeminiError::Api(format!("no mock response for prompt: {head}"))
            })
    }
}
