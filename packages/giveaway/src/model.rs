//! Model trait: the seam between the pipeline and the Gemini API.
//!
//! The pipeline only needs one capability: send a prompt (optionally with
//! an image) and get parsed JSON back. Implementations wrap a real provider
//! ([`GeminiClient`]) or canned responses ([`crate::testing::MockModel`]).

use async_trait::async_trait;
use gemini_client::GeminiClient;

/// A generative model that answers a prompt with a JSON value.
#[async_trait]
pub trait Model: Send + Sync {
    /// Run one model call. `image_base64` attaches an inline JPEG when set.
    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> gemini_client::Result<serde_json::Value>;
}

#[async_trait]
impl Model for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> gemini_client::Result<serde_json::Value> {
        self.generate_json(prompt, image_base64).await
    }
}

#[async_trait]
impl Model for Box<dyn Model> {
    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> gemini_client::Result<serde_json::Value> {
        (**self).generate(prompt, image_base64).await
    }
}
