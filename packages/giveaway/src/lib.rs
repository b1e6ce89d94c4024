//! Giveaway Image Analysis Library
//!
//! Turns a single giveaway image (a flyer or social post screenshot) into
//! structured data by coordinating calls to a multimodal model: closing
//! date, prize and category, organizing accounts, and an estimated value
//! in euros.
//!
//! # Pipeline
//!
//! 1. **Extractor** — transcribes the image into raw text plus a visual
//!    description.
//! 2. **Experts** — three independent calls (date, prize, accounts) over
//!    the extracted text, run concurrently.
//! 3. **Appraisal** — a Euro amount already present in the text is used
//!    directly; otherwise one best-effort appraiser call estimates it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//! use giveaway::Analyzer;
//!
//! let analyzer = Analyzer::new(GeminiClient::new(api_key));
//! let result = analyzer.analyze(&image_base64).await?;
//! println!("{} vale {:?}", result.prize.prize, result.price.price);
//! ```
//!
//! # Modules
//!
//! - [`model`] - The model trait seam (Gemini in production, mock in tests)
//! - [`types`] - Per-stage result types and the final merged result
//! - [`prompts`] - Prompt templates and the typed renderer
//! - [`pipeline`] - The orchestrator
//! - [`price`] - Direct Euro-amount extraction
//! - [`testing`] - Mock model for tests

pub mod error;
pub mod model;
pub mod pipeline;
pub mod price;
pub mod prompts;
pub mod testing;
pub mod types;

pub use error::{GiveawayError, Result};
pub use model::Model;
pub use pipeline::Analyzer;
pub use types::{
    AccountsResult, DateResult, ExtractionResult, FinalResult, PriceResult, PrizeCategory,
    PrizeResult,
};
