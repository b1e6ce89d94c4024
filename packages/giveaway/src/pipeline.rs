//! The analysis pipeline: extract, expert fan-out, assemble, appraise.
//!
//! Strictly linear with one parallel stage. The extractor and the three
//! experts are all-or-nothing; appraisal is best-effort and degrades to
//! [`PriceResult::no_value`] on any failure (see DESIGN.md for the failure
//! policy). Every model call is attempted exactly once.

use chrono::Local;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{GiveawayError, Result};
use crate::model::Model;
use crate::price::extract_price;
use crate::prompts::{
    format_accounts_prompt, format_appraiser_prompt, format_date_prompt,
    format_prize_prompt, long_spanish_date, EXTRACTOR_PROMPT,
};
use crate::types::{
    AccountsResult, DateResult, ExtractionResult, FinalResult, PriceResult, PrizeResult,
};

/// Runs the giveaway analysis pipeline against a [`Model`].
pub struct Analyzer<M> {
    model: M,
}

impl<M: Model> Analyzer<M> {
    /// Create an analyzer backed by the given model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Analyze a giveaway image (base64-encoded JPEG).
    ///
    /// Stages, in order:
    /// 1. extractor (with the image) — aborts everything on failure
    /// 2. date / prize / accounts experts, fanned out concurrently —
    ///    any one failing fails the stage
    /// 3. conditional appraisal: a Euro amount in the raw text skips the
    ///    appraiser call; otherwise one best-effort appraiser call
    /// 4. assembly of the final result by field assignment
    pub async fn analyze(&self, image_base64: &str) -> Result<FinalResult> {
        let extracted = self.extract(image_base64).await?;
        info!(
            raw_text_len = extracted.raw_text.len(),
            "image text extracted"
        );

        let today = long_spanish_date(Local::now().date_naive());
        let date_prompt = format_date_prompt(&today, &extracted.raw_text)?;
        let prize_prompt =
            format_prize_prompt(&extracted.raw_text, &extracted.visual_description);
        let accounts_prompt = format_accounts_prompt(&extracted.raw_text);

        let (date, prize, accounts) = tokio::try_join!(
            self.expert::<DateResult>("date", &date_prompt),
            self.expert::<PrizeResult>("prize", &prize_prompt),
            self.expert::<AccountsResult>("accounts", &accounts_prompt),
        )?;
        debug!(
            ?date.date,
            %prize.prize,
            account_count = accounts.accounts.len(),
            "experts resolved"
        );

        let price = match extract_price(&extracted.raw_text) {
            Some(amount) => {
                info!(%amount, "price found in raw text, skipping appraiser");
                PriceResult::direct(amount)
            }
            None => self.appraise(&prize.prize, &accounts.accounts).await,
        };

        Ok(FinalResult {
            date,
            prize,
            accounts,
            price,
        })
    }

    /// Appraise a prize's market value. Never fails: any error degrades to
    /// the default "no explicit value" result.
    pub async fn appraise(&self, prize_name: &str, accounts: &[String]) -> PriceResult {
        match self.try_appraise(prize_name, accounts).await {
            Ok(price) => price,
            Err(error) => {
                warn!(%error, "appraisal failed, returning default");
                PriceResult::no_value()
            }
        }
    }

    async fn try_appraise(
        &self,
        prize_name: &str,
        accounts: &[String],
    ) -> Result<PriceResult> {
        let prompt = format_appraiser_prompt(prize_name, accounts)?;
        let value = self.model.generate(&prompt, None).await?;
        serde_json::from_value(value).map_err(|source| GiveawayError::Stage {
            stage: "appraiser",
            source,
        })
    }

    /// Run the extractor against the image and validate its payload.
    async fn extract(&self, image_base64: &str) -> Result<ExtractionResult> {
        let value = self.model.generate(EXTRACTOR_PROMPT, Some(image_base64)).await?;

        if let Some(reason) = value.get("error").and_then(|e| e.as_str()) {
            return Err(GiveawayError::Extractor {
                reason: reason.to_string(),
            });
        }

        let raw_text = value
            .get("raw_text")
            .and_then(|v| v.as_str())
            .ok_or(GiveawayError::MissingField {
                stage: "extractor",
                field: "raw_text",
            })?
            .to_string();
        let visual_description = value
            .get("visual_description")
            .and_then(|v| v.as_str())
            .ok_or(GiveawayError::MissingField {
                stage: "extractor",
                field: "visual_description",
            })?
            .to_string();

        Ok(ExtractionResult {
            raw_text,
            visual_description,
        })
    }

    /// Run one expert call and parse its JSON into the stage's result type.
    async fn expert<T: DeserializeOwned>(
        &self,
        stage: &'static str,
        prompt: &str,
    ) -> Result<T> {
        let value = self.model.generate(prompt, None).await?;
        serde_json::from_value(value).map_err(|source| GiveawayError::Stage { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::MockModel;
    use crate::types::PrizeCategory;

    // Stable fragments identifying each prompt template.
    const EXTRACTOR: &str = "transcriptor experto";
    const DATE: &str = "experto en fechas";
    const PRIZE: &str = "identificar premios";
    const ACCOUNTS: &str = "cuentas que organizan";
    const APPRAISER: &str = "tasador de premios";

    fn mock_with_experts(raw_text: &str) -> MockModel {
        MockModel::new()
            .with_response(
                EXTRACTOR,
                json!({
                    "raw_text": raw_text,
                    "visual_description": "un iPhone sobre fondo rojo"
                }),
            )
            .with_response(
                DATE,
                json!({
                    "date": "2024-12-25",
                    "ends_at_time": null,
                    "is_priority_time": false
                }),
            )
            .with_response(
                PRIZE,
                json!({
                    "prize": "iPhone 15",
                    "prize_category": "smartphone",
                    "confidence_score": 0.95
                }),
            )
            .with_response(ACCOUNTS, json!({ "accounts": ["@tienda1"] }))
    }

    #[tokio::test]
    async fn direct_price_skips_appraiser() {
        let mock = mock_with_experts("Premio de 45,50€ para quien participe");
        let analyzer = Analyzer::new(mock);

        let result = analyzer.analyze("aW1n").await.unwrap();

        assert_eq!(result.price.price.as_deref(), Some("45.50€"));
        assert_eq!(result.price.winner_count, 1);
        assert_eq!(analyzer.model.calls_matching(APPRAISER).len(), 0);
        // extractor + 3 experts, nothing else
        assert_eq!(analyzer.model.call_count(), 4);
    }

    #[tokio::test]
    async fn appraiser_invoked_once_with_merged_inputs() {
        let mock = mock_with_experts("Sorteo sin valor indicado")
            .with_response(
                APPRAISER,
                json!({
                    "price": "950€",
                    "winner_count": 1,
                    "appraisal_notes": "precio oficial de lanzamiento",
                    "url": "https://example.com/iphone-15"
                }),
            );
        let analyzer = Analyzer::new(mock);

        let result = analyzer.analyze("aW1n").await.unwrap();

        assert_eq!(result.price.price.as_deref(), Some("950€"));
        let appraiser_calls = analyzer.model.calls_matching(APPRAISER);
        assert_eq!(appraiser_calls.len(), 1);
        // Prize name and joined account list interpolated into the prompt
        assert!(appraiser_calls[0].prompt.contains("iPhone 15"));
        assert!(appraiser_calls[0].prompt.contains("@tienda1"));
    }

    #[tokio::test]
    async fn final_result_is_union_of_all_stage_keys() {
        let mock = mock_with_experts("valor 999€, organiza @tienda1");
        let analyzer = Analyzer::new(mock);

        let result = analyzer.analyze("aW1n").await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "date",
            "ends_at_time",
            "is_priority_time",
            "prize",
            "prize_category",
            "confidence_score",
            "accounts",
            "price",
            "winner_count",
            "appraisal_notes",
            "url",
        ] {
            assert!(json.get(key).is_some(), "missing key: {key}");
        }
    }

    #[tokio::test]
    async fn extractor_error_field_aborts_before_experts() {
        let mock = MockModel::new().with_response(
            EXTRACTOR,
            json!({ "error": "la imagen no contiene texto" }),
        );
        let analyzer = Analyzer::new(mock);

        let err = analyzer.analyze("aW1n").await.unwrap_err();

        assert!(matches!(err, GiveawayError::Extractor { .. }));
        assert_eq!(analyzer.model.call_count(), 1);
    }

    #[tokio::test]
    async fn extractor_missing_raw_text_aborts_before_experts() {
        let mock = MockModel::new().with_response(
            EXTRACTOR,
            json!({ "visual_description": "solo una foto" }),
        );
        let analyzer = Analyzer::new(mock);

        let err = analyzer.analyze("aW1n").await.unwrap_err();

        assert!(matches!(
            err,
            GiveawayError::MissingField {
                stage: "extractor",
                field: "raw_text"
            }
        ));
        assert_eq!(analyzer.model.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_expert_fails_the_stage() {
        let mock = mock_with_experts("texto cualquiera").with_failure(DATE);
        let analyzer = Analyzer::new(mock);

        let err = analyzer.analyze("aW1n").await.unwrap_err();
        assert!(matches!(err, GiveawayError::Model(_)));
    }

    #[tokio::test]
    async fn appraiser_failure_degrades_to_default() {
        let mock = mock_with_experts("sin precio en el texto").with_failure(APPRAISER);
        let analyzer = Analyzer::new(mock);

        let result = analyzer.analyze("aW1n").await.unwrap();

        assert_eq!(result.price.price, None);
        assert_eq!(result.price.winner_count, 1);
        assert_eq!(result.price.url, None);
    }

    #[tokio::test]
    async fn standalone_appraise_swallows_failures() {
        let mock = MockModel::new().with_failure(APPRAISER);
        let analyzer = Analyzer::new(mock);

        let result = analyzer
            .appraise("iPhone 15", &["@tienda1".to_string()])
            .await;

        assert_eq!(result.price, None);
        assert_eq!(result.winner_count, 1);
    }

    #[tokio::test]
    async fn flyer_example_end_to_end() {
        // "Sorteo finaliza el 25 de diciembre, premio: iPhone 15,
        //  organiza @tienda1, valor 999€"
        let mock = mock_with_experts(
            "Sorteo finaliza el 25 de diciembre, premio: iPhone 15, organiza @tienda1, valor 999€",
        );
        let analyzer = Analyzer::new(mock);

        let result = analyzer.analyze("aW1n").await.unwrap();

        assert_eq!(result.date.date.as_deref(), Some("2024-12-25"));
        assert!(result.prize.prize.contains("iPhone 15"));
        assert_eq!(result.prize.prize_category, PrizeCategory::Smartphone);
        assert_eq!(result.accounts.accounts, vec!["@tienda1".to_string()]);
        assert_eq!(result.price.price.as_deref(), Some("999€"));
    }

    #[tokio::test]
    async fn extractor_is_the_only_call_with_an_image() {
        let mock = mock_with_experts("valor 10€");
        let analyzer = Analyzer::new(mock);

        analyzer.analyze("aW1n").await.unwrap();

        let calls = analyzer.model.calls();
        let with_image: Vec<_> = calls.iter().filter(|c| c.has_image).collect();
        assert_eq!(with_image.len(), 1);
        assert!(with_image[0].prompt.contains(EXTRACTOR));
    }
}
