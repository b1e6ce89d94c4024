//! POST /analyze — run the full pipeline against one image.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::app::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    /// Base64-encoded JPEG (a data-URL prefix is tolerated)
    #[serde(rename = "base64Data")]
    pub base64_data: Option<String>,
}

/// Accepts `{ "base64Data": "..." }` and returns the merged analysis.
///
/// 400 when the image is missing, 500 with `{ error, details }` when any
/// strict pipeline stage fails.
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let Some(image) = body.base64_data.filter(|d| !d.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no image provided" })),
        )
            .into_response();
    };

    match state.analyzer.analyze(&image).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            tracing::error!(%error, "analysis pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "AI pipeline failed",
                    "details": error.to_string(),
                })),
            )
                .into_response()
        }
    }
}
