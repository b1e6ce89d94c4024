//! POST /appraise — standalone prize appraisal.
//!
//! Reused by a client flow that already knows the prize; no image and no
//! preceding pipeline stages. Appraisal failures never surface to the
//! caller: the analyzer degrades to the default "no explicit value" result,
//! so this handler only rejects malformed input.

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
pub struct AppraiseRequest {
    pub prize_name: Option<String>,
    #[serde(default)]
    pub accounts_list: Vec<String>,
}

/// Accepts `{ "prize_name": "...", "accounts_list": [...] }` and returns a
/// price result. 400 when `prize_name` is missing.
pub async fn appraise_handler(
    State(state): State<AppState>,
    Json(body): Json<AppraiseRequest>,
) -> Response {
    let Some(prize_name) = body.prize_name.filter(|p| !p.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no prize name provided" })),
        )
            .into_response();
    };

    let result = state
        .analyzer
        .appraise(&prize_name, &body.accounts_list)
        .await;

    (StatusCode::OK, Json(result)).into_response()
}
