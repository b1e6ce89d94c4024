//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use giveaway::{Analyzer, Model};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{analyze_handler, appraise_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer<Box<dyn Model>>>,
}

/// Build the Axum application router.
///
/// The analyzer is boxed behind the [`Model`] trait so tests can wire in a
/// mock model through the same entry point the binary uses.
pub fn build_app(model: Box<dyn Model>) -> Router {
    let state = AppState {
        analyzer: Arc::new(Analyzer::new(model)),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/appraise", post(appraise_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use giveaway::testing::MockModel;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app_with(mock: MockModel) -> Router {
        build_app(Box::new(mock))
    }

    fn happy_mock() -> MockModel {
        MockModel::new()
            .with_response(
                "transcriptor experto",
                json!({
                    "raw_text": "Sorteo finaliza el 25 de diciembre, premio: iPhone 15, organiza @tienda1, valor 999€",
                    "visual_description": "un iPhone sobre una mesa"
                }),
            )
            .with_response(
                "experto en fechas",
                json!({ "date": "2024-12-25", "ends_at_time": null, "is_priority_time": false }),
            )
            .with_response(
                "identificar premios",
                json!({ "prize": "iPhone 15", "prize_category": "smartphone", "confidence_score": 0.95 }),
            )
            .with_response("cuentas que organizan", json!({ "accounts": ["@tienda1"] }))
    }

    #[tokio::test]
    async fn get_on_analyze_is_method_not_allowed() {
        let app = app_with(MockModel::new());
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/analyze")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn analyze_without_image_is_bad_request() {
        let app = app_with(MockModel::new());
        let response = app.oneshot(post_json("/analyze", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn analyze_happy_path_returns_final_result() {
        let app = app_with(happy_mock());
        let response = app
            .oneshot(post_json("/analyze", json!({ "base64Data": "aW1n" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["date"], "2024-12-25");
        assert_eq!(body["prize"], "iPhone 15");
        assert_eq!(body["accounts"][0], "@tienda1");
        assert_eq!(body["price"], "999€");
    }

    #[tokio::test]
    async fn analyze_failure_returns_500_with_details() {
        let mock = MockModel::new().with_failure("transcriptor experto");
        let app = app_with(mock);
        let response = app
            .oneshot(post_json("/analyze", json!({ "base64Data": "aW1n" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body.get("error").is_some());
        assert!(body.get("details").is_some());
    }

    #[tokio::test]
    async fn appraise_without_prize_name_is_bad_request() {
        let app = app_with(MockModel::new());
        let response = app
            .oneshot(post_json("/appraise", json!({ "accounts_list": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn appraise_returns_price_result() {
        let mock = MockModel::new().with_response(
            "tasador de premios",
            json!({
                "price": "950€",
                "winner_count": 1,
                "appraisal_notes": "precio oficial",
                "url": null
            }),
        );
        let app = app_with(mock);
        let response = app
            .oneshot(post_json(
                "/appraise",
                json!({ "prize_name": "iPhone 15", "accounts_list": ["@tienda1"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["price"], "950€");
    }

    #[tokio::test]
    async fn appraise_model_failure_still_returns_200_default() {
        let mock = MockModel::new().with_failure("tasador de premios");
        let app = app_with(mock);
        let response = app
            .oneshot(post_json(
                "/appraise",
                json!({ "prize_name": "iPhone 15", "accounts_list": ["@tienda1"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["price"], Value::Null);
        assert_eq!(body["winner_count"], 1);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app_with(MockModel::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
