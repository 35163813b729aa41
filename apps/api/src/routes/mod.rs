pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/resume/suggestions",
            post(handlers::handle_suggestions),
        )
        .route("/api/v1/resume/extract", post(handlers::handle_extract))
        .route("/api/v1/resume/keywords", post(handlers::handle_keywords))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::{ClientMode, ResumeAnalyzer};
    use crate::llm_client::DemoClient;

    fn demo_router() -> Router {
        build_router(AppState {
            analyzer: Arc::new(ResumeAnalyzer::with_client(
                Arc::new(DemoClient),
                ClientMode::Demo,
            )),
        })
    }

    async fn send(
        router: Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_demo_mode() {
        let (status, body) = send(demo_router(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mode"], "demo");
        assert!(body["notice"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_returns_envelope_and_derived_suggestions() {
        let (status, body) = send(
            demo_router(),
            "POST",
            "/api/v1/resume/analyze",
            Some(json!({"resume_text": "Jane Doe, Rust engineer", "job_description": "Rust"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].is_null());
        let analysis: Value = serde_json::from_str(body["analysis"].as_str().unwrap()).unwrap();
        assert_eq!(analysis["job_match"]["alignment_score"], 65);
        assert_eq!(body["suggestions"], analysis["specific_suggestions"]);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_resume() {
        let (status, body) = send(
            demo_router(),
            "POST",
            "/api/v1/resume/analyze",
            Some(json!({"resume_text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_suggestions_endpoint_returns_bounded_list() {
        let (status, body) = send(
            demo_router(),
            "POST",
            "/api/v1/resume/suggestions",
            Some(json!({"resume_text": "Jane Doe, Rust engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!(!suggestions.is_empty() && suggestions.len() <= 7);
    }

    #[tokio::test]
    async fn test_extract_short_text_reports_error_field() {
        let (status, body) = send(
            demo_router(),
            "POST",
            "/api/v1/resume/extract",
            Some(json!({"resume_text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "error": "Resume text is too short or empty",
                "contact_info": {},
                "sections": {}
            })
        );
    }

    #[tokio::test]
    async fn test_keywords_endpoint_compares_with_job() {
        let (status, body) = send(
            demo_router(),
            "POST",
            "/api/v1/resume/keywords",
            Some(json!({
                "resume_text": "Rust engineer. Built services with Docker.",
                "job_description": "Rust and Kubernetes"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_comparison"]["missing_keywords"], json!(["kubernetes"]));
        assert_eq!(body["skills"][0]["skill"], "rust");
        assert_eq!(body["readability"]["sentence_count"], 2);
        assert!(body["contact_info"]["email"].is_null());
    }
}
