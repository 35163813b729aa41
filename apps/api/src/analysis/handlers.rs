//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::keywords::{keyword_report, KeywordReport};
use crate::analysis::models::{suggestions_from_analysis, AnalysisEnvelope, StructuredResume};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub envelope: AnalysisEnvelope,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

fn require_resume_text(resume_text: &str) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/resume/analyze
///
/// Full model analysis plus the suggestion list derived from it.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    require_resume_text(&request.resume_text)?;

    let envelope = state
        .analyzer
        .analyze_resume(&request.resume_text, request.job_description.as_deref())
        .await;
    let suggestions = suggestions_from_analysis(&envelope);

    Ok(Json(AnalyzeResponse {
        envelope,
        suggestions,
    }))
}

/// POST /api/v1/resume/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<ResumeTextRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    require_resume_text(&request.resume_text)?;

    let suggestions = state
        .analyzer
        .generate_ai_suggestions(&request.resume_text)
        .await;

    Ok(Json(SuggestionsResponse { suggestions }))
}

/// POST /api/v1/resume/extract
///
/// Short input is answered with an `error` field rather than a 400,
/// matching the analyzer's own contract.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ResumeTextRequest>,
) -> Json<StructuredResume> {
    Json(
        state
            .analyzer
            .extract_structured_information(&request.resume_text)
            .await,
    )
}

/// POST /api/v1/resume/keywords
///
/// Local analysis only. CPU-bound, so it runs on the blocking pool.
pub async fn handle_keywords(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<KeywordReport>, AppError> {
    require_resume_text(&request.resume_text)?;

    let report = tokio::task::spawn_blocking(move || {
        keyword_report(&request.resume_text, request.job_description.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(report))
}
