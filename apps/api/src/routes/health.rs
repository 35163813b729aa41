use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and whether the analyzer runs live or in demo mode.
/// `notice` carries the reason the live client could not be built, if any.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "mode": state.analyzer.mode(),
        "notice": state.analyzer.init_notice(),
    }))
}
