use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resolved once at startup; read-only afterwards.
    pub analyzer: Arc<ResumeAnalyzer>,
}
