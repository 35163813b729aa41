//! Resume Analysis: prompts the hosted model and reshapes its answers.
//!
//! `ResumeAnalyzer` owns one `ChatClient`, chosen once at construction:
//! the live Groq client when a usable credential exists, the demo client
//! otherwise. Each public operation issues at most one request and never
//! fails; failures are folded into the operation's own return shape.
//! The `try_*` variants expose the typed error instead.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{
    strip_json_fences, ChatClient, ChatRequest, DemoClient, GroqClient, LlmError,
};

pub mod handlers;
pub mod keywords;
pub mod models;
pub mod prompts;

use models::{
    backfill_structure, parse_suggestion_lines, structure_error, AnalysisEnvelope,
    StructuredResume,
};
use prompts::{
    analysis_prompt, extraction_prompt, suggestions_prompt, ANALYSIS_SYSTEM, EXTRACTION_SYSTEM,
    SUGGESTIONS_SYSTEM,
};

/// Environment variable holding the Groq API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Model used for analysis and structured extraction.
pub const ANALYSIS_MODEL: &str = "llama3-70b-8192";
/// Smaller model used for quick suggestion lists.
pub const SUGGESTIONS_MODEL: &str = "llama3-8b-8192";

const MAX_SUGGESTIONS: usize = 7;
const MIN_STRUCTURED_INPUT_CHARS: usize = 100;
const NO_SUGGESTIONS_PLACEHOLDER: &str = "Unable to generate suggestions. Please try again.";

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("{0}")]
    MissingDependency(String),

    #[error("{0}")]
    Credential(String),

    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Resume text is too short or empty")]
    InputTooShort,
}

impl From<LlmError> for AnalyzerError {
    fn from(err: LlmError) -> Self {
        let message = err.to_string();
        match err {
            LlmError::Backend(_) => AnalyzerError::MissingDependency(message),
            LlmError::InvalidApiKey(_) => AnalyzerError::Credential(message),
            LlmError::Api { status: 401 | 403, .. } => AnalyzerError::Credential(message),
            LlmError::Http(_) | LlmError::Api { .. } => AnalyzerError::Remote(message),
            LlmError::Parse(_) | LlmError::EmptyContent => {
                AnalyzerError::MalformedResponse(message)
            }
        }
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::MalformedResponse(err.to_string())
    }
}

/// Which client variant the analyzer resolved at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    Live,
    Demo,
}

/// Explicit key if non-blank, else the environment value if non-blank.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    pick_api_key(explicit, std::env::var(API_KEY_ENV).ok())
}

fn pick_api_key(explicit: Option<String>, from_env: Option<String>) -> Option<String> {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| from_env.filter(|k| !k.trim().is_empty()))
}

pub struct ResumeAnalyzer {
    client: Arc<dyn ChatClient>,
    mode: ClientMode,
    init_notice: Option<String>,
}

impl ResumeAnalyzer {
    /// Resolves the credential (argument, then `GROQ_API_KEY`) and builds the client.
    pub fn new(api_key: Option<String>, base_url: &str) -> Self {
        Self::from_credential(resolve_api_key(api_key), base_url)
    }

    /// Builds the client for an already-resolved credential. Any failure
    /// degrades to the demo client.
    pub fn from_credential(api_key: Option<String>, base_url: &str) -> Self {
        let Some(api_key) = api_key else {
            info!(
                "Using demo mode with dummy responses. Set {} for real analysis.",
                API_KEY_ENV
            );
            return Self::demo(None);
        };

        match GroqClient::new(&api_key, base_url) {
            Ok(client) => {
                info!("LLM client initialized (model: {})", ANALYSIS_MODEL);
                Self::with_client(Arc::new(client), ClientMode::Live)
            }
            Err(e) => {
                let notice = init_failure_notice(AnalyzerError::from(e));
                warn!("{notice}");
                Self::demo(Some(notice))
            }
        }
    }

    pub fn with_client(client: Arc<dyn ChatClient>, mode: ClientMode) -> Self {
        Self {
            client,
            mode,
            init_notice: None,
        }
    }

    fn demo(init_notice: Option<String>) -> Self {
        Self {
            client: Arc::new(DemoClient),
            mode: ClientMode::Demo,
            init_notice,
        }
    }

    pub fn mode(&self) -> ClientMode {
        self.mode
    }

    /// Reason the live client could not be built, if initialization failed.
    pub fn init_notice(&self) -> Option<&str> {
        self.init_notice.as_deref()
    }

    /// Full analysis. Returns the model's raw JSON text unparsed.
    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> AnalysisEnvelope {
        match self.try_analyze_resume(resume_text, job_description).await {
            Ok(text) => AnalysisEnvelope::success(text),
            Err(e) => {
                AnalysisEnvelope::failure(format!("Error analyzing resume with Groq: {e}"))
            }
        }
    }

    pub async fn try_analyze_resume(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<String, AnalyzerError> {
        let request = ChatRequest::new(
            ANALYSIS_MODEL,
            ANALYSIS_SYSTEM,
            analysis_prompt(resume_text, job_description),
        )
        .temperature(0.3)
        .max_tokens(4096)
        .json_object();

        self.send(&request).await
    }

    /// Up to seven short suggestions. Errors come back as a single-element list.
    pub async fn generate_ai_suggestions(&self, resume_text: &str) -> Vec<String> {
        match self.try_generate_ai_suggestions(resume_text).await {
            Ok(suggestions) => suggestions,
            Err(e) => vec![format!("Error generating suggestions: {e}")],
        }
    }

    pub async fn try_generate_ai_suggestions(
        &self,
        resume_text: &str,
    ) -> Result<Vec<String>, AnalyzerError> {
        let request = ChatRequest::new(
            SUGGESTIONS_MODEL,
            SUGGESTIONS_SYSTEM,
            suggestions_prompt(resume_text),
        )
        .temperature(0.4)
        .max_tokens(1024);

        let text = self.send(&request).await?;
        let suggestions = parse_suggestion_lines(&text, MAX_SUGGESTIONS);
        if suggestions.is_empty() {
            return Ok(vec![NO_SUGGESTIONS_PLACEHOLDER.to_string()]);
        }
        Ok(suggestions)
    }

    /// Contact info and major sections as a JSON object. Both keys are
    /// always present; failures add an `error` field.
    pub async fn extract_structured_information(&self, resume_text: &str) -> StructuredResume {
        match self.try_extract_structured_information(resume_text).await {
            Ok(data) => data,
            Err(AnalyzerError::InputTooShort) => {
                structure_error(AnalyzerError::InputTooShort.to_string())
            }
            Err(e) => structure_error(format!("Error extracting structured information: {e}")),
        }
    }

    pub async fn try_extract_structured_information(
        &self,
        resume_text: &str,
    ) -> Result<StructuredResume, AnalyzerError> {
        if resume_text.trim().chars().count() < MIN_STRUCTURED_INPUT_CHARS {
            return Err(AnalyzerError::InputTooShort);
        }

        let request = ChatRequest::new(
            ANALYSIS_MODEL,
            EXTRACTION_SYSTEM,
            extraction_prompt(resume_text),
        )
        .temperature(0.2)
        .max_tokens(4000)
        .json_object();

        let text = self.send(&request).await?;
        match serde_json::from_str::<Value>(strip_json_fences(&text))? {
            Value::Object(data) => Ok(backfill_structure(data)),
            other => Err(AnalyzerError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, AnalyzerError> {
        let completion = self.client.complete(request).await.map_err(|e| {
            warn!("{} request to {} failed: {e}", request.model, self.client.name());
            AnalyzerError::from(e)
        })?;
        Ok(completion.into_text()?)
    }
}

/// Message recorded when the live client cannot be built.
fn init_failure_notice(err: AnalyzerError) -> String {
    match err {
        AnalyzerError::MissingDependency(msg) => format!("Error: {msg}. Using demo client."),
        other => format!("Warning: Using demo client for demonstration. Error: {other}"),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
