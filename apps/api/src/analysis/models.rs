use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result envelope of `analyze_resume`. Exactly one of the two fields is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub analysis: Option<String>,
    pub error: Option<String>,
}

impl AnalysisEnvelope {
    pub fn success(analysis: String) -> Self {
        Self {
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            analysis: None,
            error: Some(error),
        }
    }
}

/// The two analysis fields suggestion derivation reads. Missing fields
/// default to empty and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    pub improvement_areas: Vec<String>,
    pub specific_suggestions: Vec<String>,
}

/// Derives the suggestion list shown next to an analysis: the model's
/// specific suggestions, falling back to its improvement areas.
pub fn suggestions_from_analysis(envelope: &AnalysisEnvelope) -> Vec<String> {
    if let Some(error) = &envelope.error {
        return vec![format!("Error with Groq analysis: {error}")];
    }

    let text = envelope.analysis.as_deref().unwrap_or_default();
    match serde_json::from_str::<AnalysisReport>(text) {
        Ok(report) if !report.specific_suggestions.is_empty() => report.specific_suggestions,
        Ok(report) => report.improvement_areas,
        Err(e) => vec![format!("Error parsing Groq analysis: {e}")],
    }
}

/// Structured extraction result: the decoded model output, with
/// `contact_info` and `sections` always present.
pub type StructuredResume = Map<String, Value>;

pub const CONTACT_INFO_KEY: &str = "contact_info";
pub const SECTIONS_KEY: &str = "sections";

/// Inserts empty objects for `contact_info` and `sections` if absent.
pub fn backfill_structure(mut data: StructuredResume) -> StructuredResume {
    for key in [CONTACT_INFO_KEY, SECTIONS_KEY] {
        data.entry(key).or_insert_with(|| Value::Object(Map::new()));
    }
    data
}

/// `{error, contact_info: {}, sections: {}}`
pub fn structure_error(message: String) -> StructuredResume {
    let mut data = Map::new();
    data.insert("error".to_string(), Value::String(message));
    backfill_structure(data)
}

/// Splits free-text model output into at most `limit` suggestions.
/// Each line is trimmed of whitespace, then of `-` and space characters;
/// lines left empty are dropped.
pub fn parse_suggestion_lines(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_matches(|c| c == '-' || c == ' '))
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(String::from)
        .collect()
}
