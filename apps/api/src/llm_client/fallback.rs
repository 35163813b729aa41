//! Demo client: canned responses used when no API credential is configured.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ChatClient, ChatCompletion, ChatRequest, LlmError};

/// Marker the analysis prompt carries when a job description comparison was requested.
pub const JOB_DESCRIPTION_MARKER: &str = "JOB DESCRIPTION";

/// Stand-in for the hosted API. Stateless and deterministic; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoClient;

impl DemoClient {
    /// Builds the canned analysis payload for a given user message.
    pub fn canned_analysis(user_message: &str) -> Value {
        let mut payload = json!({
            "overall_assessment": "This is a dummy analysis generated for demonstration purposes. To get real AI-powered analysis, set GROQ_API_KEY to a valid Groq API key.",
            "key_strengths": [
                "Strong structure and organization",
                "Good use of action verbs",
                "Clear presentation of experience"
            ],
            "improvement_areas": [
                "Add more quantifiable achievements",
                "Enhance skills section",
                "Tailor content to target roles"
            ],
            "specific_suggestions": [
                "Include metrics and specific outcomes for your achievements",
                "Add a strong professional summary at the top",
                "Use more industry-specific keywords",
                "Ensure consistent formatting throughout"
            ],
            "structure_feedback": "The resume has a clear structure with defined sections, making it easy to navigate. Consider using more bullet points for better readability.",
            "language_feedback": "The language is professional and concise. You've used some good action verbs, but could incorporate more powerful verbs like 'spearheaded', 'orchestrated', or 'transformed'.",
            "red_flags": [
                "Some job descriptions are too generic",
                "Skills section could be more comprehensive"
            ]
        });

        if user_message.contains(JOB_DESCRIPTION_MARKER) {
            payload["job_match"] = json!({
                "match_assessment": "This is a dummy job match assessment. To get a real analysis, please provide a valid Groq API key.",
                "missing_keywords": [
                    "project management",
                    "agile",
                    "scrum",
                    "stakeholder communication",
                    "budget planning"
                ],
                "alignment_score": 65,
                "recommendations": [
                    "Add more keywords from the job description",
                    "Emphasize relevant experience more prominently",
                    "Highlight specific skills requested in the job posting"
                ]
            });
        }

        payload
    }
}

#[async_trait]
impl ChatClient for DemoClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        let payload = Self::canned_analysis(request.user_message());
        Ok(ChatCompletion::from_text(payload.to_string()))
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYSIS_KEYS: [&str; 7] = [
        "overall_assessment",
        "key_strengths",
        "improvement_areas",
        "specific_suggestions",
        "structure_feedback",
        "language_feedback",
        "red_flags",
    ];

    #[test]
    fn test_canned_analysis_has_seven_keys_without_marker() {
        let payload = DemoClient::canned_analysis("RESUME TEXT:\nJane Doe");
        let obj = payload.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        for key in ANALYSIS_KEYS {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(!obj.contains_key("job_match"));
    }

    #[test]
    fn test_canned_analysis_adds_job_match_on_marker() {
        let payload = DemoClient::canned_analysis("... JOB DESCRIPTION:\nRust engineer");
        let job_match = &payload["job_match"];
        assert_eq!(job_match["alignment_score"], 65);
        assert_eq!(job_match["missing_keywords"].as_array().unwrap().len(), 5);
        assert_eq!(job_match["recommendations"].as_array().unwrap().len(), 3);
        assert!(job_match["match_assessment"].is_string());
    }

    #[tokio::test]
    async fn test_demo_client_returns_json_text() {
        let request = ChatRequest::new("llama3-70b-8192", "system", "resume".to_string());
        let text = DemoClient.complete(&request).await.unwrap().into_text().unwrap();
        let decoded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded["specific_suggestions"].as_array().unwrap().len(), 4);
    }
}
