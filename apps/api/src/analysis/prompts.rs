// All LLM prompt constants for the Analysis module.
// Templates carry one placeholder each; substitute with `str::replace`.

/// System prompt for the full resume analysis.
pub const ANALYSIS_SYSTEM: &str = "You are an expert resume analyzer that provides detailed, \
    professional feedback in JSON format.";

/// Resume analysis prompt. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert resume analyzer and career coach. Analyze the following resume and provide detailed feedback.

RESUME TEXT:
{resume_text}

Provide a comprehensive analysis including:
1. Overall assessment of the resume's strengths and weaknesses
2. Clear, specific improvement suggestions prioritized by importance
3. Assessment of the resume's organization and structure
4. Evaluation of the language, action verbs, and achievement descriptions
5. Any red flags or issues that might concern employers

IMPORTANT: Your response MUST be a valid JSON object with EXACTLY this structure:
{
  "overall_assessment": "text",
  "key_strengths": ["strength1", "strength2", "strength3"],
  "improvement_areas": ["area1", "area2", "area3"],
  "specific_suggestions": ["suggestion1", "suggestion2", "suggestion3"],
  "structure_feedback": "text",
  "language_feedback": "text",
  "red_flags": ["flag1", "flag2"]
}
"#;

/// Job comparison block appended to the analysis prompt.
/// Replace `{job_description}` before sending. Contains the `JOB DESCRIPTION`
/// marker the demo client keys on.
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"

ADDITIONAL ANALYSIS - JOB DESCRIPTION COMPARISON:
Compare the resume to the following job description and add a 'job_match' section to your response:

JOB DESCRIPTION:
{job_description}

Add this EXACT structure to your JSON:
{
  "job_match": {
    "match_assessment": "text",
    "missing_keywords": ["keyword1", "keyword2", "keyword3"],
    "alignment_score": 75,
    "recommendations": ["rec1", "rec2", "rec3"]
  }
}

alignment_score MUST be an integer between 0 and 100.

IMPORTANT: Ensure the final JSON is valid and properly formatted with all closing braces and brackets.
"#;

/// System prompt for short suggestion lists.
pub const SUGGESTIONS_SYSTEM: &str =
    "You are a resume improvement expert that provides concise, actionable suggestions.";

/// Suggestion prompt. Replace `{resume_text}` before sending.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"You are an expert resume coach. Based on the following resume, provide 5-7 specific, actionable suggestions for improvement. Focus on clarity, impact, and marketability.

RESUME TEXT:
{resume_text}

Provide ONLY a list of specific suggestions, each 1-2 sentences long.
"#;

/// System prompt for structured extraction.
pub const EXTRACTION_SYSTEM: &str =
    "You are an expert resume parser that extracts structured information in JSON format.";

/// Structured extraction prompt. Replace `{resume_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are an expert resume parser. Extract structured information from the following resume text. Identify the contact information and major sections.

RESUME TEXT:
{resume_text}

Your response MUST be a well-formed JSON with EXACTLY this structure:
{
  "contact_info": {
    "name": "John Doe",
    "email": "johndoe@example.com",
    "phone": "123-456-7890",
    "linkedin": "linkedin.com/in/johndoe",
    "github": "github.com/johndoe",
    "website": "johndoe.com"
  },
  "sections": {
    "summary": "Text from summary section",
    "experience": "Text from experience section",
    "education": "Text from education section",
    "skills": "Text from skills section",
    "projects": "Text from projects section",
    "certifications": "Text from certifications section"
  }
}

IMPORTANT: If a field is not found in the resume, use an empty string for text fields or empty object ({}) for objects. Ensure all fields exist even if empty.
"#;

/// Builds the analysis prompt, appending the job comparison block when a
/// non-empty job description is supplied.
pub fn analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let mut prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    if let Some(jd) = job_description.filter(|jd| !jd.is_empty()) {
        prompt.push_str(&JOB_MATCH_PROMPT_TEMPLATE.replace("{job_description}", jd));
    }
    prompt
}

pub fn suggestions_prompt(resume_text: &str) -> String {
    SUGGESTIONS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn extraction_prompt(resume_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
