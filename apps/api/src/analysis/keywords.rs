//! Local keyword analysis. Deterministic, no LLM call.
//!
//! Skill detection, word frequency, keyword overlap with a job description,
//! Flesch readability, contact details and rule-based improvement hints.
//! Runs on raw resume text only.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Default skills checked when the caller supplies no list.
const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "c++", "c#", "ruby", "php", "swift", "kotlin", "go", "rust",
    "typescript", "scala", "r", "matlab",
    // Web development
    "html", "css", "react", "angular", "vue", "node", "express", "django", "flask", "spring",
    "asp.net", "laravel", "bootstrap", "jquery", "webpack", "rest api",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "oracle", "sqlite", "nosql", "redis", "firebase",
    "dynamodb",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "ci/cd", "terraform", "ansible",
    "git", "github", "bitbucket", "gitlab", "devops",
    // Data science
    "data science", "machine learning", "deep learning", "ai", "artificial intelligence",
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras", "opencv", "nlp",
    "computer vision", "data mining", "data visualization", "tableau", "power bi",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "mobile development",
    // Soft skills
    "leadership", "teamwork", "communication", "problem solving", "analytical",
    "critical thinking", "time management", "project management", "agile", "scrum",
];

const ACTION_VERBS: &[&str] = &[
    "managed", "led", "developed", "created", "implemented", "designed", "achieved", "improved",
    "increased", "reduced", "negotiated", "coordinated", "conducted", "analyzed", "organized",
];

const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

const SHORT_RESUME_TOKENS: usize = 200;
const LONG_RESUME_TOKENS: usize = 1000;
const MIN_ACTION_VERBS: usize = 3;
const MIN_NUMBERS: usize = 3;
/// Flesch reading ease below this reads as dense text.
const LOW_READABILITY: f64 = 30.0;
pub const DEFAULT_TOP_WORDS: usize = 20;

/// Substrings that disqualify a website candidate.
const NON_WEBSITE_HINTS: &[&str] = &["linkedin", "github", "@", "gmail", "yahoo", "hotmail"];

static EMAIL: OnceLock<Regex> = OnceLock::new();
static NUMBER: OnceLock<Regex> = OnceLock::new();
static WORD: OnceLock<Regex> = OnceLock::new();
static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
static VOWEL_GROUP: OnceLock<Regex> = OnceLock::new();
static PHONE: OnceLock<Regex> = OnceLock::new();
static LINKEDIN: OnceLock<Regex> = OnceLock::new();
static GITHUB: OnceLock<Regex> = OnceLock::new();
static WEBSITE: OnceLock<Regex> = OnceLock::new();
static DEFAULT_SKILL_PATTERNS: OnceLock<Vec<(String, Regex)>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    compiled(&EMAIL, r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
}

fn number_pattern() -> &'static Regex {
    compiled(&NUMBER, r"\b\d+\b")
}

fn word_pattern() -> &'static Regex {
    compiled(&WORD, r"\w+(?:['’-]\w+)*")
}

fn sentence_end_pattern() -> &'static Regex {
    compiled(&SENTENCE_END, r"[.!?]+(?:\s|$)")
}

fn vowel_group_pattern() -> &'static Regex {
    compiled(&VOWEL_GROUP, "[aeiouy]+")
}

/// Whole-word pattern for one lowercased skill.
///
/// `\b` is only placed on an edge that is a word character. A skill such as
/// `c++` or `c#` therefore matches at the start of a word and may be followed
/// by anything, where a `\b` after the symbol would never match before a space.
fn skill_pattern(skill: &str) -> Option<Regex> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if skill.starts_with(is_word) { r"\b" } else { "" };
    let trail = if skill.ends_with(is_word) { r"\b" } else { "" };
    Regex::new(&format!("{lead}{}{trail}", regex::escape(skill))).ok()
}

fn default_skill_patterns() -> &'static [(String, Regex)] {
    DEFAULT_SKILL_PATTERNS.get_or_init(|| {
        DEFAULT_SKILLS
            .iter()
            .filter_map(|skill| Some((skill.to_string(), skill_pattern(skill)?)))
            .collect()
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobComparison {
    /// Share of the job description's distinct keywords found in the resume, 0-100.
    pub match_percentage: f64,
    pub matching_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Flesch scores over word, sentence and syllable counts. Syllables come
/// from vowel groups, so scores are close to, not equal to, dictionary-based
/// tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readability {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub sentence_count: usize,
    pub word_count: usize,
    pub syllable_count: usize,
}

/// First match of each contact pattern. Email, LinkedIn, GitHub and website
/// are reported lowercased.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub skills: Vec<SkillCount>,
    pub top_words: Vec<WordCount>,
    pub job_comparison: Option<JobComparison>,
    pub readability: Option<Readability>,
    pub contact_info: ContactInfo,
    pub suggestions: Vec<String>,
}

/// Resume text plus its normalized, stopword-free tokens.
pub struct TextProfile {
    text: String,
    tokens: Vec<String>,
}

impl TextProfile {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenize(text),
        }
    }

    /// Whole-word, case-insensitive skill counts, in list order. Skills that
    /// never occur are omitted.
    pub fn extract_skills(&self, custom_skills: Option<&[&str]>) -> Vec<SkillCount> {
        if self.text.is_empty() {
            return Vec::new();
        }
        let haystack = self.text.to_lowercase();
        let count = |skill: &str, pattern: &Regex| {
            let count = pattern.find_iter(&haystack).count();
            (count > 0).then(|| SkillCount {
                skill: skill.to_string(),
                count,
            })
        };

        match custom_skills.filter(|skills| !skills.is_empty()) {
            Some(skills) => skills
                .iter()
                .map(|skill| skill.trim().to_lowercase())
                .filter(|skill| !skill.is_empty())
                .filter_map(|skill| count(skill.as_str(), &skill_pattern(&skill)?))
                .collect(),
            None => default_skill_patterns()
                .iter()
                .filter_map(|(skill, pattern)| count(skill.as_str(), pattern))
                .collect(),
        }
    }

    /// The `top_n` most frequent tokens. Ties keep first-seen order.
    pub fn word_frequency(&self, top_n: usize) -> Vec<WordCount> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (index, token) in self.tokens.iter().enumerate() {
            counts.entry(token.as_str()).or_insert((0, index)).0 += 1;
        }

        let mut ranked: Vec<_> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranked
            .into_iter()
            .take(top_n)
            .map(|(word, (count, _))| WordCount {
                word: word.to_string(),
                count,
            })
            .collect()
    }

    /// Keyword overlap with a job description. `None` when either side is empty.
    pub fn compare_with_job(&self, job_description: &str) -> Option<JobComparison> {
        if self.text.is_empty() || job_description.is_empty() {
            return None;
        }

        let job_tokens: BTreeSet<String> = tokenize(job_description).into_iter().collect();
        let resume_tokens: BTreeSet<&str> = self.tokens.iter().map(String::as_str).collect();

        let (matching, missing): (Vec<String>, Vec<String>) = job_tokens
            .iter()
            .cloned()
            .partition(|token| resume_tokens.contains(token.as_str()));

        let match_percentage = if job_tokens.is_empty() {
            0.0
        } else {
            matching.len() as f64 / job_tokens.len() as f64 * 100.0
        };

        Some(JobComparison {
            match_percentage,
            matching_keywords: matching,
            missing_keywords: missing,
        })
    }

    /// Flesch reading ease and Flesch-Kincaid grade. `None` when the text has no words.
    pub fn readability(&self) -> Option<Readability> {
        let words: Vec<&str> = word_pattern()
            .find_iter(&self.text)
            .map(|m| m.as_str())
            .collect();
        if words.is_empty() {
            return None;
        }

        let word_count = words.len();
        let sentence_count = sentence_end_pattern().find_iter(&self.text).count().max(1);
        let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

        let words_per_sentence = word_count as f64 / sentence_count as f64;
        let syllables_per_word = syllable_count as f64 / word_count as f64;
        Some(Readability {
            flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            flesch_kincaid_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
            sentence_count,
            word_count,
            syllable_count,
        })
    }

    /// Email, phone, LinkedIn, GitHub and personal website, first match each.
    pub fn contact_info(&self) -> ContactInfo {
        let lower = self.text.to_lowercase();
        let first = |pattern: &Regex, text: &str| {
            pattern.find(text).map(|m| m.as_str().to_string())
        };

        let phone = compiled(&PHONE, r"(?:\+\d{1,3}[- ]?)?\(?\d{3}\)?[- ]?\d{3}[- ]?\d{4}");
        let linkedin = compiled(&LINKEDIN, r"linkedin\.com/in/[a-zA-Z0-9_-]+");
        let github = compiled(&GITHUB, r"github\.com/[a-zA-Z0-9_-]+");
        let website = compiled(
            &WEBSITE,
            r"(?:https?://)?(?:[a-zA-Z0-9][-a-zA-Z0-9]*\.)+[a-zA-Z0-9]{2,}",
        );

        ContactInfo {
            email: first(email_pattern(), &lower),
            phone: first(phone, &self.text),
            linkedin: first(linkedin, &lower),
            github: first(github, &lower),
            website: website
                .find_iter(&lower)
                .filter(|m| !touches_at_sign(&lower, m.start(), m.end()))
                .map(|m| m.as_str())
                .find(|site| !NON_WEBSITE_HINTS.iter().any(|hint| site.contains(hint)))
                .map(String::from),
        }
    }

    /// Rule-based hints: length, contact email, action verbs, quantified
    /// results, readability.
    pub fn improvement_suggestions(&self) -> Vec<String> {
        let mut suggestions = Vec::new();

        let word_count = self.tokens.len();
        if word_count < SHORT_RESUME_TOKENS {
            suggestions.push(
                "Your resume seems quite short. Consider adding more details about your \
                 experiences and achievements."
                    .to_string(),
            );
        } else if word_count > LONG_RESUME_TOKENS {
            suggestions.push(
                "Your resume is quite lengthy. Consider condensing it to highlight the most \
                 relevant information."
                    .to_string(),
            );
        }

        if !email_pattern().is_match(&self.text) {
            suggestions.push(
                "No email address detected. Make sure to include your email for potential \
                 employers to contact you."
                    .to_string(),
            );
        }

        let lower = self.text.to_lowercase();
        let verbs_found = ACTION_VERBS.iter().filter(|v| lower.contains(*v)).count();
        if verbs_found < MIN_ACTION_VERBS {
            suggestions.push(
                "Consider using more action verbs (like 'managed', 'developed', 'implemented') \
                 to describe your achievements."
                    .to_string(),
            );
        }

        if number_pattern().find_iter(&self.text).count() < MIN_NUMBERS {
            suggestions.push(
                "Add more quantifiable achievements using numbers (e.g., 'increased sales by \
                 20%', 'managed a team of 5')."
                    .to_string(),
            );
        }

        // No words at all scores as 0
        let reading_ease = self.readability().map_or(0.0, |r| r.flesch_reading_ease);
        if reading_ease < LOW_READABILITY {
            suggestions.push(
                "Your resume has low readability. Consider using shorter sentences and simpler \
                 language."
                    .to_string(),
            );
        }

        suggestions
    }
}

/// Full local report for the keyword endpoint.
pub fn keyword_report(resume_text: &str, job_description: Option<&str>) -> KeywordReport {
    let profile = TextProfile::new(resume_text);
    KeywordReport {
        skills: profile.extract_skills(None),
        top_words: profile.word_frequency(DEFAULT_TOP_WORDS),
        job_comparison: job_description.and_then(|jd| profile.compare_with_job(jd)),
        readability: profile.readability(),
        contact_info: profile.contact_info(),
        suggestions: profile.improvement_suggestions(),
    }
}

/// Lowercase, drop ASCII punctuation, split on whitespace, drop stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    cleaned
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(String::from)
        .collect()
}

/// Vowel groups, minus a silent trailing `e`, at least one per word.
fn syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = vowel_group_pattern().find_iter(&word).count();
    if count > 1 && word.ends_with('e') && !word.ends_with("le") {
        count -= 1;
    }
    count.max(1)
}

/// Whether the match sits directly against an `@`, i.e. is part of an email.
fn touches_at_sign(text: &str, start: usize, end: usize) -> bool {
    text[..start].ends_with('@') || text[end..].starts_with('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe | jane.doe@example.com\n\
        Senior engineer. Led a team of 6 and developed Rust services; implemented CI/CD with \
        Docker and Kubernetes. Reduced costs by 30% across 4 regions. Python, rust, SQL.";

    #[test]
    fn test_tokenize_drops_punctuation_and_stopwords() {
        assert_eq!(
            tokenize("I led the team, and we SHIPPED it!"),
            vec!["led", "team", "shipped"]
        );
    }

    #[test]
    fn test_extract_skills_counts_whole_words_case_insensitively() {
        let skills = TextProfile::new(RESUME).extract_skills(None);
        let rust = skills.iter().find(|s| s.skill == "rust").unwrap();
        assert_eq!(rust.count, 2);
        assert!(skills.iter().any(|s| s.skill == "kubernetes"));
        assert!(skills.iter().any(|s| s.skill == "ci/cd"));
        // "go" must not match inside other words
        assert!(!skills.iter().any(|s| s.skill == "go"));
    }

    #[test]
    fn test_extract_skills_with_custom_list() {
        let skills = TextProfile::new(RESUME).extract_skills(Some(&["Docker", "Haskell"]));
        assert_eq!(
            skills,
            vec![SkillCount {
                skill: "docker".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_word_frequency_orders_by_count_then_first_seen() {
        let profile = TextProfile::new("rust tokio rust axum tokio rust serde");
        let top = profile.word_frequency(3);
        let words: Vec<_> = top.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(words, vec![("rust", 3), ("tokio", 2), ("axum", 1)]);
    }

    #[test]
    fn test_compare_with_job_reports_overlap() {
        let profile = TextProfile::new("Rust engineer with Kubernetes");
        let comparison = profile
            .compare_with_job("Rust, Kubernetes and Terraform")
            .unwrap();
        assert_eq!(comparison.matching_keywords, vec!["kubernetes", "rust"]);
        assert_eq!(comparison.missing_keywords, vec!["terraform"]);
        assert!((comparison.match_percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_with_empty_job_is_none() {
        assert!(TextProfile::new(RESUME).compare_with_job("").is_none());
    }

    #[test]
    fn test_suggestions_for_thin_resume() {
        let suggestions = TextProfile::new("Worked on things").improvement_suggestions();
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].contains("quite short"));
        assert!(suggestions[1].contains("No email address"));
    }

    #[test]
    fn test_suggestions_skip_satisfied_rules() {
        let suggestions = TextProfile::new(RESUME).improvement_suggestions();
        assert!(!suggestions.iter().any(|s| s.contains("email")));
        assert!(!suggestions.iter().any(|s| s.contains("action verbs")));
        assert!(!suggestions.iter().any(|s| s.contains("quantifiable")));
    }

    #[test]
    fn test_symbol_skills_match_at_word_start() {
        let profile = TextProfile::new("Wrote C++ and C# daily; c++17 features. Not abc++.");
        let skills = profile.extract_skills(Some(&["c++", "c#"]));
        assert_eq!(
            skills,
            vec![
                SkillCount {
                    skill: "c++".to_string(),
                    count: 2
                },
                SkillCount {
                    skill: "c#".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_quantified_results_count_standalone_numbers() {
        // "5th" is not a standalone number
        let profile = TextProfile::new("grew 20% in 2023, ranked 5th, team of 6");
        assert!(!profile
            .improvement_suggestions()
            .iter()
            .any(|s| s.contains("quantifiable")));

        let profile = TextProfile::new("ranked 5th and 2nd, team of 6");
        assert!(profile
            .improvement_suggestions()
            .iter()
            .any(|s| s.contains("quantifiable")));
    }

    #[test]
    fn test_email_found_inside_surrounding_punctuation() {
        for text in [
            "Email:jane.doe@example.com",
            "jane@example.com|555-0100",
            "<jane.doe@example.com>,",
        ] {
            let suggestions = TextProfile::new(text).improvement_suggestions();
            assert!(
                !suggestions.iter().any(|s| s.contains("No email address")),
                "{text}"
            );
        }
    }

    #[test]
    fn test_missing_email_is_reported() {
        for text in ["@handle on every network", "jane@localhost"] {
            let suggestions = TextProfile::new(text).improvement_suggestions();
            assert!(
                suggestions.iter().any(|s| s.contains("No email address")),
                "{text}"
            );
        }
    }

    #[test]
    fn test_readability_of_plain_sentences() {
        let readability = TextProfile::new("The cat sat. The dog ran.")
            .readability()
            .unwrap();
        assert_eq!(readability.word_count, 6);
        assert_eq!(readability.sentence_count, 2);
        assert_eq!(readability.syllable_count, 6);
        assert!((readability.flesch_reading_ease - 119.19).abs() < 1e-9);
        assert!((readability.flesch_kincaid_grade - -2.62).abs() < 1e-9);
    }

    #[test]
    fn test_readability_none_without_words() {
        assert!(TextProfile::new("").readability().is_none());
        assert!(TextProfile::new(" -- !! ").readability().is_none());
    }

    #[test]
    fn test_dense_text_gets_low_readability_hint() {
        let dense = "Orchestrated comprehensive infrastructure modernization initiatives \
                     utilizing sophisticated containerization methodologies";
        let profile = TextProfile::new(dense);
        assert!(profile.readability().unwrap().flesch_reading_ease < LOW_READABILITY);
        assert!(profile
            .improvement_suggestions()
            .iter()
            .any(|s| s.contains("low readability")));

        let plain = TextProfile::new("Worked on things").improvement_suggestions();
        assert!(!plain.iter().any(|s| s.contains("low readability")));
    }

    #[test]
    fn test_contact_info_first_match_per_field() {
        let text = "Jane Doe | Jane.Doe@Example.com | +1 555-123-4567\n\
                    linkedin.com/in/jane-doe | github.com/janedoe | https://janedoe.dev";
        let contact = TextProfile::new(text).contact_info();
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("+1 555-123-4567"));
        assert_eq!(contact.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(contact.github.as_deref(), Some("github.com/janedoe"));
        assert_eq!(contact.website.as_deref(), Some("https://janedoe.dev"));
    }

    #[test]
    fn test_contact_info_skips_email_and_profile_hosts_as_website() {
        let contact = TextProfile::new("jane@gmail.com, github.com/jane").contact_info();
        assert_eq!(contact.email.as_deref(), Some("jane@gmail.com"));
        assert!(contact.phone.is_none());
        assert!(contact.linkedin.is_none());
        assert!(contact.website.is_none());
    }

    #[test]
    fn test_keyword_report_without_jd() {
        let report = keyword_report(RESUME, None);
        assert!(report.job_comparison.is_none());
        assert!(!report.skills.is_empty());
        assert!(report.top_words.len() <= DEFAULT_TOP_WORDS);
        assert!(report.readability.is_some());
        assert_eq!(
            report.contact_info.email.as_deref(),
            Some("jane.doe@example.com")
        );
    }
}
