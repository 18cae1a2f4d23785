use serde_json::Value;
use tracing::warn;

use crate::interview::prompts::{INTERVIEWER_PERSONA, QUESTIONS_PROMPT_TEMPLATE, RESUME_WINDOW_CHARS};
use crate::llm_client::prompts::{clip_chars, json_system};
use crate::llm_client::JsonGenerator;

/// Generic questions used whenever tailored ones cannot be produced.
pub const FALLBACK_QUESTIONS: [&str; 5] = [
    "Tell me about a time you used Python to solve a difficult problem.",
    "How do you handle conflict in a team setting?",
    "Describe your experience with React and state management.",
    "What is your approach to testing and ensuring code quality?",
    "Where do you see yourself in 5 years?",
];

/// Interview questions tailored to the résumé (and role, when given).
/// Never empty.
pub async fn generate_questions(
    resume_text: &str,
    job_description: Option<&str>,
    llm: &dyn JsonGenerator,
) -> Vec<String> {
    if !llm.is_available() {
        return fallback_questions();
    }

    let job_description = job_description
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .unwrap_or("N/A");
    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{resume_text}", clip_chars(resume_text, RESUME_WINDOW_CHARS))
        .replace("{job_description}", job_description);

    let questions = match llm.generate_json(&prompt, &json_system(INTERVIEWER_PERSONA)).await {
        Ok(reply) => questions_from_reply(&reply),
        Err(e) => {
            warn!("Question generation failed, using fallback questions: {e}");
            Vec::new()
        }
    };

    if questions.is_empty() {
        warn!("No usable questions generated, using fallback questions");
        return fallback_questions();
    }
    questions
}

/// Accepts a bare array or `{"questions": [...]}`; non-string and blank
/// entries are dropped.
fn questions_from_reply(reply: &Value) -> Vec<String> {
    let items = match reply {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect()
}

fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}
