//! Bullet critique through the generative-language capability, and the
//! insight strings derived from it (or from rules when it is unavailable).

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::prompts::{CRITIQUE_PERSONA, CRITIQUE_PROMPT_TEMPLATE, CRITIQUE_WINDOW_CHARS};
use crate::llm_client::prompts::{clip_chars, json_system};
use crate::llm_client::{JsonGenerator, LlmError};
use crate::models::analysis::BulletCritique;

/// Bullets scoring below this are reported as weak.
pub const WEAK_BULLET_THRESHOLD: u32 = 60;
const MAX_SUGGESTION_INSIGHTS: usize = 2;
const MIN_METRICS: usize = 3;
const MIN_FORMATTING: u32 = 70;

pub const LACKS_METRICS_INSIGHT: &str =
    "Your 'Experience' section lacks quantifiable metrics. Recruiters love data!";
pub const FORMATTING_INSIGHT: &str =
    "Formatting check: Ensure clear section headers and consistent spacing.";

/// Asks the capability to critique the bullets in `source`.
///
/// Returns `None` when no request was made (capability unavailable or blank
/// text) or when the request failed; failures are logged, never propagated.
pub async fn critique_bullets(source: &str, llm: &dyn JsonGenerator) -> Option<Vec<BulletCritique>> {
    if !llm.is_available() || source.trim().is_empty() {
        return None;
    }

    let prompt = CRITIQUE_PROMPT_TEMPLATE
        .replace("{experience_text}", clip_chars(source, CRITIQUE_WINDOW_CHARS));
    let system = json_system(CRITIQUE_PERSONA);

    match llm.generate_json(&prompt, &system).await {
        Ok(value) => match parse_critiques(value) {
            Ok(bullets) => {
                debug!("Bullet critique returned {} entries", bullets.len());
                Some(bullets)
            }
            Err(e) => {
                warn!("Bullet critique reply was malformed, using rule-based insights: {e}");
                None
            }
        },
        Err(e) => {
            warn!("Bullet critique failed, using rule-based insights: {e}");
            None
        }
    }
}

#[derive(Deserialize)]
struct CritiqueReply {
    bullets: Vec<Value>,
}

/// Reads `{"bullets": [...]}` leniently: scores may be numbers or numeric
/// strings and are rounded and clamped, a missing score is 0.
fn parse_critiques(value: Value) -> Result<Vec<BulletCritique>, LlmError> {
    let reply: CritiqueReply = serde_json::from_value(value)?;

    Ok(reply
        .bullets
        .iter()
        .filter_map(|entry| {
            let entry = entry.as_object()?;
            let text_of = |key: &str| {
                entry
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string()
            };
            Some(BulletCritique {
                text: text_of("text"),
                score: entry.get("score").map(lenient_score).unwrap_or(0),
                suggestion: text_of("suggestion"),
            })
        })
        .collect())
}

fn lenient_score(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u32,
        _ => 0,
    }
}

/// Insights from a successful critique: one aggregate line when any bullet
/// is weak, otherwise the first suggestions.
pub fn derive_insights(bullets: &[BulletCritique]) -> Vec<String> {
    let weak = bullets
        .iter()
        .filter(|b| b.score < WEAK_BULLET_THRESHOLD)
        .count();
    if weak > 0 {
        return vec![format!(
            "Found {weak} weak bullet points. See detailed analysis for fixes."
        )];
    }

    bullets
        .iter()
        .filter(|b| !b.suggestion.is_empty())
        .take(MAX_SUGGESTION_INSIGHTS)
        .map(|b| format!("Improvement Idea: {}", b.suggestion))
        .collect()
}

/// Rule-based insights used whenever the critique yields nothing.
pub fn fallback_insights(metric_count: usize, formatting_score: u32) -> Vec<String> {
    let mut insights = Vec::new();
    if metric_count < MIN_METRICS {
        insights.push(LACKS_METRICS_INSIGHT.to_string());
    }
    if formatting_score < MIN_FORMATTING {
        insights.push(FORMATTING_INSIGHT.to_string());
    }
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeGenerator;
    use serde_json::json;

    fn bullet(score: u32, suggestion: &str) -> BulletCritique {
        BulletCritique {
            text: "Did things".to_string(),
            score,
            suggestion: suggestion.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unavailable_capability_is_not_called() {
        let llm = FakeGenerator::unavailable();
        assert!(critique_bullets("Led 3 teams", &llm).await.is_none());
    }

    #[tokio::test]
    async fn test_blank_source_is_not_sent() {
        let llm = FakeGenerator::replying(json!({"bullets": []}));
        assert!(critique_bullets("  \n ", &llm).await.is_none());
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_carries_at_most_the_window() {
        let llm = FakeGenerator::replying(json!({"bullets": []}));
        let source = "ü".repeat(CRITIQUE_WINDOW_CHARS + 500);
        critique_bullets(&source, &llm).await.unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        let sent = prompts[0].matches('ü').count();
        assert_eq!(sent, CRITIQUE_WINDOW_CHARS);
    }

    #[tokio::test]
    async fn test_failure_yields_none() {
        let llm = FakeGenerator::failing();
        assert!(critique_bullets("Led 3 teams", &llm).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_reply_yields_none() {
        let llm = FakeGenerator::replying(json!({"critiques": "nope"}));
        assert!(critique_bullets("Led 3 teams", &llm).await.is_none());
    }

    #[tokio::test]
    async fn test_lenient_entries_are_normalized() {
        let llm = FakeGenerator::replying(json!({
            "bullets": [
                {"text": " Led 3 teams ", "score": 72.6, "suggestion": "Name the outcome"},
                {"text": "Wrote code", "score": "140"},
                {"text": "Misc"},
                "not an object"
            ]
        }));
        let bullets = critique_bullets("Led 3 teams", &llm).await.unwrap();
        assert_eq!(bullets.len(), 3);
        assert_eq!(bullets[0].text, "Led 3 teams");
        assert_eq!(bullets[0].score, 73);
        assert_eq!(bullets[1].score, 100);
        assert_eq!(bullets[1].suggestion, "");
        assert_eq!(bullets[2].score, 0);
    }

    #[test]
    fn test_weak_bullets_produce_one_aggregate_insight() {
        let insights = derive_insights(&[bullet(40, "a"), bullet(90, "b"), bullet(59, "c")]);
        assert_eq!(
            insights,
            vec!["Found 2 weak bullet points. See detailed analysis for fixes."]
        );
    }

    #[test]
    fn test_strong_bullets_produce_up_to_two_suggestions() {
        let insights = derive_insights(&[
            bullet(80, ""),
            bullet(60, "Lead with the verb"),
            bullet(95, "Add team size"),
            bullet(99, "Mention scale"),
        ]);
        assert_eq!(
            insights,
            vec![
                "Improvement Idea: Lead with the verb",
                "Improvement Idea: Add team size"
            ]
        );
    }

    #[test]
    fn test_no_bullets_no_insights() {
        assert!(derive_insights(&[]).is_empty());
    }

    #[test]
    fn test_fallback_rules() {
        assert_eq!(
            fallback_insights(2, 65),
            vec![LACKS_METRICS_INSIGHT, FORMATTING_INSIGHT]
        );
        assert_eq!(fallback_insights(3, 65), vec![FORMATTING_INSIGHT]);
        assert!(fallback_insights(3, 70).is_empty());
    }
}
