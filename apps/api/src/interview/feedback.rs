use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::interview::prompts::{FEEDBACK_PROMPT_TEMPLATE, INTERVIEWER_PERSONA};
use crate::llm_client::prompts::json_system;
use crate::llm_client::JsonGenerator;

/// Answers shorter than this many words are judged too short.
const MIN_ANSWER_WORDS: usize = 20;

const MISSING_FEEDBACK: &str = "Could not generate feedback.";
const MISSING_IMPROVEMENT: &str = "Could not generate improvement.";
const SHORT_ANSWER_NOTE: &str =
    "Your answer is a bit too short. Try to elaborate more using the STAR method.";
const GOOD_LENGTH_NOTE: &str = "Good length! You provided enough detail.";
const NO_IMPROVEMENT_NOTE: &str = "LLM service unavailable for improved answer generation.";

/// Per-component STAR scores, each 0–10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarBreakdown {
    pub situation: u32,
    pub task: u32,
    pub action: u32,
    pub result: u32,
}

impl StarBreakdown {
    fn uniform(score: u32) -> Self {
        Self {
            situation: score,
            task: score,
            action: score,
            result: score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub score: u32, // 0 – 100
    pub star_breakdown: StarBreakdown,
    pub feedback: Vec<String>,
    pub improved_answer: String,
}

/// Evaluates an interview answer with the STAR method. Falls back to a
/// length-based judgement when the capability is unavailable or fails.
pub async fn evaluate_answer(question: &str, answer: &str, llm: &dyn JsonGenerator) -> AnswerFeedback {
    if !llm.is_available() {
        return rule_based_feedback(answer);
    }

    let prompt = FEEDBACK_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer);
    let system = json_system(INTERVIEWER_PERSONA);

    match llm.generate_json(&prompt, &system).await {
        Ok(reply) => feedback_from_reply(&reply),
        Err(e) => {
            warn!("Answer evaluation failed, using rule-based feedback: {e}");
            rule_based_feedback(answer)
        }
    }
}

fn feedback_from_reply(reply: &Value) -> AnswerFeedback {
    let breakdown = reply.get("star_breakdown");
    let component = |key: &str| {
        breakdown
            .and_then(|b| b.get(key))
            .map(|v| clamped(v, 10))
            .unwrap_or(0)
    };

    let feedback: Vec<String> = match reply.get("feedback") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        Some(Value::String(single)) => vec![single.clone()],
        _ => vec![MISSING_FEEDBACK.to_string()],
    };

    AnswerFeedback {
        score: reply.get("score").map(|v| clamped(v, 100)).unwrap_or(0),
        star_breakdown: StarBreakdown {
            situation: component("situation"),
            task: component("task"),
            action: component("action"),
            result: component("result"),
        },
        feedback,
        improved_answer: reply
            .get("improved_answer")
            .and_then(Value::as_str)
            .unwrap_or(MISSING_IMPROVEMENT)
            .to_string(),
    }
}

fn clamped(value: &Value, max: u32) -> u32 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(n) if n.is_finite() => n.round().clamp(0.0, max as f64) as u32,
        _ => 0,
    }
}

/// Length-only judgement used without the capability.
pub fn rule_based_feedback(answer: &str) -> AnswerFeedback {
    let (score, component, note) = if answer.split_whitespace().count() < MIN_ANSWER_WORDS {
        (50, 5, SHORT_ANSWER_NOTE)
    } else {
        (80, 8, GOOD_LENGTH_NOTE)
    };

    AnswerFeedback {
        score,
        star_breakdown: StarBreakdown::uniform(component),
        feedback: vec![note.to_string()],
        improved_answer: NO_IMPROVEMENT_NOTE.to_string(),
    }
}
