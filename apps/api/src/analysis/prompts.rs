// LLM prompt constants for résumé analysis.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Persona for bullet critique; combined with the JSON-only rules at call time.
pub const CRITIQUE_PERSONA: &str =
    "You are an expert technical recruiter reviewing résumé bullet points.";

/// Bullet critique prompt. Replace `{experience_text}` before sending.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"Analyze the following experience section of a résumé.
Identify the individual bullet points and rate each one from 0 to 100 for impact,
clarity and use of quantifiable results. For each bullet give one concrete suggestion
for improvement.

Return a JSON object with this EXACT schema:
{
  "bullets": [
    {"text": "original bullet text", "score": 45, "suggestion": "Quantify the result, e.g. reduced latency by 30%"}
  ]
}

Experience text:
{experience_text}"#;

/// Longest slice of the experience text sent for critique, in characters.
pub const CRITIQUE_WINDOW_CHARS: usize = 2000;
