// LLM prompt constants for interview preparation.

pub const INTERVIEWER_PERSONA: &str =
    "You are an experienced hiring manager preparing candidates for interviews.";

/// Question generation prompt. Replace `{resume_text}` and `{job_description}`.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate 5 interview questions based on the following résumé.
If a job description is provided, tailor them to the role.

Résumé content:
{resume_text}

Job description:
{job_description}

Return a JSON object with this EXACT schema:
{"questions": ["question 1", "question 2"]}"#;

/// STAR evaluation prompt. Replace `{question}` and `{answer}`.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Evaluate the following interview answer using the STAR method.
Question: {question}
Answer: {answer}

Provide:
1. A score for each component (situation, task, action, result) out of 10.
2. An overall score from 0 to 100.
3. A list of 3 specific feedback points.
4. An improved version of the answer.

Return a JSON object with this EXACT schema:
{
  "score": 75,
  "star_breakdown": {"situation": 8, "task": 7, "action": 8, "result": 6},
  "feedback": ["point 1", "point 2", "point 3"],
  "improved_answer": "..."
}"#;

/// Résumé characters included in the question prompt.
pub const RESUME_WINDOW_CHARS: usize = 2000;
