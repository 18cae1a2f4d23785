//! Axum route handlers for the Interview API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::feedback::{evaluate_answer, AnswerFeedback};
use crate::interview::questions::generate_questions;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub answer: String,
}

/// POST /api/interview-questions
///
/// Rejects a blank résumé.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    payload: Result<Json<QuestionsRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let Json(request) = payload?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text is required".to_string()));
    }

    let questions = generate_questions(
        &request.resume_text,
        request.job_description.as_deref(),
        state.llm.as_ref(),
    )
    .await;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/interview-feedback
///
/// Rejects a blank question or answer; everything else gets feedback.
pub async fn handle_interview_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<AnswerFeedback>, AppError> {
    let Json(request) = payload?;
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let feedback = evaluate_answer(&request.question, &request.answer, state.llm.as_ref()).await;
    Ok(Json(feedback))
}
