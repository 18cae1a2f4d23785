pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::interview::handlers as interview;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/analyze/text", post(analysis::handle_analyze_text))
        .route("/api/reconstruct", post(analysis::handle_reconstruct))
        // Interview API
        .route(
            "/api/interview-questions",
            post(interview::handle_interview_questions),
        )
        .route(
            "/api/interview-feedback",
            post(interview::handle_interview_feedback),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
