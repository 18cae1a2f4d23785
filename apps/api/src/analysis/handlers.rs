//! Axum route handlers for the Analysis API.

use std::collections::BTreeMap;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::analysis::analyze_resume;
use crate::analysis::scoring::effective_job_description;
use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, reconstruct_lines, Page};
use crate::models::analysis::{AnalysisResult, BulletCritique, ScoreBreakdown};
use crate::models::resume::{ResumeSections, SectionName};
use crate::skills::{analyze_gap, extract_skills};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReconstructRequest {
    pub pages: Vec<Page>,
}

#[derive(Debug, Serialize)]
pub struct ReconstructResponse {
    pub text: String,
    pub line_count: usize,
}

/// Analysis block of the upload response. `score` mirrors `total_score`.
#[derive(Debug, Serialize)]
pub struct AnalysisPayload {
    pub score: u32,
    pub total_score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub resume_skills: Vec<String>,
    /// Present only when a job description was supplied.
    pub skill_gap_score: Option<u32>,
    pub section_scores: BTreeMap<SectionName, u32>,
    pub score_breakdown: ScoreBreakdown,
    pub bullet_analysis: Vec<BulletCritique>,
    pub insights: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub full_text: String,
    pub sections: ResumeSections,
    pub analysis: AnalysisPayload,
}

impl AnalyzeResponse {
    /// Joins the scoring result with the skill lookup for one upload.
    pub fn assemble(
        analysis_id: Uuid,
        full_text: String,
        result: AnalysisResult,
        job_description: Option<&str>,
    ) -> Self {
        let (matching_skills, missing_skills, resume_skills, skill_gap_score) =
            match effective_job_description(job_description) {
                Some(jd) => {
                    let gap = analyze_gap(&full_text, jd);
                    (
                        gap.matching_skills,
                        gap.missing_skills,
                        gap.resume_skills,
                        Some(gap.score),
                    )
                }
                None => {
                    let skills = extract_skills(&full_text);
                    (skills.clone(), Vec::new(), skills, None)
                }
            };

        Self {
            analysis_id,
            analyzed_at: Utc::now(),
            full_text,
            sections: result.sections,
            analysis: AnalysisPayload {
                score: result.total_score,
                total_score: result.total_score,
                matching_skills,
                missing_skills,
                resume_skills,
                skill_gap_score,
                section_scores: result.section_scores,
                score_breakdown: result.score_breakdown,
                bullet_analysis: result.bullet_analysis,
                insights: result.insights,
            },
        }
    }
}

struct Upload {
    file: Bytes,
    job_description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart upload: `file` (PDF, required) and `job_description` (optional).
/// Decodes the PDF, segments and scores it, and attaches the skill lookup.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart).await?;
    let analysis_id = Uuid::new_v4();
    let span = tracing::info_span!("analysis", %analysis_id);

    async move {
        info!(bytes = upload.file.len(), "Analyzing uploaded résumé");

        let full_text = extract_text_blocking(upload.file).await?;
        let job_description = upload.job_description.as_deref();
        let result = analyze_resume(&full_text, job_description, state.llm.as_ref()).await;

        Ok::<_, AppError>(Json(AnalyzeResponse::assemble(
            analysis_id,
            full_text,
            result,
            job_description,
        )))
    }
    .instrument(span)
    .await
}

/// POST /api/analyze/text
///
/// Scores already-extracted résumé text. Empty text is a valid (empty) document.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload?;
    let result = analyze_resume(
        &request.resume_text,
        request.job_description.as_deref(),
        state.llm.as_ref(),
    )
    .await;
    Ok(Json(result))
}

/// POST /api/reconstruct
///
/// Runs the Layout Reconstructor over pre-decoded pages.
pub async fn handle_reconstruct(
    payload: Result<Json<ReconstructRequest>, JsonRejection>,
) -> Result<Json<ReconstructResponse>, AppError> {
    let Json(request) = payload?;
    let lines = reconstruct_lines(&request.pages);
    Ok(Json(ReconstructResponse {
        line_count: lines.len(),
        text: lines.join("\n"),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    let mut file = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => file = Some(field.bytes().await.map_err(multipart_error)?),
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    Ok(Upload {
        file,
        job_description,
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("invalid multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeGenerator;

    #[tokio::test]
    async fn test_assemble_without_job_description() {
        let text = "Skills\nPython, Docker".to_string();
        let result = analyze_resume(&text, None, &FakeGenerator::unavailable()).await;
        let response = AnalyzeResponse::assemble(Uuid::new_v4(), text, result, None);

        assert_eq!(response.analysis.score, response.analysis.total_score);
        assert_eq!(response.analysis.matching_skills, vec!["Python", "Docker"]);
        assert_eq!(response.analysis.resume_skills, vec!["Python", "Docker"]);
        assert!(response.analysis.missing_skills.is_empty());
        assert!(response.analysis.skill_gap_score.is_none());
        assert_eq!(response.sections.skills, "Python, Docker\n");
    }

    #[tokio::test]
    async fn test_assemble_with_job_description() {
        let text = "Skills\nPython, Docker".to_string();
        let jd = "Python and Kubernetes";
        let result = analyze_resume(&text, Some(jd), &FakeGenerator::unavailable()).await;
        let response = AnalyzeResponse::assemble(Uuid::new_v4(), text, result, Some(jd));

        assert_eq!(response.analysis.matching_skills, vec!["Python"]);
        assert_eq!(response.analysis.missing_skills, vec!["Kubernetes"]);
        assert_eq!(response.analysis.skill_gap_score, Some(50));
        assert_eq!(response.analysis.section_scores.len(), 5);
    }

    #[tokio::test]
    async fn test_reconstruct_handler_counts_separator_lines() {
        let request: ReconstructRequest = serde_json::from_str(
            r#"{"pages": [{"fragments": [
                {"text": "World", "x": 3.0, "y": 1.0},
                {"text": "Hello", "x": 1.0, "y": 1.0, "sw": 1.0}
            ]}]}"#,
        )
        .unwrap();
        let Json(response) = handle_reconstruct(Ok(Json(request))).await.unwrap();
        assert_eq!(response.text, "Hello World\n");
        assert_eq!(response.line_count, 2);
    }
}
