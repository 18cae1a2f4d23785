use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::resume::{ResumeSections, SectionName};

/// The three independent 0–100 components of the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills_match: u32,
    pub content_impact: u32,
    pub formatting_score: u32,
}

/// One experience bullet as judged by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletCritique {
    pub text: String,
    pub score: u32, // 0 – 100
    pub suggestion: String,
}

/// Full result of one résumé analysis. Built once per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_score: u32,
    /// Lexical relevance per section. Empty when no job description was given.
    pub section_scores: BTreeMap<SectionName, u32>,
    pub score_breakdown: ScoreBreakdown,
    pub bullet_analysis: Vec<BulletCritique>,
    pub insights: Vec<String>,
    pub sections: ResumeSections,
}
