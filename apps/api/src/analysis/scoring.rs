use std::collections::BTreeMap;

use crate::analysis::formatting::formatting_score;
use crate::analysis::impact::{content_impact, count_metrics, metric_source};
use crate::analysis::relevance::{section_scores, weighted_skills_match, NEUTRAL_SKILLS_MATCH};
use crate::models::analysis::ScoreBreakdown;
use crate::models::resume::{ResumeSections, SectionName};

/// Fixed weights of the three sub-scores in the total.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub skills_match: f64,
    pub content_impact: f64,
    pub formatting: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills_match: 0.4,
            content_impact: 0.25,
            formatting: 0.35,
        }
    }
}

impl ScoreWeights {
    /// Weighted total, rounded and clamped to [0, 100].
    pub fn combine(&self, breakdown: &ScoreBreakdown) -> u32 {
        let total = breakdown.skills_match as f64 * self.skills_match
            + breakdown.content_impact as f64 * self.content_impact
            + breakdown.formatting_score as f64 * self.formatting;
        total.round().clamp(0.0, 100.0) as u32
    }
}

/// Everything the deterministic half of the analysis produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub total_score: u32,
    pub breakdown: ScoreBreakdown,
    pub section_scores: BTreeMap<SectionName, u32>,
    /// Digit runs in the metric source; drives the rule-based insights.
    pub metric_count: usize,
}

/// A job description that is missing or blank compares against nothing.
pub fn effective_job_description(job_description: Option<&str>) -> Option<&str> {
    job_description.filter(|jd| !jd.trim().is_empty())
}

/// Pure scoring of segmented text. Never fails; degenerate input scores low.
pub fn score_resume(
    full_text: &str,
    sections: &ResumeSections,
    job_description: Option<&str>,
) -> ScoreCard {
    let formatting = formatting_score(full_text, sections);

    let metric_count = count_metrics(metric_source(full_text, sections));
    let impact = content_impact(metric_count);

    let (skills_match, section_scores) = match effective_job_description(job_description) {
        Some(jd) => {
            let scores = section_scores(sections, jd);
            (weighted_skills_match(&scores, full_text), scores)
        }
        None => (NEUTRAL_SKILLS_MATCH, BTreeMap::new()),
    };

    let breakdown = ScoreBreakdown {
        skills_match,
        content_impact: impact,
        formatting_score: formatting,
    };

    ScoreCard {
        total_score: ScoreWeights::default().combine(&breakdown),
        breakdown,
        section_scores,
        metric_count,
    }
}
