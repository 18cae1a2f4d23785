//! Scoring Engine entry points: deterministic scoring plus the best-effort
//! bullet critique, assembled into one `AnalysisResult`.

use tracing::info;

use crate::analysis::critique::{critique_bullets, derive_insights, fallback_insights};
use crate::analysis::impact::metric_source;
use crate::analysis::scoring::score_resume;
use crate::llm_client::JsonGenerator;
use crate::models::analysis::AnalysisResult;
use crate::models::resume::ResumeSections;
use crate::sections::segment;

/// Scores already-segmented text. The capability is awaited at most once and
/// its failure only thins out `bullet_analysis` and `insights`.
pub async fn score(
    full_text: &str,
    sections: ResumeSections,
    job_description: Option<&str>,
    llm: &dyn JsonGenerator,
) -> AnalysisResult {
    let card = score_resume(full_text, &sections, job_description);

    let bullet_analysis = critique_bullets(metric_source(full_text, &sections), llm)
        .await
        .unwrap_or_default();

    let mut insights = derive_insights(&bullet_analysis);
    if insights.is_empty() {
        insights = fallback_insights(card.metric_count, card.breakdown.formatting_score);
    }

    info!(
        total_score = card.total_score,
        text_chars = full_text.chars().count(),
        bullets = bullet_analysis.len(),
        "Résumé scored"
    );

    AnalysisResult {
        total_score: card.total_score,
        section_scores: card.section_scores,
        score_breakdown: card.breakdown,
        bullet_analysis,
        insights,
        sections,
    }
}

/// Segments `full_text` and scores it.
pub async fn analyze_resume(
    full_text: &str,
    job_description: Option<&str>,
    llm: &dyn JsonGenerator,
) -> AnalysisResult {
    let sections = segment(full_text);
    score(full_text, sections, job_description, llm).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::critique::{FORMATTING_INSIGHT, LACKS_METRICS_INSIGHT};
    use crate::llm_client::fake::FakeGenerator;
    use crate::models::resume::SectionName;
    use serde_json::json;

    const SAMPLE: &str = "Experience\nBuilt 3 systems serving 10000 users\nEducation\nBS Computer Science\nSkills\nPython, Go";

    #[tokio::test]
    async fn test_sample_end_to_end_without_capability() {
        let llm = FakeGenerator::unavailable();
        let result = analyze_resume(SAMPLE, None, &llm).await;

        assert_eq!(result.sections.experience, "Built 3 systems serving 10000 users\n");
        assert_eq!(result.sections.education, "BS Computer Science\n");
        assert_eq!(result.sections.skills, "Python, Go\n");
        assert_eq!(result.sections.projects, "");
        assert_eq!(result.sections.other, "");
        assert_eq!(result.score_breakdown.skills_match, 70);
        assert_eq!(result.total_score, 59);
        assert!(result.bullet_analysis.is_empty());
        // 2 metrics, formatting 75
        assert_eq!(result.insights, vec![LACKS_METRICS_INSIGHT]);
    }

    #[tokio::test]
    async fn test_capability_failure_degrades_to_rules() {
        let llm = FakeGenerator::failing();
        let result = analyze_resume("just a line", None, &llm).await;
        assert!(result.bullet_analysis.is_empty());
        assert_eq!(result.insights, vec![LACKS_METRICS_INSIGHT, FORMATTING_INSIGHT]);
    }

    #[tokio::test]
    async fn test_critique_drives_insights_and_not_the_score() {
        let llm = FakeGenerator::replying(json!({
            "bullets": [
                {"text": "Built 3 systems serving 10000 users", "score": 45, "suggestion": "Say what the systems did"}
            ]
        }));
        let with_llm = analyze_resume(SAMPLE, None, &llm).await;
        let without = analyze_resume(SAMPLE, None, &FakeGenerator::unavailable()).await;

        assert_eq!(with_llm.total_score, without.total_score);
        assert_eq!(with_llm.bullet_analysis.len(), 1);
        assert_eq!(
            with_llm.insights,
            vec!["Found 1 weak bullet points. See detailed analysis for fixes."]
        );
        // only the experience bucket is sent
        let prompts = llm.prompts();
        assert!(prompts[0].contains("Built 3 systems serving 10000 users"));
        assert!(!prompts[0].contains("BS Computer Science"));
    }

    #[tokio::test]
    async fn test_empty_critique_falls_back_to_rules() {
        let llm = FakeGenerator::replying(json!({"bullets": []}));
        let result = analyze_resume(SAMPLE, None, &llm).await;
        assert_eq!(result.insights, vec![LACKS_METRICS_INSIGHT]);
    }

    #[tokio::test]
    async fn test_empty_document_produces_well_formed_result() {
        let llm = FakeGenerator::replying(json!({"bullets": []}));
        let result = analyze_resume("", Some("Rust engineer"), &llm).await;
        assert_eq!(result.sections, ResumeSections::default());
        assert_eq!(result.section_scores.len(), 5);
        assert_eq!(result.section_scores[&SectionName::Experience], 0);
        assert!(result.total_score <= 100);
        // blank text is never sent
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_result_serializes_with_stable_field_names() {
        let result = analyze_resume(SAMPLE, Some("Python"), &FakeGenerator::unavailable()).await;
        let json = serde_json::to_value(&result).unwrap();
        for key in ["total_score", "section_scores", "score_breakdown", "bullet_analysis", "insights"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["section_scores"].get("experience").is_some());
        assert!(json["score_breakdown"].get("formatting_score").is_some());
    }
}
