use std::collections::{BTreeMap, HashSet};

use crate::models::resume::{ResumeSections, SectionName};

/// Skills-match value when there is no target role to compare against.
pub const NEUTRAL_SKILLS_MATCH: u32 = 70;

/// Résumés longer than this many characters never score below `SKILLS_MATCH_FLOOR`.
const FLOOR_MIN_CHARS: usize = 500;
const SKILLS_MATCH_FLOOR: u32 = 30;

/// Contribution of each section to the weighted skills match.
const SECTION_WEIGHTS: [(SectionName, f64); 4] = [
    (SectionName::Experience, 0.4),
    (SectionName::Skills, 0.4),
    (SectionName::Projects, 0.1),
    (SectionName::Education, 0.1),
];

/// Lowercased word tokens longer than two characters. Word characters are
/// ASCII letters, digits and underscore; everything else separates.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| token.len() > 2)
        .map(|token| token.to_ascii_lowercase())
        .collect()
}

/// Overlap of one section with the job description, 0–100.
///
/// Every section token found in the job-description set counts, duplicates
/// included. The denominator is the smaller of the section token count and
/// the number of distinct job-description tokens; when that is zero the
/// section scores 0.
pub fn section_relevance(section_text: &str, jd_tokens: &HashSet<String>) -> u32 {
    let tokens = tokenize(section_text);
    let denominator = tokens.len().min(jd_tokens.len());
    if denominator == 0 {
        return 0;
    }
    let matching = tokens.iter().filter(|t| jd_tokens.contains(*t)).count();
    ((matching as f64 / denominator as f64 * 100.0).round() as u32).min(100)
}

/// Relevance of every section against the job description.
pub fn section_scores(
    sections: &ResumeSections,
    job_description: &str,
) -> BTreeMap<SectionName, u32> {
    let jd_tokens: HashSet<String> = tokenize(job_description).into_iter().collect();
    sections
        .iter()
        .map(|(name, text)| (name, section_relevance(text, &jd_tokens)))
        .collect()
}

/// Weighted skills match over the per-section scores, with the length floor.
pub fn weighted_skills_match(scores: &BTreeMap<SectionName, u32>, full_text: &str) -> u32 {
    let weighted: f64 = SECTION_WEIGHTS
        .iter()
        .map(|(name, weight)| scores.get(name).copied().unwrap_or(0) as f64 * weight)
        .sum();
    let score = (weighted.round() as u32).min(100);

    if full_text.chars().count() > FLOOR_MIN_CHARS && score < SKILLS_MATCH_FLOOR {
        SKILLS_MATCH_FLOOR
    } else {
        score
    }
}
