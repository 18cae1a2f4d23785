use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{ResumeSections, SectionName};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

const POINTS_PER_METRIC: usize = 3;
const METRIC_CAP: usize = 30;

/// Text the impact metrics and the bullet critique look at: the experience
/// bucket, or the whole document when that bucket is empty.
pub fn metric_source<'a>(full_text: &'a str, sections: &'a ResumeSections) -> &'a str {
    let experience = sections.get(SectionName::Experience);
    if experience.is_empty() {
        full_text
    } else {
        experience
    }
}

/// Number of maximal ASCII digit runs.
pub fn count_metrics(text: &str) -> usize {
    DIGIT_RUN.find_iter(text).count()
}

/// 0–100 impact score: three points per number, capped at thirty, rescaled.
pub fn content_impact(metric_count: usize) -> u32 {
    let raw = (metric_count * POINTS_PER_METRIC).min(METRIC_CAP);
    (raw as f64 * 100.0 / METRIC_CAP as f64).round() as u32
}
