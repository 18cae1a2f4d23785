//! Section header detection.
//!
//! A line is a header candidate only when, after stripping decoration glyphs
//! and collapsing whitespace, it is 2–40 characters and at most 4 tokens.
//! Candidates are then matched against `HEADER_PATTERNS`: buckets in table
//! order, patterns in list order, first match wins.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::models::resume::SectionName;

pub const MIN_HEADER_CHARS: usize = 2;
pub const MAX_HEADER_CHARS: usize = 40;
pub const MAX_HEADER_TOKENS: usize = 4;

/// Bullet, separator and arrow glyphs removed before matching.
const DECORATION_GLYPHS: &[char] = &[
    ':', '-', '|', '•', '●', '○', '■', '□', '▪', '▫', '→', '►', '▶',
];

/// Anchored, case-insensitive header patterns per bucket.
pub const HEADER_PATTERNS: &[(SectionName, &[&str])] = &[
    (
        SectionName::Experience,
        &[
            r"^experience$",
            r"^work\s*experience$",
            r"^professional\s*experience$",
            r"^employment(\s*history)?$",
            r"^work\s*history$",
            r"^career\s*history$",
            r"^relevant\s*experience$",
        ],
    ),
    (
        SectionName::Education,
        &[
            r"^education$",
            r"^academic\s*(background|qualifications)?$",
            r"^qualifications?$",
            r"^education\s*&\s*certifications?$",
            r"^educational\s*background$",
        ],
    ),
    (
        SectionName::Skills,
        &[
            r"^skills?$",
            r"^technical\s*skills?$",
            r"^core\s*competenc(ies|y)$",
            r"^competenc(ies|y)$",
            r"^technologies?$",
            r"^programming\s*(languages?|skills?)?$",
            r"^tech\s*stack$",
            r"^expertise$",
            r"^areas?\s*of\s*expertise$",
        ],
    ),
    (
        SectionName::Projects,
        &[
            r"^projects?$",
            r"^personal\s*projects?$",
            r"^academic\s*projects?$",
            r"^key\s*projects?$",
            r"^side\s*projects?$",
            r"^notable\s*projects?$",
        ],
    ),
    (
        SectionName::Other,
        &[
            r"^certifications?$",
            r"^courses?$",
            r"^licenses?$",
            r"^awards?$",
            r"^achievements?$",
            r"^publications?$",
            r"^interests?$",
            r"^hobbies?$",
            r"^activities?$",
            r"^summary$",
            r"^objective$",
            r"^about(\s*me)?$",
            r"^profile$",
        ],
    ),
];

static HEADER_TABLE: Lazy<Vec<(SectionName, Vec<Regex>)>> = Lazy::new(|| {
    HEADER_PATTERNS
        .iter()
        .map(|(section, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| {
                    RegexBuilder::new(p)
                        .case_insensitive(true)
                        .build()
                        .unwrap()
                })
                .collect();
            (*section, compiled)
        })
        .collect()
});

/// Strips decoration glyphs and collapses whitespace runs to single spaces.
pub fn normalize_header_candidate(line: &str) -> String {
    let stripped: String = line
        .chars()
        .filter(|c| !DECORATION_GLYPHS.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the bucket a line opens, or `None` if it is not a header.
pub fn classify_header(line: &str) -> Option<SectionName> {
    let candidate = normalize_header_candidate(line);

    let len = candidate.chars().count();
    if !(MIN_HEADER_CHARS..=MAX_HEADER_CHARS).contains(&len) {
        return None;
    }
    if candidate.split(' ').count() > MAX_HEADER_TOKENS {
        return None;
    }

    HEADER_TABLE
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&candidate)))
        .map(|(section, _)| *section)
}
