//! Section segmentation as a single fold over the text's lines.
//!
//! The fold carries the active bucket and the sections built so far. Header
//! lines switch the active bucket and are dropped; blank lines are dropped
//! without touching the active bucket; every other line is appended to the
//! active bucket.

use tracing::debug;

use super::headers::classify_header;
use crate::models::resume::{ResumeSections, SectionName};

#[derive(Debug, Clone)]
struct SegmentState {
    active: SectionName,
    sections: ResumeSections,
}

impl Default for SegmentState {
    fn default() -> Self {
        Self {
            active: SectionName::Other,
            sections: ResumeSections::default(),
        }
    }
}

impl SegmentState {
    fn advance(self, line: &str) -> Self {
        if line.trim().is_empty() {
            return self;
        }
        match classify_header(line) {
            Some(section) => Self {
                active: section,
                ..self
            },
            None => Self {
                sections: self.sections.with_line(self.active, line),
                ..self
            },
        }
    }
}

/// Splits résumé text into the five section buckets.
pub fn segment(text: &str) -> ResumeSections {
    let sections = text
        .lines()
        .fold(SegmentState::default(), SegmentState::advance)
        .sections;

    debug!(
        experience = sections.experience.len(),
        education = sections.education.len(),
        skills = sections.skills.len(),
        projects = sections.projects.len(),
        other = sections.other.len(),
        "Parsed sections"
    );
    sections
}
