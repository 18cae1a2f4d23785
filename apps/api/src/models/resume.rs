use serde::{Deserialize, Serialize};

/// The five buckets a résumé's lines are sorted into.
///
/// Declaration order is the canonical order: it drives map ordering in
/// serialized section scores and the order header patterns are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Experience,
    Education,
    Skills,
    Projects,
    Other,
}

impl SectionName {
    pub const ALL: [SectionName; 5] = [
        SectionName::Experience,
        SectionName::Education,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Experience => "experience",
            SectionName::Education => "education",
            SectionName::Skills => "skills",
            SectionName::Projects => "projects",
            SectionName::Other => "other",
        }
    }
}

/// Segmented résumé text. Each bucket holds its lines newline-terminated,
/// in the order they appeared in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub other: String,
}

impl ResumeSections {
    pub fn get(&self, name: SectionName) -> &str {
        match name {
            SectionName::Experience => &self.experience,
            SectionName::Education => &self.education,
            SectionName::Skills => &self.skills,
            SectionName::Projects => &self.projects,
            SectionName::Other => &self.other,
        }
    }

    /// True when the bucket holds anything besides whitespace.
    pub fn has(&self, name: SectionName) -> bool {
        !self.get(name).trim().is_empty()
    }

    /// Returns the record with `line` (plus a newline) appended to `name`.
    pub fn with_line(mut self, name: SectionName, line: &str) -> Self {
        let bucket = match name {
            SectionName::Experience => &mut self.experience,
            SectionName::Education => &mut self.education,
            SectionName::Skills => &mut self.skills,
            SectionName::Projects => &mut self.projects,
            SectionName::Other => &mut self.other,
        };
        bucket.push_str(line);
        bucket.push('\n');
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionName, &str)> {
        SectionName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}
