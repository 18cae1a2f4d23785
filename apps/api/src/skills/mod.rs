// Skill Matcher
// Implements: substring lookup against a fixed skill vocabulary and the
// résumé-versus-job-description gap report.

pub mod vocabulary;

pub use vocabulary::{analyze_gap, extract_skills};
