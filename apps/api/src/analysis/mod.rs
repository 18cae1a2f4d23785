// Scoring Engine
// Implements: formatting, content-impact and skills-match sub-scores, their
// fixed-weight combination, and best-effort bullet critique with insights.

pub mod critique;
pub mod engine;
pub mod formatting;
pub mod handlers;
pub mod impact;
pub mod prompts;
pub mod relevance;
pub mod scoring;

pub use engine::analyze_resume;
