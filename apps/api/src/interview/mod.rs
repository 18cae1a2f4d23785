// Interview preparation
// Implements: tailored question generation and STAR-method answer feedback,
// both with fixed fallbacks when the language model is unavailable.

pub mod feedback;
pub mod handlers;
pub mod prompts;
pub mod questions;
