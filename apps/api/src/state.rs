use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::JsonGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative-language capability. Default: `LlmClient`; tests inject a fake.
    pub llm: Arc<dyn JsonGenerator>,
    pub config: Config,
}
