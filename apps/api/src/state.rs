use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when `OPENAI_API_KEY` is unset; generation then fails per request.
    pub llm: Option<LlmClient>,
    pub config: Config,
}
