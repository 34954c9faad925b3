use std::sync::Arc;

use crate::llm_client::QuestionGenerator;
use crate::screening::session::SessionContext;
use crate::screening::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Language model behind the capability trait. `LlmClient` in production.
    pub llm: Arc<dyn QuestionGenerator>,
    pub sessions: SessionStore,
    /// Threshold and model id carried into every session transition.
    pub session_ctx: SessionContext,
}
