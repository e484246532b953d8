use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, scripted in tests.
    pub generator: Arc<dyn TextGenerator>,
    /// Outbound transport. Logs only unless SMTP sending is enabled.
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}
