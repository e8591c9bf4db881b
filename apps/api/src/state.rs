use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::policies::store::PolicyStore;
use crate::tracker::ProjectTracker;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client is constructed once at startup — no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub policies: PolicyStore,
    /// Pluggable project tracker. Mock by default, Jira-backed when configured.
    pub tracker: Arc<dyn ProjectTracker>,
    /// Kept for handlers that need deployment settings at request time.
    #[allow(dead_code)]
    pub config: Config,
}
