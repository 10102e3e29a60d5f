use std::sync::Arc;

use crate::analysis::oracle::ScoringOracle;
use crate::config::Config;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Live wizard sessions, in memory only.
    pub sessions: SessionRegistry,
    /// Pluggable scoring oracle. Default: GeminiOracle.
    pub oracle: Arc<dyn ScoringOracle>,
    pub config: Config,
}
