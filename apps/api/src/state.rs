use std::sync::Arc;

use crate::config::Config;
use crate::recommendation::registry::SharedRegistry;
use crate::recommendation::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Career models; swapped as a whole on reload.
    pub registry: Arc<SharedRegistry>,
    /// Pluggable scoring engine. Default: LogisticScoringEngine.
    pub engine: Arc<dyn ScoringEngine>,
}
