//! Shared application state.

use std::sync::Arc;

use anyhow::Result;

use crate::config::Settings;
use crate::orchestrator::SuggestOrchestrator;
use crate::rate_limit::RateLimiter;

/// State handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SuggestOrchestrator>,
    pub settings: Arc<Settings>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Build the orchestrator and limiter from `settings`
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let settings = Arc::new(settings);
        let orchestrator = SuggestOrchestrator::new(settings.clone())?;
        Ok(Self::new(orchestrator))
    }

    /// Wrap an already configured orchestrator
    pub fn new(orchestrator: SuggestOrchestrator) -> Self {
        let settings = orchestrator.settings().clone();
        let limiter = Arc::new(RateLimiter::new(settings.rate_limit));
        Self {
            orchestrator: Arc::new(orchestrator),
            settings,
            limiter,
        }
    }
}
