/// Shared application state for the webserver
use crate::allocation::AllocationEstimator;
use crate::config::TokenConfig;
use crate::pricing::PriceCache;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Allocation calculator backed by the live upstream
    pub estimator: Arc<AllocationEstimator>,

    /// Token price slot maintained by the price updater
    pub price_cache: Arc<PriceCache>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(estimator: Arc<AllocationEstimator>, price_cache: Arc<PriceCache>) -> Self {
        Self {
            estimator,
            price_cache,
            startup_time: chrono::Utc::now(),
        }
    }

    pub fn token(&self) -> &TokenConfig {
        self.estimator.token()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
