use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    webserver::{
        models::{HealthResponse, PriceCacheStatus},
        state::AppState,
        utils::success_response,
    },
};

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

/// GET /api/health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    logger::debug(LogTag::Webserver, "Health check endpoint called");

    let snapshot = state.price_cache.snapshot();
    let price_cache = PriceCacheStatus {
        populated: snapshot.is_some(),
        price: snapshot.map(|s| s.price_usd),
        updated_at: snapshot.map(|s| s.updated_at),
        consecutive_failures: state.price_cache.consecutive_failures(),
    };

    let response = HealthResponse {
        status: if price_cache.populated { "ok" } else { "degraded" }.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        price_cache,
    };

    success_response(response)
}
