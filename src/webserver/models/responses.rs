/// API response type definitions
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub price_cache: PriceCacheStatus,
}

/// State of the token price slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCacheStatus {
    pub populated: bool,
    pub price: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
}
