mod responses;

pub use responses::{ErrorResponse, HealthResponse, PriceCacheStatus};
