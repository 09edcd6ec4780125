use crate::apis::UpstreamSource;
use crate::logger::{self, LogTag};
use crate::pricing::{start_price_updater, PriceCache};
use crate::services::{Service, ServiceHealth};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub struct PriceService {
    upstream: Arc<dyn UpstreamSource>,
    cache: Arc<PriceCache>,
    refresh_interval: Duration,
}

impl PriceService {
    pub fn new(
        upstream: Arc<dyn UpstreamSource>,
        cache: Arc<PriceCache>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            upstream,
            cache,
            refresh_interval,
        }
    }
}

#[async_trait]
impl Service for PriceService {
    fn name(&self) -> &'static str {
        "price_updater"
    }

    fn priority(&self) -> i32 {
        20
    }

    async fn initialize(&mut self) -> Result<(), String> {
        if self.refresh_interval.is_zero() {
            return Err("price refresh interval must be non-zero".to_string());
        }
        Ok(())
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        logger::debug(LogTag::System, "Starting token price updater...");

        let handle = start_price_updater(
            self.upstream.clone(),
            self.cache.clone(),
            self.refresh_interval,
            shutdown,
        );

        Ok(vec![handle])
    }

    async fn health(&self) -> ServiceHealth {
        let failures = self.cache.consecutive_failures();
        match (self.cache.is_populated(), failures) {
            (true, 0) => ServiceHealth::Healthy,
            (true, n) => ServiceHealth::Degraded(format!(
                "serving last known price after {} failed refreshes",
                n
            )),
            (false, 0) => ServiceHealth::Starting,
            (false, n) => ServiceHealth::Unhealthy(format!(
                "no price fetched yet ({} failed refreshes)",
                n
            )),
        }
    }
}
