//! Token price cache and its background updater
//!
//! The updater refreshes the cache on a fixed interval for the lifetime of
//! the process. A failed refresh is logged and leaves the previous price in
//! place; there is no retry between ticks.

pub mod cache;

pub use cache::{is_valid_price, PriceCache, PriceSnapshot};

use crate::apis::UpstreamSource;
use crate::logger::{self, LogTag};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Run one refresh cycle, returning whether the cache was updated
pub async fn refresh_price(upstream: &dyn UpstreamSource, cache: &PriceCache) -> bool {
    let reason = match upstream.fetch_price().await {
        Some(price) => {
            if cache.store(price) {
                logger::debug(LogTag::Pricing, &format!("Price updated: {} USD", price));
                return true;
            }
            format!("rejected non-positive price {}", price)
        }
        None => "upstream fetch failed".to_string(),
    };

    let failures = cache.record_failure();
    logger::warning(
        LogTag::Pricing,
        &format!(
            "Price refresh failed: {} (keeping previous value, {} consecutive failures)",
            reason, failures
        ),
    );
    false
}

/// Spawn the periodic updater
///
/// The first refresh runs immediately. The task ends when `shutdown` is
/// notified.
pub fn start_price_updater(
    upstream: Arc<dyn UpstreamSource>,
    cache: Arc<PriceCache>,
    refresh_interval: Duration,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    // Created before spawning so a notification sent before the task runs is kept
    let shutdown_signal = shutdown.notified_owned();

    tokio::spawn(async move {
        tokio::pin!(shutdown_signal);

        let mut ticker = tokio::time::interval(refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        logger::info(
            LogTag::Pricing,
            &format!(
                "Price updater running (interval {}s)",
                refresh_interval.as_secs()
            ),
        );

        loop {
            tokio::select! {
                _ = &mut shutdown_signal => {
                    logger::info(LogTag::Pricing, "Price updater stopping");
                    break;
                }
                _ = ticker.tick() => {
                    refresh_price(upstream.as_ref(), &cache).await;
                }
            }
        }
    })
}
