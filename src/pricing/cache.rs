use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};

/// Last successfully fetched price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub price_usd: f64,
    pub updated_at: DateTime<Utc>,
}

/// Single-slot price store
///
/// Written only by the background updater, read by request handlers. The
/// slot is either empty or holds a positive finite price; once populated it
/// is never cleared, only replaced.
#[derive(Debug, Default)]
pub struct PriceCache {
    slot: RwLock<Option<PriceSnapshot>>,
    consecutive_failures: AtomicU32,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current price, `None` until the first successful refresh
    pub fn get(&self) -> Option<f64> {
        self.slot.read().map(|snapshot| snapshot.price_usd)
    }

    pub fn snapshot(&self) -> Option<PriceSnapshot> {
        *self.slot.read()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Replace the cached price
    ///
    /// Returns false and leaves the slot untouched for zero, negative or
    /// non-finite prices.
    pub fn store(&self, price_usd: f64) -> bool {
        if !is_valid_price(price_usd) {
            return false;
        }

        *self.slot.write() = Some(PriceSnapshot {
            price_usd,
            updated_at: Utc::now(),
        });
        self.consecutive_failures.store(0, Ordering::Relaxed);
        true
    }

    /// Note a failed refresh; the cached price is kept
    pub fn record_failure(&self) -> u32 {
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }
}

pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}
