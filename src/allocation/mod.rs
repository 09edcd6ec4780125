//! Airdrop allocation estimate
//!
//! Combines a participant's burn with the live stake total and the cached
//! token price.

pub mod calculate;

pub use calculate::{calculate_allocation, parse_user_burn, Allocation};

use crate::apis::UpstreamSource;
use crate::config::TokenConfig;
use crate::errors::{AirdropError, AirdropResult};
use crate::logger::{self, LogTag};
use crate::pricing::{is_valid_price, PriceCache};
use serde::Serialize;
use std::sync::Arc;

/// Result returned to the web client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEstimate {
    pub token_name: String,
    pub token_price: f64,
    pub total_burnt: f64,
    pub tokens_received: f64,
    pub airdrop_value: f64,
}

pub struct AllocationEstimator {
    token: TokenConfig,
    upstream: Arc<dyn UpstreamSource>,
    price_cache: Arc<PriceCache>,
}

impl AllocationEstimator {
    pub fn new(
        token: TokenConfig,
        upstream: Arc<dyn UpstreamSource>,
        price_cache: Arc<PriceCache>,
    ) -> Self {
        Self {
            token,
            upstream,
            price_cache,
        }
    }

    pub fn token(&self) -> &TokenConfig {
        &self.token
    }

    /// Estimate the allocation for a raw `user_burn` form value
    ///
    /// The stake total is fetched live on every call. When no usable price is
    /// cached the stake endpoint is not contacted at all.
    pub async fn estimate(&self, raw_user_burn: &str) -> AirdropResult<AllocationEstimate> {
        let user_burn = parse_user_burn(raw_user_burn)?;

        let price = self.price_cache.get();
        if !price.map_or(false, is_valid_price) {
            logger::warning(LogTag::Pricing, "Token price not cached yet");
            return Err(AirdropError::PriceUnavailable);
        }

        let total_burnt = self.upstream.fetch_stake_burnt().await;
        if total_burnt.is_none() {
            logger::warning(LogTag::Api, "Failed to fetch total staking power");
        }

        let allocation = calculate_allocation(
            self.token.total_token_offered as f64,
            user_burn,
            total_burnt,
            price,
        )?;

        Ok(AllocationEstimate {
            token_name: self.token.name.clone(),
            token_price: price.unwrap_or_default(),
            total_burnt: total_burnt.unwrap_or_default(),
            tokens_received: allocation.tokens_received,
            airdrop_value: allocation.airdrop_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::test_support::ScriptedUpstream;

    fn estimator(upstream: Arc<ScriptedUpstream>, price: Option<f64>) -> AllocationEstimator {
        let cache = Arc::new(PriceCache::new());
        if let Some(price) = price {
            cache.store(price);
        }
        AllocationEstimator::new(TokenConfig::default(), upstream, cache)
    }

    #[tokio::test]
    async fn test_estimate_reference_example() {
        let upstream = Arc::new(ScriptedUpstream::new(&[Some(1_000_000.0)], &[]));
        let estimate = estimator(upstream, Some(0.05)).estimate("10").await.unwrap();

        assert_eq!(estimate.token_name, "kip");
        assert_eq!(estimate.token_price, 0.05);
        assert_eq!(estimate.total_burnt, 1_000_000.0);
        assert!((estimate.tokens_received - 500.0).abs() < 1e-9);
        assert!((estimate.airdrop_value - 25.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unset_price_skips_stake_fetch() {
        let upstream = Arc::new(ScriptedUpstream::new(&[Some(1_000_000.0)], &[]));
        let result = estimator(upstream.clone(), None).estimate("10").await;

        assert_eq!(result, Err(AirdropError::PriceUnavailable));
        assert_eq!(upstream.stake_calls(), 0);
    }

    #[tokio::test]
    async fn test_stake_failure() {
        let upstream = Arc::new(ScriptedUpstream::new(&[None], &[]));
        let result = estimator(upstream.clone(), Some(0.05)).estimate("10").await;

        assert_eq!(result, Err(AirdropError::StakeUnavailable));
        assert_eq!(upstream.stake_calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_stake_is_unavailable() {
        let upstream = Arc::new(ScriptedUpstream::new(&[Some(0.0)], &[]));
        let result = estimator(upstream, Some(0.05)).estimate("10").await;
        assert_eq!(result, Err(AirdropError::StakeUnavailable));
    }

    #[tokio::test]
    async fn test_invalid_input_checked_first() {
        let upstream = Arc::new(ScriptedUpstream::new(&[Some(1_000_000.0)], &[]));
        let result = estimator(upstream.clone(), None).estimate("abc").await;

        assert!(matches!(result, Err(AirdropError::InvalidInput(_))));
        assert_eq!(upstream.stake_calls(), 0);
    }
}
