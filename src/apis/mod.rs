//! Upstream data clients
//!
//! Two sources feed the estimator: the Mocaverse staking API (total stake
//! burnt, fetched per request) and CoinGecko (token price, fetched by the
//! background updater). Failures stop here: they are logged and reported to
//! callers as `None`.

pub mod client;
pub mod coingecko;
pub mod mocaverse;

#[cfg(test)]
pub(crate) mod test_server;

use crate::config::{TokenConfig, UpstreamConfig};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use client::HttpClient;
use coingecko::CoinGeckoClient;
use mocaverse::MocaverseClient;

/// Source of the two upstream values
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Total stake burnt across all participants, `None` on any failure
    async fn fetch_stake_burnt(&self) -> Option<f64>;

    /// Current token price in USD, `None` on any failure
    async fn fetch_price(&self) -> Option<f64>;
}

/// Production upstream backed by the Mocaverse and CoinGecko APIs
pub struct UpstreamClient {
    mocaverse: MocaverseClient,
    coingecko: CoinGeckoClient,
}

impl UpstreamClient {
    pub fn new(upstream: &UpstreamConfig, token: &TokenConfig) -> Result<Self, String> {
        let http_client = HttpClient::new(upstream.request_timeout_secs)?;

        Ok(Self {
            mocaverse: MocaverseClient::new(http_client.clone(), upstream.stake_url.clone()),
            coingecko: CoinGeckoClient::new(
                http_client,
                upstream.price_url.clone(),
                token.price_id.clone(),
                upstream.price_format,
            ),
        })
    }
}

#[async_trait]
impl UpstreamSource for UpstreamClient {
    async fn fetch_stake_burnt(&self) -> Option<f64> {
        match self.mocaverse.fetch_stake_burnt().await {
            Ok(total) => {
                logger::debug(
                    LogTag::Api,
                    &format!(
                        "stakingPowerBurnt={} from {}",
                        total,
                        self.mocaverse.project_url()
                    ),
                );
                Some(total)
            }
            Err(e) => {
                logger::error(LogTag::Api, &format!("Error fetching Mocaverse data: {}", e));
                None
            }
        }
    }

    async fn fetch_price(&self) -> Option<f64> {
        match self.coingecko.fetch_price().await {
            Ok(price) => {
                logger::debug(
                    LogTag::Api,
                    &format!("price={} USD from {}", price, self.coingecko.price_url()),
                );
                Some(price)
            }
            Err(e) => {
                logger::error(LogTag::Api, &format!("Error fetching token price: {}", e));
                None
            }
        }
    }
}
