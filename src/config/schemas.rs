// Configuration schema - every value has an in-source default

use serde::{Deserialize, Serialize};

pub const DEFAULT_STAKE_URL: &str =
    "https://api.staking.mocaverse.xyz/api/mocadrop/projects/kip-protocol";
pub const DEFAULT_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Shape of the price endpoint response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFormat {
    /// `{"<token id>": {"usd": 0.05}}`
    SimplePrice,
    /// `{"stats": [[timestamp, price], ...]}`, last entry wins
    PriceChart,
}

// ============================================================================
// TOKEN
// ============================================================================

config_struct! {
    /// Airdropped token
    pub struct TokenConfig {
        /// Display name returned to clients
        name: String = "kip".to_string(),

        /// Identifier used when querying the price endpoint
        price_id: String = "kip".to_string(),

        /// Fixed number of tokens allocated to the airdrop
        total_token_offered: u64 = 50_000_000,
    }
}

// ============================================================================
// UPSTREAM
// ============================================================================

config_struct! {
    /// Upstream data endpoints
    pub struct UpstreamConfig {
        /// Staking endpoint exposing `stakingPowerBurnt`
        stake_url: String = DEFAULT_STAKE_URL.to_string(),

        /// Price endpoint
        price_url: String = DEFAULT_PRICE_URL.to_string(),

        /// Response shape of `price_url`
        price_format: PriceFormat = PriceFormat::SimplePrice,

        /// Per-request timeout (seconds)
        request_timeout_secs: u64 = 30,
    }
}

// ============================================================================
// PRICING
// ============================================================================

config_struct! {
    /// Background price updater
    pub struct PricingConfig {
        /// Seconds between price refreshes
        refresh_interval_secs: u64 = 60,
    }
}

// ============================================================================
// WEBSERVER
// ============================================================================

config_struct! {
    /// Webserver listener
    pub struct WebserverConfig {
        /// Host/IP address to bind
        host: String = "127.0.0.1".to_string(),

        /// Port to bind
        port: u16 = 5000,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        token: TokenConfig = TokenConfig::default(),
        upstream: UpstreamConfig = UpstreamConfig::default(),
        pricing: PricingConfig = PricingConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

impl Config {
    /// Check values that would make the service meaningless
    pub fn validate(&self) -> Result<(), String> {
        if self.token.name.trim().is_empty() {
            return Err("token.name must not be empty".to_string());
        }
        if self.token.price_id.trim().is_empty() {
            return Err("token.price_id must not be empty".to_string());
        }
        if self.token.total_token_offered == 0 {
            return Err("token.total_token_offered must be greater than zero".to_string());
        }
        if self.upstream.stake_url.trim().is_empty() {
            return Err("upstream.stake_url must not be empty".to_string());
        }
        if self.upstream.price_url.trim().is_empty() {
            return Err("upstream.price_url must not be empty".to_string());
        }
        if self.upstream.request_timeout_secs == 0 {
            return Err("upstream.request_timeout_secs must be greater than zero".to_string());
        }
        if self.pricing.refresh_interval_secs == 0 {
            return Err("pricing.refresh_interval_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
