/// CoinGecko price client
///
/// API Documentation: https://docs.coingecko.com/reference/introduction
///
/// Supported response shapes:
/// 1. `/api/v3/simple/price?ids=<id>&vs_currencies=usd` - `{"<id>": {"usd": n}}`
/// 2. Price chart documents - `{"stats": [[timestamp, price], ...]}`
pub mod types;

use self::types::{PriceChartResponse, SimplePriceResponse};
use crate::apis::client::HttpClient;
use crate::config::PriceFormat;
use crate::errors::{AirdropError, AirdropResult};

const VS_CURRENCY: &str = "usd";

pub struct CoinGeckoClient {
    http_client: HttpClient,
    price_url: String,
    token_id: String,
    format: PriceFormat,
}

impl CoinGeckoClient {
    pub fn new(
        http_client: HttpClient,
        price_url: impl Into<String>,
        token_id: impl Into<String>,
        format: PriceFormat,
    ) -> Self {
        Self {
            http_client,
            price_url: price_url.into(),
            token_id: token_id.into(),
            format,
        }
    }

    pub fn price_url(&self) -> &str {
        &self.price_url
    }

    /// Fetch the current USD price of the configured token
    pub async fn fetch_price(&self) -> AirdropResult<f64> {
        let mut request = self
            .http_client
            .client()
            .get(&self.price_url)
            .header("Accept", "application/json");

        if self.format == PriceFormat::SimplePrice {
            request = request.query(&[
                ("ids", self.token_id.as_str()),
                ("vs_currencies", VS_CURRENCY),
            ]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AirdropError::transport(&self.price_url, e))?;

        if !response.status().is_success() {
            return Err(AirdropError::transport(
                &self.price_url,
                format!("HTTP {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AirdropError::transport(&self.price_url, e))?;

        let parsed = match self.format {
            PriceFormat::SimplePrice => parse_simple_price(&body, &self.token_id),
            PriceFormat::PriceChart => parse_price_chart(&body),
        };

        parsed.map_err(|reason| AirdropError::malformed(&self.price_url, reason))
    }
}

/// Extract `<token_id>.usd` from a simple price response
pub fn parse_simple_price(body: &str, token_id: &str) -> Result<f64, String> {
    let prices: SimplePriceResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    prices
        .get(token_id)
        .ok_or_else(|| format!("no entry for token '{}'", token_id))?
        .usd
        .ok_or_else(|| format!("no usd price for token '{}'", token_id))
}

/// Take the price of the most recent point of a price chart
pub fn parse_price_chart(body: &str) -> Result<f64, String> {
    let chart: PriceChartResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    let last = chart
        .stats
        .last()
        .ok_or_else(|| "stats array is empty".to_string())?;

    last.get(1)
        .copied()
        .ok_or_else(|| format!("stats entry has no price: {:?}", last))
}
