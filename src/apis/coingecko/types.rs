use serde::Deserialize;
use std::collections::HashMap;

/// `/simple/price` response: token id -> currency -> price
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

#[derive(Debug, Clone, Deserialize)]
pub struct SimplePriceEntry {
    #[serde(default)]
    pub usd: Option<f64>,
}

/// Price chart response with `[timestamp_ms, price]` pairs, oldest first
#[derive(Debug, Clone, Deserialize)]
pub struct PriceChartResponse {
    #[serde(default)]
    pub stats: Vec<Vec<f64>>,
}
