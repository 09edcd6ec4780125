/// Error types for the airdrop estimator
///
/// Upstream failures (`Transport`, `MalformedResponse`) never leave the API
/// client boundary; they are logged there and turned into an absent value.
/// The remaining variants are guard failures raised by the calculation and
/// mapped to HTTP responses by the webserver.
use thiserror::Error;

/// Message returned to web clients for every failure without a specific message
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AirdropError {
    #[error("Transport error from {endpoint}: {message}")] Transport {
        endpoint: String,
        message: String,
    },

    #[error("Malformed response from {endpoint}: {reason}")] MalformedResponse {
        endpoint: String,
        reason: String,
    },

    #[error("Invalid input: {0}")] InvalidInput(String),

    #[error("Failed to fetch total staking power from Mocaverse.")] StakeUnavailable,

    #[error("Failed to fetch token price from CoinGecko.")] PriceUnavailable,
}

impl AirdropError {
    pub fn transport(endpoint: &str, message: impl ToString) -> Self {
        AirdropError::Transport {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    pub fn malformed(endpoint: &str, reason: impl ToString) -> Self {
        AirdropError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Guard failures that carry their own message to the client
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, AirdropError::StakeUnavailable | AirdropError::PriceUnavailable)
    }

    /// Message safe to expose in an HTTP response body
    pub fn public_message(&self) -> String {
        if self.is_data_unavailable() {
            self.to_string()
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

pub type AirdropResult<T> = std::result::Result<T, AirdropError>;
