//! Price feed error types.

use rebalance::PriceError;

/// Errors that can occur while talking to a market-data feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl FeedError {
    /// Convert into the core [`PriceError`] for `symbol`.
    pub fn into_price_error(self, symbol: &str) -> PriceError {
        PriceError::unavailable(symbol, self.to_string())
    }
}
