//! Alpha Vantage daily-close price source.
//!
//! Prices are the latest `4. close` of the `TIME_SERIES_DAILY` series, so they
//! can be a trading day stale. Blocking (sync) via reqwest::blocking.

pub mod client;
pub mod types;

use std::time::Duration;

use rebalance::{PriceError, PriceSource};

use crate::error::FeedError;
use client::{AlphaVantageClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Connection settings. The API key is passed in explicitly; reading it from
/// the environment is the caller's business.
#[derive(Clone, Debug)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Alpha Vantage implementation of [`PriceSource`].
#[derive(Debug)]
pub struct AlphaVantage {
    client: AlphaVantageClient,
}

impl AlphaVantage {
    pub fn new(config: &AlphaVantageConfig) -> Result<Self, FeedError> {
        let client = AlphaVantageClient::new(&config.api_key, &config.base_url, config.timeout)?;
        Ok(Self { client })
    }

    /// Most recent daily close for `symbol`.
    pub fn latest_close(&self, symbol: &str) -> Result<f64, FeedError> {
        let daily = self.client.daily(symbol)?;
        let (date, close) = daily.latest_close()?;
        log::debug!("{symbol}: close {close} on {date}");
        Ok(close)
    }
}

impl PriceSource for AlphaVantage {
    fn price(&self, symbol: &str) -> Result<f64, PriceError> {
        self.latest_close(symbol).map_err(|e| e.into_price_error(symbol))
    }
}
