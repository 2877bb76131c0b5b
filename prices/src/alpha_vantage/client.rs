//! Alpha Vantage REST API client.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use super::types::DailyResponse;
use crate::error::FeedError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking Alpha Vantage REST client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl AlphaVantageClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        if api_key.is_empty() {
            return Err(FeedError::Api("API key is empty".into()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Daily time series for `symbol` (GET /query?function=TIME_SERIES_DAILY).
    pub fn daily(&self, symbol: &str) -> Result<DailyResponse, FeedError> {
        let url = format!("{}/query", self.base_url);
        debug!("GET {url} TIME_SERIES_DAILY {symbol}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| FeedError::Connection(format!("daily request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(FeedError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .text()
            .map_err(|e| FeedError::Connection(format!("failed to read daily response: {e}")))?;
        DailyResponse::from_json(&body)
    }
}
