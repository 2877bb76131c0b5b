//! Alpha Vantage `TIME_SERIES_DAILY` response types.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::FeedError;

/// `Meta Data` block of a daily time-series response.
#[derive(Debug, Default, Deserialize)]
pub struct MetaData {
    #[serde(rename = "2. Symbol", default)]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: String,
}

/// One daily bar. Alpha Vantage sends every number as a string.
#[derive(Debug, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: String,
}

/// Full `TIME_SERIES_DAILY` body.
///
/// On failure the API still answers 200 OK, with one of `Error Message`,
/// `Note` (rate limit) or `Information` instead of the time series.
#[derive(Debug, Deserialize)]
pub struct DailyResponse {
    #[serde(rename = "Meta Data", default)]
    pub meta: Option<MetaData>,
    /// Keyed by `YYYY-MM-DD`, so map order is date order.
    #[serde(rename = "Time Series (Daily)", default)]
    pub series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl DailyResponse {
    /// Parse a raw response body.
    pub fn from_json(body: &str) -> Result<Self, FeedError> {
        serde_json::from_str(body)
            .map_err(|e| FeedError::Parse(format!("invalid daily series JSON: {e}")))
    }

    /// Date and closing price of the most recent bar.
    pub fn latest_close(&self) -> Result<(&str, f64), FeedError> {
        if let Some(msg) = &self.error_message {
            return Err(FeedError::Api(msg.clone()));
        }
        if let Some(note) = &self.note {
            return Err(FeedError::RateLimit(note.clone()));
        }

        let Some(series) = &self.series else {
            return Err(match &self.information {
                Some(info) => FeedError::Api(info.clone()),
                None => FeedError::Parse("missing \"Time Series (Daily)\"".into()),
            });
        };

        let (date, bar) = series
            .iter()
            .next_back()
            .ok_or_else(|| FeedError::Parse("daily series is empty".into()))?;

        let close: f64 = bar
            .close
            .trim()
            .parse()
            .map_err(|_| FeedError::Parse(format!("bad close {:?} on {date}", bar.close)))?;

        Ok((date.as_str(), close))
    }
}

/// Parse a `TIME_SERIES_DAILY` body and return the latest close.
pub fn parse_latest_close(body: &str) -> Result<f64, FeedError> {
    DailyResponse::from_json(body)?
        .latest_close()
        .map(|(_, close)| close)
}
