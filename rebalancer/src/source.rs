//! Price-source selection from config.

use log::info;
use rebalance::{FixedPrices, PriceSource};
use rebalance_prices::alpha_vantage::{AlphaVantage, AlphaVantageConfig};

use crate::config::{PricesConfig, SourceKind};
use crate::error::{Error, Result};

/// Build the price source for holdings that carry no price.
///
/// `offline` forces the empty fixed table, so every lookup goes through the
/// fallback policy. The API key is only required for the live source.
pub fn build(
    config: &PricesConfig,
    api_key: Option<&str>,
    offline: bool,
) -> Result<Box<dyn PriceSource>> {
    if offline || config.source == SourceKind::Fixed {
        info!("Using fixed prices (no live lookups)");
        return Ok(Box::new(FixedPrices::new()));
    }

    let api_key = api_key.ok_or_else(|| {
        Error::PriceSource(format!(
            "no API key: set prices.api_key or ${}",
            config.api_key_env
        ))
    })?;

    let av_config = AlphaVantageConfig {
        api_key: api_key.to_string(),
        base_url: config.base_url.clone(),
        timeout: config.timeout(),
    };
    let source = AlphaVantage::new(&av_config).map_err(|e| Error::PriceSource(e.to_string()))?;
    info!("Using Alpha Vantage daily closes from {}", config.base_url);
    Ok(Box::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebalance::PriceError;

    #[test]
    fn offline_ignores_missing_key() {
        let source = build(&PricesConfig::default(), None, true).unwrap();
        assert!(matches!(
            source.price("AAPL"),
            Err(PriceError::Unavailable { .. })
        ));
    }

    #[test]
    fn fixed_source_needs_no_key() {
        let config = PricesConfig {
            source: SourceKind::Fixed,
            ..PricesConfig::default()
        };
        assert!(build(&config, None, false).is_ok());
    }

    #[test]
    fn live_source_requires_key() {
        let err = build(&PricesConfig::default(), None, false)
            .err()
            .unwrap();
        match err {
            Error::PriceSource(msg) => assert!(msg.contains("ALPHAVANTAGE_API_KEY")),
            other => panic!("expected PriceSource error, got {other:?}"),
        }
    }

    #[test]
    fn live_source_builds_with_key() {
        let config = PricesConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..PricesConfig::default()
        };
        assert!(build(&config, Some("demo"), false).is_ok());
    }
}
