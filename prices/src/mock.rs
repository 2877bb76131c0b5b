//! Mock price source for testing: implements [`PriceSource`] with scripted
//! prices and failures.
//!
//! Use this in tests to simulate a market-data feed without network calls.
//!
//! ```
//! use rebalance::{FallbackPolicy, Holding};
//! use rebalance_prices::MockPriceSource;
//!
//! let source = MockPriceSource::builder()
//!     .with_price("AAPL", 200.0)
//!     .with_failure("META", "rate limited")
//!     .build();
//!
//! let meta = Holding::fetch("META", 30.0, &source, &FallbackPolicy::default()).unwrap();
//! assert_eq!(meta.holding.price(), 100.0);
//! assert_eq!(source.lookups(), ["META"]);
//! ```

use std::sync::Mutex;

use rebalance::{PriceError, PriceSource};

/// Scripted response for one symbol.
#[derive(Clone, Debug)]
enum Scripted {
    Price(f64),
    Failure(String),
}

/// Builder for `MockPriceSource`.
#[derive(Default)]
pub struct MockPriceSourceBuilder {
    responses: Vec<(String, Scripted)>,
}

impl MockPriceSourceBuilder {
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.responses.push((symbol.to_string(), Scripted::Price(price)));
        self
    }

    pub fn with_failure(mut self, symbol: &str, reason: &str) -> Self {
        self.responses
            .push((symbol.to_string(), Scripted::Failure(reason.to_string())));
        self
    }

    pub fn build(self) -> MockPriceSource {
        MockPriceSource {
            responses: self.responses,
            lookups: Mutex::new(Vec::new()),
        }
    }
}

/// A mock price source that records every lookup.
///
/// Unscripted symbols fail with [`PriceError::Unavailable`]. When a symbol is
/// scripted twice, the later entry wins.
pub struct MockPriceSource {
    responses: Vec<(String, Scripted)>,
    lookups: Mutex<Vec<String>>,
}

impl MockPriceSource {
    pub fn builder() -> MockPriceSourceBuilder {
        MockPriceSourceBuilder::default()
    }

    /// Symbols looked up so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl PriceSource for MockPriceSource {
    fn price(&self, symbol: &str) -> Result<f64, PriceError> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(symbol.to_string());
        }

        match self.responses.iter().rev().find(|(s, _)| s == symbol) {
            Some((_, Scripted::Price(p))) => Ok(*p),
            Some((_, Scripted::Failure(reason))) => {
                Err(PriceError::unavailable(symbol, reason.as_str()))
            }
            None => Err(PriceError::unavailable(symbol, "mock: no scripted price")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prices_and_failures() {
        let source = MockPriceSource::builder()
            .with_price("AAPL", 200.0)
            .with_failure("META", "timeout")
            .build();

        assert_eq!(source.price("AAPL"), Ok(200.0));
        assert_eq!(
            source.price("META"),
            Err(PriceError::unavailable("META", "timeout"))
        );
        assert!(source.price("MSFT").is_err());
        assert_eq!(source.lookups(), ["AAPL", "META", "MSFT"]);
    }

    #[test]
    fn later_script_wins() {
        let source = MockPriceSource::builder()
            .with_failure("SPY", "halted")
            .with_price("SPY", 430.0)
            .build();
        assert_eq!(source.price("SPY"), Ok(430.0));
    }

    #[test]
    fn empty_mock_fails_everything() {
        let source = MockPriceSource::builder().build();
        assert!(source.price("AAPL").is_err());
        assert_eq!(source.lookups().len(), 1);
    }
}
