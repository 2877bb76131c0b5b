//! Price acquisition: the [`PriceSource`] capability and the fallback policy
//! applied when a lookup fails.
//!
//! A price source maps a symbol to a positive price or an error. The offline
//! [`FixedPrices`] table and any `Fn(&str) -> Result<f64, PriceError>` closure
//! implement it here; live market-data clients live in `rebalance-prices`.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::PriceError;

/// Price substituted when a lookup fails under the default policy.
pub const DEFAULT_FALLBACK_PRICE: f64 = 100.0;

/// Something that can quote a price for a symbol.
pub trait PriceSource {
    /// Current price for `symbol`. Implementations may block.
    fn price(&self, symbol: &str) -> Result<f64, PriceError>;
}

impl<F> PriceSource for F
where
    F: Fn(&str) -> Result<f64, PriceError>,
{
    fn price(&self, symbol: &str) -> Result<f64, PriceError> {
        self(symbol)
    }
}

/// In-memory price table.
#[derive(Clone, Debug, Default)]
pub struct FixedPrices {
    prices: FxHashMap<String, f64>,
}

impl FixedPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, symbol: &str, price: f64) -> Self {
        self.insert(symbol, price);
        self
    }

    pub fn insert(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.to_string(), price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FixedPrices {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(s, p)| (s.into(), p)).collect(),
        }
    }
}

impl PriceSource for FixedPrices {
    fn price(&self, symbol: &str) -> Result<f64, PriceError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| PriceError::unavailable(symbol, "no fixed price configured"))
    }
}

/// What to do when a price lookup fails.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackPolicy {
    /// Use this price instead and report a [`PriceWarning`].
    Substitute(f64),
    /// Propagate the lookup error.
    Fail,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Substitute(DEFAULT_FALLBACK_PRICE)
    }
}

/// Non-fatal notice that a fallback price was used for a symbol.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceWarning {
    pub symbol: String,
    pub fallback_price: f64,
    pub reason: String,
}

impl fmt::Display for PriceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: price lookup failed ({}), using fallback ${:.2}",
            self.symbol, self.reason, self.fallback_price
        )
    }
}

/// Look up a price and reject non-positive or non-finite quotes.
pub fn checked_price(source: &dyn PriceSource, symbol: &str) -> Result<f64, PriceError> {
    let price = source.price(symbol)?;
    if !price.is_finite() || price <= 0.0 {
        return Err(PriceError::NotPositive {
            symbol: symbol.to_string(),
            price,
        });
    }
    Ok(price)
}
