//! A single owned position: symbol, share count and current price.

use log::warn;

use crate::error::PriceError;
use crate::price::{FallbackPolicy, PriceSource, PriceWarning, checked_price};

/// One owned position.
///
/// Immutable once built. A refreshed price means building a new `Holding`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holding {
    symbol: String,
    shares: f64,
    price: f64,
}

/// A holding built from a [`PriceSource`], plus the warning raised if the
/// fallback price had to be used.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchedHolding {
    pub holding: Holding,
    pub warning: Option<PriceWarning>,
}

impl Holding {
    /// Build a holding with a known price.
    ///
    /// The price is not validated here; a non-positive price is reported by
    /// [`Portfolio::rebalance`](crate::Portfolio::rebalance).
    pub fn new(symbol: impl Into<String>, shares: f64, price: f64) -> Self {
        debug_assert!(shares >= 0.0, "shares must be non-negative, got {shares}");
        Self {
            symbol: symbol.into(),
            shares,
            price,
        }
    }

    /// Build a holding whose price comes from `source`.
    ///
    /// With [`FallbackPolicy::Substitute`] a failed or non-positive quote never
    /// aborts construction: the fallback price is used and a [`PriceWarning`]
    /// is returned (and logged). With [`FallbackPolicy::Fail`] the lookup error
    /// is returned.
    pub fn fetch(
        symbol: &str,
        shares: f64,
        source: &dyn PriceSource,
        policy: &FallbackPolicy,
    ) -> Result<FetchedHolding, PriceError> {
        match checked_price(source, symbol) {
            Ok(price) => Ok(FetchedHolding {
                holding: Holding::new(symbol, shares, price),
                warning: None,
            }),
            Err(e) => match *policy {
                FallbackPolicy::Substitute(fallback) => {
                    warn!("{symbol}: {e}; using fallback price {fallback:.2}");
                    Ok(FetchedHolding {
                        holding: Holding::new(symbol, shares, fallback),
                        warning: Some(PriceWarning {
                            symbol: symbol.to_string(),
                            fallback_price: fallback,
                            reason: e.to_string(),
                        }),
                    })
                }
                FallbackPolicy::Fail => Err(e),
            },
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn shares(&self) -> f64 {
        self.shares
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Market value: `shares * price`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.shares * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::FixedPrices;

    #[test]
    fn value_is_shares_times_price() {
        let meta = Holding::new("META", 30.0, 400.0);
        assert_eq!(meta.value(), 12_000.0);
        assert_eq!(meta.symbol(), "META");
        assert_eq!(meta.shares(), 30.0);
        assert_eq!(meta.price(), 400.0);
    }

    #[test]
    fn zero_shares_zero_value() {
        assert_eq!(Holding::new("AAPL", 0.0, 200.0).value(), 0.0);
    }

    #[test]
    fn fractional_shares() {
        let h = Holding::new("MSFT", 0.38, 400.0);
        assert!((h.value() - 152.0).abs() < 1e-9);
    }

    #[test]
    fn fetch_uses_source_price() {
        let prices = FixedPrices::new().with("AAPL", 200.0);
        let fetched = Holding::fetch("AAPL", 10.0, &prices, &FallbackPolicy::default()).unwrap();
        assert_eq!(fetched.holding.price(), 200.0);
        assert_eq!(fetched.holding.value(), 2_000.0);
        assert!(fetched.warning.is_none());
    }

    #[test]
    fn fetch_failure_falls_back_to_100() {
        let prices = FixedPrices::new();
        let fetched = Holding::fetch("META", 30.0, &prices, &FallbackPolicy::default()).unwrap();
        assert_eq!(fetched.holding.price(), 100.0);
        assert_eq!(fetched.holding.value(), 3_000.0);

        let warning = fetched.warning.expect("fallback must be reported");
        assert_eq!(warning.symbol, "META");
        assert_eq!(warning.fallback_price, 100.0);
        assert!(warning.reason.contains("META"));
    }

    #[test]
    fn fetch_non_positive_quote_falls_back() {
        let prices = FixedPrices::new().with("BAD", 0.0);
        let fetched =
            Holding::fetch("BAD", 5.0, &prices, &FallbackPolicy::Substitute(42.0)).unwrap();
        assert_eq!(fetched.holding.price(), 42.0);
        assert!(fetched.warning.is_some());
    }

    #[test]
    fn fetch_fail_policy_propagates() {
        let prices = FixedPrices::new();
        let err = Holding::fetch("META", 30.0, &prices, &FallbackPolicy::Fail).unwrap_err();
        assert!(matches!(err, PriceError::Unavailable { .. }));
    }
}
