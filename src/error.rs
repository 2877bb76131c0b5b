//! Error types for portfolio construction, rebalancing and price lookup.

/// Errors that abort portfolio construction or a rebalance pass.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RebalanceError {
    /// Target fractions do not sum to 1 (within [`ALLOCATION_TOLERANCE`]).
    ///
    /// [`ALLOCATION_TOLERANCE`]: crate::ALLOCATION_TOLERANCE
    #[error("target allocation sums to {sum}, expected 1.0")]
    InvalidAllocation { sum: f64 },

    /// A held symbol reached the share computation with a non-positive price.
    #[error("invalid price {price} for {symbol}: must be positive")]
    InvalidPrice { symbol: String, price: f64 },
}

/// Errors returned by a [`PriceSource`](crate::PriceSource).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("price unavailable for {symbol}: {reason}")]
    Unavailable { symbol: String, reason: String },

    #[error("price source returned {price} for {symbol}")]
    NotPositive { symbol: String, price: f64 },
}

impl PriceError {
    /// Shorthand for [`PriceError::Unavailable`].
    pub fn unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        PriceError::Unavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Symbol the failed lookup was for.
    pub fn symbol(&self) -> &str {
        match self {
            PriceError::Unavailable { symbol, .. } | PriceError::NotPositive { symbol, .. } => {
                symbol
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            RebalanceError::InvalidAllocation { sum: 0.9 }.to_string(),
            "target allocation sums to 0.9, expected 1.0"
        );
        assert_eq!(
            RebalanceError::InvalidPrice {
                symbol: "META".into(),
                price: 0.0
            }
            .to_string(),
            "invalid price 0 for META: must be positive"
        );
        assert_eq!(
            PriceError::unavailable("AAPL", "timeout").to_string(),
            "price unavailable for AAPL: timeout"
        );
    }

    #[test]
    fn is_error() {
        let err: Box<dyn std::error::Error> = Box::new(RebalanceError::InvalidAllocation { sum: 1.1 });
        assert!(err.to_string().contains("allocation"));
    }

    #[test]
    fn price_error_symbol() {
        assert_eq!(PriceError::unavailable("SPY", "x").symbol(), "SPY");
        let err = PriceError::NotPositive {
            symbol: "QQQ".into(),
            price: -1.0,
        };
        assert_eq!(err.symbol(), "QQQ");
    }
}
