//! Recommended action for a holding: Buy, Sell or Hold

use std::fmt;

/// What to do with a holding to reach its target value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Classify a value difference (`target - current`).
    ///
    /// Exact comparison against zero: only a difference of exactly `0.0` holds.
    /// A NaN difference compares false both ways and also maps to `Hold`.
    #[inline]
    pub fn from_diff(diff_value: f64) -> Self {
        if diff_value > 0.0 {
            Action::Buy
        } else if diff_value < 0.0 {
            Action::Sell
        } else {
            Action::Hold
        }
    }

    /// Returns true for Buy and Sell.
    #[inline]
    pub fn is_trade(self) -> bool {
        self != Action::Hold
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
            Action::Hold => write!(f, "HOLD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_diff_sign() {
        assert_eq!(Action::from_diff(6400.0), Action::Buy);
        assert_eq!(Action::from_diff(-6400.0), Action::Sell);
        assert_eq!(Action::from_diff(0.0), Action::Hold);
        assert_eq!(Action::from_diff(-0.0), Action::Hold);
    }

    #[test]
    fn tiny_diffs_are_trades() {
        assert_eq!(Action::from_diff(f64::MIN_POSITIVE), Action::Buy);
        assert_eq!(Action::from_diff(-1e-300), Action::Sell);
    }

    #[test]
    fn is_trade() {
        assert!(Action::Buy.is_trade());
        assert!(Action::Sell.is_trade());
        assert!(!Action::Hold.is_trade());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Action::Buy), "BUY");
        assert_eq!(format!("{}", Action::Sell), "SELL");
        assert_eq!(format!("{}", Action::Hold), "HOLD");
    }
}
