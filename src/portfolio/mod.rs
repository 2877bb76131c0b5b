//! Portfolio: holdings plus a target allocation, and the rebalance computation.
//!
//! # Example
//!
//! ```
//! use rebalance::{Action, Holding, Portfolio, TargetAllocation};
//!
//! let holdings = vec![
//!     Holding::new("META", 30.0, 400.0),
//!     Holding::new("AAPL", 10.0, 200.0),
//! ];
//! let target = TargetAllocation::new().with("META", 0.4).with("AAPL", 0.6);
//!
//! let portfolio = Portfolio::new(holdings, target).unwrap();
//! assert_eq!(portfolio.total_value(), 14_000.0);
//!
//! let plan = portfolio.rebalance().unwrap();
//! assert_eq!(plan.get("META").unwrap().action, Action::Sell);
//! assert_eq!(plan.get("AAPL").unwrap().action, Action::Buy);
//! ```

pub mod plan;

pub use plan::{AdjustmentRecord, CashTarget, RebalancePlan};

use log::debug;
use rustc_hash::FxHashMap;

use crate::action::Action;
use crate::allocation::TargetAllocation;
use crate::error::RebalanceError;
use crate::holding::Holding;

/// A set of holdings and the allocation they should be rebalanced to.
#[derive(Clone, Debug)]
pub struct Portfolio {
    /// Holdings in first-insertion order
    holdings: Vec<Holding>,
    /// Symbol → index into `holdings`
    index: FxHashMap<String, usize>,
    allocation: TargetAllocation,
}

impl Portfolio {
    /// Build a portfolio, validating that the allocation sums to 1.
    ///
    /// Duplicate symbols in `holdings`: the last one wins, at the position of
    /// the first occurrence.
    pub fn new(
        holdings: impl IntoIterator<Item = Holding>,
        allocation: TargetAllocation,
    ) -> Result<Self, RebalanceError> {
        allocation.validate()?;

        let mut ordered: Vec<Holding> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for holding in holdings {
            match index.get(holding.symbol()) {
                Some(&i) => ordered[i] = holding,
                None => {
                    index.insert(holding.symbol().to_string(), ordered.len());
                    ordered.push(holding);
                }
            }
        }

        Ok(Self {
            holdings: ordered,
            index,
            allocation,
        })
    }

    // === Queries ===

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.index.get(symbol).map(|&i| &self.holdings[i])
    }

    /// Holdings in insertion order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn allocation(&self) -> &TargetAllocation {
        &self.allocation
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of all holding values. Zero for an empty portfolio.
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(Holding::value).sum()
    }

    /// Current (symbol, fraction of total value) pairs.
    ///
    /// Empty when the total value is zero.
    pub fn current_weights(&self) -> Vec<(&str, f64)> {
        let total = self.total_value();
        if total == 0.0 {
            return Vec::new();
        }
        self.holdings
            .iter()
            .map(|h| (h.symbol(), h.value() / total))
            .collect()
    }

    // === Rebalance ===

    /// Compute per-symbol adjustments towards the target allocation.
    ///
    /// One [`AdjustmentRecord`] per held symbol, in holding order; held symbols
    /// missing from the allocation target 0 and are sold in full. Allocation
    /// symbols with no holding carry no price, so they are reported as
    /// [`CashTarget`]s without a share count.
    ///
    /// Fails with [`RebalanceError::InvalidPrice`] if any holding has a
    /// non-positive (or non-finite) price.
    pub fn rebalance(&self) -> Result<RebalancePlan, RebalanceError> {
        let total_value = self.total_value();
        let mut records = Vec::with_capacity(self.holdings.len());

        for holding in &self.holdings {
            let price = holding.price();
            if !price.is_finite() || price <= 0.0 {
                return Err(RebalanceError::InvalidPrice {
                    symbol: holding.symbol().to_string(),
                    price,
                });
            }

            let target_pct = self.allocation.weight(holding.symbol());
            let current_value = holding.value();
            let target_value = total_value * target_pct;
            let diff_value = target_value - current_value;
            let current_pct = if total_value != 0.0 {
                current_value / total_value
            } else {
                0.0
            };

            records.push(AdjustmentRecord {
                symbol: holding.symbol().to_string(),
                price,
                shares: holding.shares(),
                target_pct,
                current_pct,
                current_value,
                target_value,
                diff_value,
                diff_shares: diff_value / price,
                action: Action::from_diff(diff_value),
            });
        }

        let cash_targets: Vec<CashTarget> = self
            .allocation
            .iter()
            .filter(|(symbol, _)| !self.index.contains_key(*symbol))
            .map(|(symbol, target_pct)| CashTarget {
                symbol: symbol.to_string(),
                target_pct,
                target_value: total_value * target_pct,
            })
            .collect();

        debug!(
            "rebalance: total={total_value:.2}, {} records, {} cash targets",
            records.len(),
            cash_targets.len()
        );

        Ok(RebalancePlan::new(total_value, records, cash_targets))
    }
}
