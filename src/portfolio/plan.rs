//! Rebalance output: per-symbol adjustment records and plan-level summaries.

use rustc_hash::FxHashMap;

use crate::action::Action;

/// Adjustment needed for one held symbol.
///
/// Values are in the portfolio's (single, unnamed) currency.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustmentRecord {
    pub symbol: String,
    /// Price used for the share computation
    pub price: f64,
    /// Shares currently held
    pub shares: f64,
    /// Target fraction of total value (0 when not in the allocation)
    pub target_pct: f64,
    /// Current fraction of total value (0 when the portfolio is worth nothing)
    pub current_pct: f64,
    pub current_value: f64,
    pub target_value: f64,
    /// `target_value - current_value`
    pub diff_value: f64,
    /// `diff_value / price`; positive = buy, negative = sell
    pub diff_shares: f64,
    pub action: Action,
}

impl AdjustmentRecord {
    /// `current_pct - target_pct`: positive when overweight.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.current_pct - self.target_pct
    }
}

/// Target for an allocation symbol with no holding.
///
/// There is no price for such a symbol, so only the cash amount to invest
/// is reported.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashTarget {
    pub symbol: String,
    pub target_pct: f64,
    pub target_value: f64,
}

/// Result of [`Portfolio::rebalance`](crate::Portfolio::rebalance).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RebalancePlan {
    total_value: f64,
    records: Vec<AdjustmentRecord>,
    cash_targets: Vec<CashTarget>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: FxHashMap<String, usize>,
}

impl RebalancePlan {
    pub(crate) fn new(
        total_value: f64,
        records: Vec<AdjustmentRecord>,
        cash_targets: Vec<CashTarget>,
    ) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.symbol.clone(), i))
            .collect();
        Self {
            total_value,
            records,
            cash_targets,
            index,
        }
    }

    /// Portfolio value the targets were computed from.
    #[inline]
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Records in holding insertion order.
    pub fn records(&self) -> &[AdjustmentRecord] {
        &self.records
    }

    pub fn get(&self, symbol: &str) -> Option<&AdjustmentRecord> {
        self.index.get(symbol).map(|&i| &self.records[i])
    }

    /// Allocation symbols that have no holding.
    pub fn cash_targets(&self) -> &[CashTarget] {
        &self.cash_targets
    }

    /// Records that require a trade (Buy or Sell).
    pub fn trades(&self) -> impl Iterator<Item = &AdjustmentRecord> {
        self.records.iter().filter(|r| r.action.is_trade())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest absolute weight drift across held symbols and cash targets.
    pub fn max_drift(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.drift().abs())
            .chain(self.cash_targets.iter().map(|c| c.target_pct.abs()))
            .fold(0.0, f64::max)
    }

    /// Root-mean-square weight drift, in percent.
    pub fn tracking_error_pct(&self) -> f64 {
        let n = self.records.len() + self.cash_targets.len();
        if n == 0 {
            return 0.0;
        }
        let sum_sq: f64 = self
            .records
            .iter()
            .map(|r| r.drift() * r.drift())
            .chain(self.cash_targets.iter().map(|c| c.target_pct * c.target_pct))
            .sum();
        (sum_sq / n as f64).sqrt() * 100.0
    }

    /// True when no weight drifts from its target by more than `threshold`
    /// (a fraction, e.g. `0.05` for five percentage points).
    pub fn is_within(&self, threshold: f64) -> bool {
        self.max_drift() <= threshold
    }
}
