//! Plan and portfolio rendering: console text and JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use rebalance::{Action, Portfolio, PriceWarning, RebalancePlan};
use serde::Serialize;

/// Text rendering of a [`RebalancePlan`].
pub struct PlanReport<'a> {
    pub plan: &'a RebalancePlan,
    pub as_of: Option<DateTime<Utc>>,
    pub show_target: bool,
    /// Drift threshold as a fraction; zero disables the on-target line.
    pub drift_threshold: f64,
}

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;
        write!(f, "REBALANCE PLAN (total ${:.2}", plan.total_value())?;
        if let Some(ts) = self.as_of {
            write!(f, ", as of {}", ts.format("%Y-%m-%d %H:%M UTC"))?;
        }
        writeln!(f, "):")?;

        for r in plan.records() {
            write!(
                f,
                "  {}: {} {:.2} shares (${:.2})",
                r.symbol,
                r.action,
                r.diff_shares.abs(),
                r.diff_value.abs()
            )?;
            if self.show_target {
                write!(f, " -> target ${:.2}", r.target_value)?;
            }
            writeln!(f)?;
        }

        if !plan.cash_targets().is_empty() {
            writeln!(f, "\nNOT HELD (cash amount, price unknown):")?;
            for c in plan.cash_targets() {
                // Current value is zero, so the diff is the target value.
                writeln!(
                    f,
                    "  {}: {} ${:.2} ({:.1}%)",
                    c.symbol,
                    Action::from_diff(c.target_value),
                    c.target_value.abs(),
                    c.target_pct * 100.0
                )?;
            }
        }

        writeln!(f, "\nTracking error: {:.2}%", plan.tracking_error_pct())?;
        if self.drift_threshold > 0.0 && plan.is_within(self.drift_threshold) {
            writeln!(
                f,
                "Within {:.2}% drift threshold; no rebalancing needed.",
                self.drift_threshold * 100.0
            )?;
        }
        Ok(())
    }
}

/// Text rendering of the current portfolio (the `value` command).
pub struct ValueReport<'a> {
    pub portfolio: &'a Portfolio,
}

impl fmt::Display for ValueReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let portfolio = self.portfolio;
        let total = portfolio.total_value();
        writeln!(f, "CURRENT PORTFOLIO:")?;
        for h in portfolio.holdings() {
            let weight = if total > 0.0 { h.value() / total } else { 0.0 };
            writeln!(
                f,
                "  {:<8} {:>12.4} @ ${:>10.2} = ${:>12.2}  ({:>5.1}%)",
                h.symbol(),
                h.shares(),
                h.price(),
                h.value(),
                weight * 100.0
            )?;
        }
        writeln!(f, "  Total value: ${:.2}", portfolio.total_value())
    }
}

/// Machine-readable plan for `--json`.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub as_of: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub plan: &'a RebalancePlan,
    pub tracking_error_pct: f64,
    pub warnings: &'a [PriceWarning],
}

impl<'a> JsonReport<'a> {
    pub fn new(
        plan: &'a RebalancePlan,
        as_of: Option<DateTime<Utc>>,
        warnings: &'a [PriceWarning],
    ) -> Self {
        Self {
            as_of,
            plan,
            tracking_error_pct: plan.tracking_error_pct(),
            warnings,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
