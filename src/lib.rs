//! # rebalance
//!
//! Target-allocation portfolio rebalancing: given current holdings and target
//! fractions per symbol, compute how much of each holding to buy or sell.
//!
//! ## Quick Start
//!
//! ```
//! use rebalance::{Action, Holding, Portfolio, TargetAllocation};
//!
//! let holdings = vec![
//!     Holding::new("META", 30.0, 400.0), // $12,000
//!     Holding::new("AAPL", 10.0, 200.0), // $2,000
//! ];
//! let target = TargetAllocation::new().with("META", 0.4).with("AAPL", 0.6);
//!
//! let plan = Portfolio::new(holdings, target)?.rebalance()?;
//!
//! let meta = plan.get("META").unwrap();
//! assert_eq!(meta.action, Action::Sell);
//! assert_eq!(meta.diff_value, -6_400.0);
//! assert_eq!(meta.diff_shares, -16.0);
//! # Ok::<(), rebalance::RebalanceError>(())
//! ```
//!
//! ## Prices
//!
//! Holdings can be priced from any [`PriceSource`]: a [`FixedPrices`] table, a
//! closure, or a live client from `rebalance-prices`. A failed lookup does not
//! abort construction; the [`FallbackPolicy`] substitutes a price (100 by
//! default) and the caller gets a [`PriceWarning`]:
//!
//! ```
//! use rebalance::{FallbackPolicy, FixedPrices, Holding};
//!
//! let prices = FixedPrices::new().with("AAPL", 200.0);
//! let fetched = Holding::fetch("META", 30.0, &prices, &FallbackPolicy::default()).unwrap();
//!
//! assert_eq!(fetched.holding.price(), 100.0);
//! assert!(fetched.warning.is_some());
//! ```
//!
//! ## Errors
//!
//! | Error | When |
//! |-------|------|
//! | [`RebalanceError::InvalidAllocation`] | [`Portfolio::new`]: fractions don't sum to 1 (±1e-9) |
//! | [`RebalanceError::InvalidPrice`] | [`Portfolio::rebalance`]: a holding's price is ≤ 0 |
//! | [`PriceError`] | a price lookup failed; only surfaces with [`FallbackPolicy::Fail`] |

mod action;
mod allocation;
mod error;
mod holding;
pub mod portfolio;
pub mod price;

// Re-export public API
pub use action::Action;
pub use allocation::{ALLOCATION_TOLERANCE, TargetAllocation};
pub use error::{PriceError, RebalanceError};
pub use holding::{FetchedHolding, Holding};
pub use portfolio::{AdjustmentRecord, CashTarget, Portfolio, RebalancePlan};
pub use price::{DEFAULT_FALLBACK_PRICE, FallbackPolicy, FixedPrices, PriceSource, PriceWarning};
