//! Price sources for the `rebalance` crate.
//!
//! Every source implements [`rebalance::PriceSource`], so a portfolio can be
//! priced from a live feed or from scripted test data with the same code:
//!
//! - **Mock** ([`mock::MockPriceSource`]): scripted prices and failures, records lookups
//! - **Alpha Vantage** (feature `alpha-vantage`): latest daily close over HTTPS

pub mod error;
pub mod mock;

#[cfg(feature = "alpha-vantage")]
pub mod alpha_vantage;

pub use error::FeedError;
pub use mock::MockPriceSource;
