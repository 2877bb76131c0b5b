//! rebalance-cli: command-line front end for the `rebalance` crate.
//!
//! Reads holdings and target weights from a JSON file, prices holdings that
//! carry no price through the configured price source, and prints the
//! buy/sell/hold plan.

pub mod config;
pub mod error;
pub mod portfolio_file;
pub mod report;
pub mod run;
pub mod source;
