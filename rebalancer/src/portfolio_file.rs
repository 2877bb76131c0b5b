//! Portfolio file (portfolio.json) loading and validation.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use rebalance::{FallbackPolicy, Holding, PriceSource, PriceWarning, TargetAllocation};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Current holdings plus the target allocation.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioFile {
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    pub holdings: Vec<HoldingEntry>,
    pub allocation: Vec<AllocationEntry>,
}

/// A held position. `price` is optional; missing prices come from the
/// configured price source.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingEntry {
    pub symbol: String,
    pub shares: f64,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A target weight, as a fraction of total value.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationEntry {
    pub symbol: String,
    pub weight: f64,
}

/// Holdings with their prices resolved, plus any fallback warnings.
#[derive(Debug, Clone)]
pub struct PricedHoldings {
    pub holdings: Vec<Holding>,
    pub warnings: Vec<PriceWarning>,
}

impl PortfolioFile {
    /// Load and validate a portfolio file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::PortfolioRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PortfolioFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Validate structure. Whether the weights sum to 1 is checked by
    /// `Portfolio::new`.
    fn validate(&self) -> Result<()> {
        if self.holdings.is_empty() {
            return Err(Error::Portfolio("holdings list is empty".into()));
        }

        for h in &self.holdings {
            if h.symbol.trim().is_empty() {
                return Err(Error::Portfolio("empty holding symbol".into()));
            }
            if !h.shares.is_finite() || h.shares < 0.0 {
                return Err(Error::Portfolio(format!(
                    "shares for {} ({}) must be finite and >= 0",
                    h.symbol, h.shares
                )));
            }
        }

        let mut seen = FxHashSet::default();
        for a in &self.allocation {
            if a.symbol.trim().is_empty() {
                return Err(Error::Portfolio("empty allocation symbol".into()));
            }
            if !seen.insert(a.symbol.as_str()) {
                return Err(Error::Portfolio(format!(
                    "duplicate allocation symbol: {}",
                    a.symbol
                )));
            }
            if !a.weight.is_finite() {
                return Err(Error::Portfolio(format!(
                    "weight for {} is not a number",
                    a.symbol
                )));
            }
        }

        Ok(())
    }

    /// True if any holding has no explicit price.
    pub fn needs_prices(&self) -> bool {
        self.holdings.iter().any(|h| h.price.is_none())
    }

    /// Symbols that need a price lookup, in file order.
    pub fn unpriced_symbols(&self) -> Vec<&str> {
        self.holdings
            .iter()
            .filter(|h| h.price.is_none())
            .map(|h| h.symbol.as_str())
            .collect()
    }

    /// Target allocation in file order.
    pub fn target_allocation(&self) -> TargetAllocation {
        self.allocation
            .iter()
            .map(|a| (a.symbol.as_str(), a.weight))
            .collect()
    }

    /// Build holdings, looking up prices the file does not carry.
    pub fn price_holdings(
        &self,
        source: &dyn PriceSource,
        policy: &FallbackPolicy,
    ) -> Result<PricedHoldings> {
        let mut holdings = Vec::with_capacity(self.holdings.len());
        let mut warnings = Vec::new();

        for entry in &self.holdings {
            match entry.price {
                Some(price) => holdings.push(Holding::new(&entry.symbol, entry.shares, price)),
                None => {
                    let fetched = Holding::fetch(&entry.symbol, entry.shares, source, policy)?;
                    warnings.extend(fetched.warning);
                    holdings.push(fetched.holding);
                }
            }
        }

        info!(
            "Priced {} holdings ({} looked up, {} fallbacks)",
            holdings.len(),
            self.unpriced_symbols().len(),
            warnings.len()
        );
        Ok(PricedHoldings { holdings, warnings })
    }
}
