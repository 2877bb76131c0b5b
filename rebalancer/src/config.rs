//! TOML configuration loading and validation.

use std::path::Path;
use std::time::Duration;

use rebalance::{DEFAULT_FALLBACK_PRICE, FallbackPolicy};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub prices: PricesConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where prices for holdings without an explicit price come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Live daily closes over HTTP.
    AlphaVantage,
    /// No live lookups; unpriced holdings go through the fallback policy.
    Fixed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricesConfig {
    #[serde(default = "default_source")]
    pub source: SourceKind,
    /// Explicit key; wins over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_source() -> SourceKind {
    SourceKind::AlphaVantage
}
fn default_api_key_env() -> String {
    "ALPHAVANTAGE_API_KEY".into()
}
fn default_base_url() -> String {
    "https://www.alphavantage.co".into()
}
fn default_timeout() -> u64 {
    10
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl PricesConfig {
    /// Resolve the API key: the explicit `api_key` first, then the variable
    /// named by `api_key_env` as seen through `lookup`.
    ///
    /// `lookup` is `|name| std::env::var(name).ok()` in the binary.
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| lookup(&self.api_key_env))
            .filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_fallback_price")]
    pub price: f64,
}

fn default_true() -> bool {
    true
}
fn default_fallback_price() -> f64 {
    DEFAULT_FALLBACK_PRICE
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            price: DEFAULT_FALLBACK_PRICE,
        }
    }
}

impl FallbackConfig {
    pub fn policy(&self) -> FallbackPolicy {
        if self.enabled {
            FallbackPolicy::Substitute(self.price)
        } else {
            FallbackPolicy::Fail
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub show_target_value: bool,
    /// Max weight drift, in percentage points, below which the portfolio is
    /// reported as on target. Zero disables the check.
    #[serde(default)]
    pub drift_threshold_pct: f64,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    pub fn validate(&self) -> Result<()> {
        if self.prices.timeout_secs == 0 {
            return Err(Error::Config("prices.timeout_secs must be > 0".into()));
        }
        if self.prices.api_key_env.trim().is_empty() {
            return Err(Error::Config("prices.api_key_env must not be empty".into()));
        }
        if !self.fallback.price.is_finite() || self.fallback.price <= 0.0 {
            return Err(Error::Config(format!(
                "fallback.price must be a positive number, got {}",
                self.fallback.price
            )));
        }
        let drift = self.report.drift_threshold_pct;
        if !(0.0..=100.0).contains(&drift) {
            return Err(Error::Config(
                "report.drift_threshold_pct must be in [0, 100]".into(),
            ));
        }
        Ok(())
    }
}
