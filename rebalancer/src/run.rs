//! Run orchestration: price → build portfolio → rebalance → report.

use log::info;
use rebalance::{FixedPrices, Portfolio, PriceSource, PriceWarning, RebalancePlan};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::portfolio_file::PortfolioFile;
use crate::report::{JsonReport, PlanReport, ValueReport};
use crate::source;

/// Options for a `plan` run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip live lookups; unpriced holdings use the fallback price.
    pub offline: bool,
    pub json: bool,
    pub show_target: bool,
}

/// A priced portfolio and the warnings raised while pricing it.
#[derive(Debug, Clone)]
pub struct Priced {
    pub portfolio: Portfolio,
    pub warnings: Vec<PriceWarning>,
}

/// Price the file's holdings through `source` and build the portfolio.
pub fn build_portfolio(
    config: &Config,
    file: &PortfolioFile,
    source: &dyn PriceSource,
) -> Result<Priced> {
    let priced = file.price_holdings(source, &config.fallback.policy())?;
    let portfolio = Portfolio::new(priced.holdings, file.target_allocation())?;
    info!(
        "Portfolio: {} holdings, {} targets, total value {:.2}",
        portfolio.len(),
        portfolio.allocation().len(),
        portfolio.total_value()
    );
    Ok(Priced {
        portfolio,
        warnings: priced.warnings,
    })
}

/// Build the portfolio and compute its rebalance plan.
pub fn compute_plan(
    config: &Config,
    file: &PortfolioFile,
    source: &dyn PriceSource,
) -> Result<(RebalancePlan, Vec<PriceWarning>)> {
    let priced = build_portfolio(config, file, source)?;
    let plan = priced.portfolio.rebalance()?;
    info!(
        "Plan: {} records, {} trades, {} cash targets",
        plan.len(),
        plan.trades().count(),
        plan.cash_targets().len()
    );
    Ok((plan, priced.warnings))
}

/// Source for the run. A file that prices every holding needs no lookups
/// and therefore no API key.
fn price_source(
    config: &Config,
    file: &PortfolioFile,
    offline: bool,
    api_key: Option<&str>,
) -> Result<Box<dyn PriceSource>> {
    if !file.needs_prices() {
        return Ok(Box::new(FixedPrices::new()));
    }
    source::build(&config.prices, api_key, offline)
}

/// Execute the `plan` command.
///
/// Fallback warnings reach stderr through the `warn!` logged by
/// `Holding::fetch`; `--json` also carries them in the report.
pub fn run(
    config: &Config,
    file: &PortfolioFile,
    opts: &RunOptions,
    api_key: Option<&str>,
) -> Result<()> {
    let source = price_source(config, file, opts.offline, api_key)?;
    let (plan, warnings) = compute_plan(config, file, source.as_ref())?;

    if opts.json {
        let json = JsonReport::new(&plan, file.as_of, &warnings)
            .to_json()
            .map_err(|e| Error::Render(e.to_string()))?;
        println!("{json}");
    } else {
        let report = PlanReport {
            plan: &plan,
            as_of: file.as_of,
            show_target: opts.show_target || config.report.show_target_value,
            drift_threshold: config.report.drift_threshold_pct / 100.0,
        };
        print!("{report}");
    }
    Ok(())
}

/// Execute the `value` command: print holdings, prices and weights.
pub fn show_value(
    config: &Config,
    file: &PortfolioFile,
    offline: bool,
    api_key: Option<&str>,
) -> Result<()> {
    let source = price_source(config, file, offline, api_key)?;
    let priced = build_portfolio(config, file, source.as_ref())?;
    print!(
        "{}",
        ValueReport {
            portfolio: &priced.portfolio
        }
    );
    Ok(())
}
