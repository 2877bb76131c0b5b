//! Integration tests: config + portfolio files on disk through to a plan.

use std::io::Write;

use rebalance::{Action, PriceError, PriceSource};
use rebalance_cli::config::Config;
use rebalance_cli::error::Error;
use rebalance_cli::portfolio_file::PortfolioFile;
use rebalance_cli::report::{JsonReport, PlanReport};
use rebalance_cli::run::{build_portfolio, compute_plan};
use rebalance_prices::MockPriceSource;

fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

fn portfolio_json() -> &'static str {
    r#"{
        "as_of": "2026-02-08T15:30:00Z",
        "holdings": [
            { "symbol": "META", "shares": 30 },
            { "symbol": "AAPL", "shares": 10 },
            { "symbol": "TSLA", "shares": 5, "price": 250.0 }
        ],
        "allocation": [
            { "symbol": "META", "weight": 0.4 },
            { "symbol": "AAPL", "weight": 0.4 },
            { "symbol": "QQQ",  "weight": 0.2 }
        ]
    }"#
}

// ============================================================================
// Loading from disk
// ============================================================================

#[test]
fn load_files_from_disk() {
    let config_file = write_temp(
        "[fallback]\nprice = 50.0\n\n[report]\nshow_target_value = true\n",
        ".toml",
    );
    let portfolio_file = write_temp(portfolio_json(), ".json");

    let config = Config::load(config_file.path()).unwrap();
    let file = PortfolioFile::load(portfolio_file.path()).unwrap();

    assert!(config.report.show_target_value);
    assert_eq!(file.holdings.len(), 3);
    assert_eq!(file.unpriced_symbols(), vec!["META", "AAPL"]);
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::ConfigRead { .. }));
}

#[test]
fn missing_portfolio_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PortfolioFile::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::PortfolioRead { .. }));
}

#[test]
fn malformed_config_file() {
    let config_file = write_temp("[fallback\nprice = ", ".toml");
    assert!(matches!(
        Config::load(config_file.path()),
        Err(Error::ConfigParse(_))
    ));
}

#[test]
fn malformed_portfolio_file() {
    let portfolio_file = write_temp("{ \"holdings\": ", ".json");
    assert!(matches!(
        PortfolioFile::load(portfolio_file.path()),
        Err(Error::PortfolioParse(_))
    ));
}

// ============================================================================
// Pricing through a source
// ============================================================================

#[test]
fn only_unpriced_holdings_are_looked_up() {
    let file = PortfolioFile::from_json(portfolio_json()).unwrap();
    let source = MockPriceSource::builder()
        .with_price("META", 400.0)
        .with_price("AAPL", 200.0)
        .with_price("TSLA", 1.0)
        .build();

    let priced = build_portfolio(&Config::default(), &file, &source).unwrap();

    assert_eq!(source.lookups(), vec!["META", "AAPL"]);
    assert!(priced.warnings.is_empty());
    assert_eq!(priced.portfolio.holding("TSLA").unwrap().price(), 250.0);
    assert_eq!(priced.portfolio.total_value(), 12000.0 + 2000.0 + 1250.0);
}

#[test]
fn failed_lookup_uses_configured_fallback() {
    let config = Config::from_toml("[fallback]\nprice = 50.0\n").unwrap();
    let file = PortfolioFile::from_json(portfolio_json()).unwrap();
    let source = MockPriceSource::builder()
        .with_price("META", 400.0)
        .with_failure("AAPL", "HTTP 503")
        .build();

    let (plan, warnings) = compute_plan(&config, &file, &source).unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].symbol, "AAPL");
    assert_eq!(warnings[0].fallback_price, 50.0);
    assert!(warnings[0].reason.contains("HTTP 503"));
    assert_eq!(plan.get("AAPL").unwrap().price, 50.0);
}

#[test]
fn closure_source() {
    let file = PortfolioFile::from_json(portfolio_json()).unwrap();
    let source = |_: &str| -> Result<f64, PriceError> { Ok(100.0) };
    let source: &dyn PriceSource = &source;
    let (plan, warnings) = compute_plan(&Config::default(), &file, source).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(plan.total_value(), 3000.0 + 1000.0 + 1250.0);
}

// ============================================================================
// Plan contents
// ============================================================================

#[test]
fn full_plan() {
    let file = PortfolioFile::from_json(portfolio_json()).unwrap();
    let source = MockPriceSource::builder()
        .with_price("META", 400.0)
        .with_price("AAPL", 200.0)
        .build();

    let (plan, _) = compute_plan(&Config::default(), &file, &source).unwrap();
    let total = plan.total_value();
    assert_eq!(total, 15250.0);

    // TSLA is held but not targeted: sold in full.
    let tsla = plan.get("TSLA").unwrap();
    assert_eq!(tsla.action, Action::Sell);
    assert!((tsla.diff_shares + 5.0).abs() < 1e-9);

    // AAPL is underweight.
    assert_eq!(plan.get("AAPL").unwrap().action, Action::Buy);

    // QQQ is targeted but not held.
    assert!(plan.get("QQQ").is_none());
    assert_eq!(plan.cash_targets().len(), 1);
    assert_eq!(plan.cash_targets()[0].symbol, "QQQ");
    assert!((plan.cash_targets()[0].target_value - 0.2 * total).abs() < 1e-6);

    // Value freed by sells funds buys plus the cash target.
    let net: f64 = plan.records().iter().map(|r| r.diff_value).sum();
    assert!((net + plan.cash_targets()[0].target_value).abs() < 1e-6);
}

#[test]
fn text_and_json_reports() {
    let file = PortfolioFile::from_json(portfolio_json()).unwrap();
    let source = MockPriceSource::builder()
        .with_price("META", 400.0)
        .with_failure("AAPL", "rate limited")
        .build();
    let (plan, warnings) = compute_plan(&Config::default(), &file, &source).unwrap();

    let text = PlanReport {
        plan: &plan,
        as_of: file.as_of,
        show_target: true,
        drift_threshold: 0.0,
    }
    .to_string();
    assert!(text.contains("as of 2026-02-08 15:30 UTC"));
    assert!(text.contains("TSLA: SELL 5.00 shares ($1250.00) -> target $0.00"));
    assert!(text.contains("QQQ: BUY"));

    let json = JsonReport::new(&plan, file.as_of, &warnings).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["as_of"], "2026-02-08T15:30:00Z");
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
    assert_eq!(value["cash_targets"][0]["symbol"], "QQQ");
    assert_eq!(value["warnings"][0]["symbol"], "AAPL");
}
