//! Error types for the rebalancer CLI.

use std::path::PathBuf;

use rebalance::{PriceError, RebalanceError};

/// All errors that can occur during a rebalancer run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("portfolio file error: {0}")]
    Portfolio(String),

    #[error("failed to read portfolio file {path}: {source}")]
    PortfolioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse portfolio JSON: {0}")]
    PortfolioParse(#[from] serde_json::Error),

    #[error("price source error: {0}")]
    PriceSource(String),

    #[error("failed to render report: {0}")]
    Render(String),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Rebalance(#[from] RebalanceError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit code for a failed run: 2 when the portfolio itself is
/// unusable (weights off 1, non-positive price), 1 otherwise.
pub fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Rebalance(
            RebalanceError::InvalidAllocation { .. } | RebalanceError::InvalidPrice { .. },
        ) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebalance_errors_exit_2() {
        let alloc = Error::from(RebalanceError::InvalidAllocation { sum: 0.9 });
        let price = Error::from(RebalanceError::InvalidPrice {
            symbol: "SPY".into(),
            price: 0.0,
        });
        assert_eq!(exit_code(&alloc), 2);
        assert_eq!(exit_code(&price), 2);
    }

    #[test]
    fn other_errors_exit_1() {
        let io = || std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let errors = [
            Error::Config("bad".into()),
            Error::ConfigRead {
                path: "config.toml".into(),
                source: io(),
            },
            Error::from(toml::from_str::<toml::Value>("a = ").unwrap_err()),
            Error::Portfolio("empty".into()),
            Error::PortfolioRead {
                path: "portfolio.json".into(),
                source: io(),
            },
            Error::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
            Error::PriceSource("no API key".into()),
            Error::Render("oops".into()),
            Error::from(PriceError::unavailable("AAPL", "HTTP 503")),
            Error::from(PriceError::NotPositive {
                symbol: "AAPL".into(),
                price: -1.0,
            }),
        ];
        for err in &errors {
            assert_eq!(exit_code(err), 1, "{err}");
        }
    }
}
