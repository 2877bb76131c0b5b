//! CLI entry point for the portfolio rebalancer.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::debug;

use rebalance_cli::config::Config;
use rebalance_cli::error::{self, Error};
use rebalance_cli::portfolio_file::PortfolioFile;
use rebalance_cli::run::{self, RunOptions};

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser)]
#[command(name = "rebalancer")]
#[command(about = "Portfolio rebalancer: holdings + target weights → buy/sell plan")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults apply if omitted and ./config.toml is absent)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the buy/sell/hold plan for a portfolio file
    Plan {
        /// Path to portfolio.json
        portfolio: PathBuf,

        /// Skip live price lookups (unpriced holdings use the fallback price)
        #[arg(long)]
        offline: bool,

        /// Show each symbol's target value
        #[arg(long)]
        show_target: bool,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show holdings, prices and current weights
    Value {
        /// Path to portfolio.json
        portfolio: PathBuf,

        /// Skip live price lookups
        #[arg(long)]
        offline: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    match path {
        Some(p) => Config::load(p),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(Path::new(DEFAULT_CONFIG)),
        None => {
            debug!("No {DEFAULT_CONFIG}; using defaults");
            Ok(Config::default())
        }
    }
}

fn load_portfolio(path: &Path) -> PortfolioFile {
    match PortfolioFile::load(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading portfolio: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let api_key = config
        .prices
        .resolve_api_key(|name| std::env::var(name).ok());

    let result = match cli.command {
        Command::Plan {
            portfolio,
            offline,
            show_target,
            json,
        } => {
            let file = load_portfolio(&portfolio);
            let opts = RunOptions {
                offline,
                json,
                show_target,
            };
            run::run(&config, &file, &opts, api_key.as_deref())
        }
        Command::Value { portfolio, offline } => {
            let file = load_portfolio(&portfolio);
            run::show_value(&config, &file, offline, api_key.as_deref())
        }
    };

    if let Err(e) = result {
        let code = error::exit_code(&e);
        if code == 2 {
            eprintln!("\nAborted: {e}");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(code);
    }
}
