//! # Till CLI
//!
//! Prices baskets of single-character articles against a package price list.
//!
//! ```sh
//! # Price two baskets with an explicit rules file
//! till --rules ./rules.toml total AAB CDBA
//!
//! # Validate the rules and exit
//! till --rules ./rules.toml check
//!
//! # List package prices per article
//! TILL_RULES=./rules.json till rules
//! ```
//!
//! Totals go to stdout as `<basket>\t<total>`; diagnostics and logs go to
//! stderr.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::TillConfig;
use crate::error::CliError;

/// Supermarket till with package pricing.
#[derive(Parser, Debug)]
#[command(name = "till", version, about = "Prices baskets against package pricing rules")]
struct Cli {
    /// Path to the rules file (TOML, or JSON if it ends in .json).
    #[arg(short, long, env = "TILL_RULES", global = true)]
    rules: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error, or a tracing directive).
    #[arg(short, long, env = "TILL_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price each basket with a fresh checkout.
    Total {
        /// Basket strings, one article per character (whitespace ignored).
        #[arg(required = true)]
        baskets: Vec<String>,
    },

    /// Validate the pricing rules.
    Check,

    /// List package prices per article.
    Rules,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = TillConfig::load(cli.rules)?;
    let rules = Arc::new(config.to_rule_set());
    info!(rules = rules.len(), "Configuration loaded");

    let code = match cli.command {
        Command::Total { baskets } => {
            let mut failed = false;
            for outcome in commands::price_baskets(&rules, &baskets) {
                match outcome.total {
                    Ok(total) => println!("{}\t{}", outcome.basket, config.format_money(total)),
                    Err(err) => {
                        failed = true;
                        debug!(basket = %outcome.basket, kind = %err.kind(), "Basket could not be priced");
                        eprintln!("{}\t{}", outcome.basket, CliError::from(err));
                    }
                }
            }
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }

        Command::Check => match commands::check_rules(&rules) {
            Ok(summary) => {
                println!("{}", summary);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Pricing rules are inconsistent: {}", CliError::from(err));
                ExitCode::FAILURE
            }
        },

        Command::Rules => {
            for line in commands::list_rules(&rules, |money| config.format_money(money)) {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
