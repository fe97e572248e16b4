//! riskshare CLI - Portfolio risk attribution from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Returns of one symbol
//! riskshare returns --prices prices.csv --symbol AAPL
//!
//! # Covariance matrix over three years
//! riskshare covariance --prices prices.csv --horizon 3y
//!
//! # Risk attribution from a weight file
//! riskshare attribute --prices prices.csv --weights weights.csv --horizon 1y
//!
//! # Risk attribution from inline weights
//! riskshare attribute --prices prices.csv --weight AAPL=60 --weight TLT=40
//!
//! # Write a default configuration file
//! riskshare config init --path riskshare.toml
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use riskshare_portfolio::EngineConfig;

mod cli;
mod commands;
mod error;
mod input;
mod output;

use cli::{Cli, Commands, OutputOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let output = OutputOptions {
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Returns(args) => commands::returns::execute(args, &config, output),
        Commands::Covariance(args) => commands::covariance::execute(args, &config, output),
        Commands::Attribute(args) => commands::attribute::execute(args, &config, output),
        Commands::Config(args) => commands::config::execute(args, &config, output),
    }
}

/// Logs go to stderr so table, JSON and CSV output stay clean on stdout.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "riskshare=debug"
    } else if quiet {
        "riskshare=error"
    } else {
        "riskshare=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
