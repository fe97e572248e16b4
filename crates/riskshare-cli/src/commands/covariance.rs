//! Covariance command implementation.
//!
//! Estimates the covariance or correlation matrix of every symbol in a
//! price file over a lookback window.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use riskshare_portfolio::{estimate_covariance, EngineConfig};

use crate::cli::OutputOptions;
use crate::commands::{horizon_or_default, load_price_data};
use crate::output::{print_info, print_matrix};

/// Arguments for the covariance command.
#[derive(Args, Debug)]
pub struct CovarianceArgs {
    /// Price file with date,symbol,close columns
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Lookback horizon (short/1y, medium/3y, long/5y)
    #[arg(long)]
    pub horizon: Option<String>,

    /// Print the correlation matrix instead
    #[arg(long)]
    pub correlation: bool,

    /// Restrict all symbols to their common trading dates first
    #[arg(long)]
    pub align: bool,
}

/// Execute the covariance command.
pub fn execute(args: CovarianceArgs, config: &EngineConfig, output: OutputOptions) -> Result<()> {
    let histories = load_price_data(&args.prices, args.align)?;
    let horizon = horizon_or_default(args.horizon.as_deref(), config);

    let estimate = estimate_covariance(&histories, &horizon, config)?;

    if !output.quiet {
        print_info(&format!(
            "{} horizon: {} of {} requested observations{}",
            estimate.horizon,
            estimate.observations,
            estimate.requested_observations,
            match (estimate.start_date, estimate.end_date) {
                (Some(start), Some(end)) => format!(" ({start} to {end})"),
                _ => String::new(),
            }
        ));
    }

    let symbols: Vec<String> = estimate
        .index
        .symbols()
        .iter()
        .map(ToString::to_string)
        .collect();

    if args.correlation {
        let corr = estimate.covariance.correlation();
        let rows: Vec<Vec<f64>> = corr
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        print_matrix(&symbols, &rows, 4, output.format)
    } else {
        print_matrix(&symbols, &estimate.covariance.to_rows(), 8, output.format)
    }
}
