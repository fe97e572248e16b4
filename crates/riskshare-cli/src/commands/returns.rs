//! Returns command implementation.
//!
//! Prints the period returns of one symbol.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use riskshare_math::ReturnKind;
use riskshare_portfolio::EngineConfig;

use crate::cli::OutputOptions;
use crate::error::CliError;
use crate::input::load_prices;
use crate::output::{format_f64, print_info, print_output};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    /// Price file with date,symbol,close columns
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Symbol to compute returns for
    #[arg(short, long)]
    pub symbol: String,

    /// Use log returns instead of the configured return kind
    #[arg(long)]
    pub log: bool,

    /// Restrict to the lookback window of this horizon (e.g. 1y, 3y, 5y)
    #[arg(long)]
    pub horizon: Option<String>,
}

/// One period return.
#[derive(Debug, Serialize, Tabled)]
struct ReturnRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Close")]
    close: f64,
    #[tabled(rename = "Return", display_with = "display_return")]
    #[serde(rename = "return")]
    value: f64,
}

fn display_return(value: &f64) -> String {
    format_f64(*value, 7)
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, config: &EngineConfig, output: OutputOptions) -> Result<()> {
    let histories = load_prices(&args.prices)?;
    let (_, history) = histories
        .into_iter()
        .find(|(symbol, _)| symbol.as_str() == args.symbol)
        .ok_or_else(|| CliError::UnknownSymbol(args.symbol.clone()))?;

    let kind = if args.log { ReturnKind::Log } else { config.return_kind };

    let all = history.prices().as_slice();
    let prices = match &args.horizon {
        Some(label) => config.lookback.trim(all, config.lookback.window_for(label))?,
        None => all,
    };
    let dates = history.tail_dates(prices.len());

    let returns = kind.compute(prices)?;

    if !output.quiet {
        print_info(&format!(
            "{}: {} {} returns from {} prices",
            args.symbol,
            returns.len(),
            match kind {
                ReturnKind::Simple => "simple",
                ReturnKind::Log => "log",
            },
            prices.len()
        ));
    }

    let rows: Vec<ReturnRow> = returns
        .iter()
        .enumerate()
        .map(|(i, r)| ReturnRow {
            date: dates[i + 1].to_string(),
            close: prices[i + 1],
            value: *r,
        })
        .collect();

    print_output(&rows, output.format)
}
