//! Attribute command implementation.
//!
//! Decomposes portfolio volatility into per-holding contributions.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use riskshare_portfolio::{attribute_risk, AttributionReport, EngineConfig, RiskAttributionRequest};

use crate::cli::{OutputFormat, OutputOptions};
use crate::commands::{horizon_or_default, load_price_data};
use crate::input::{load_weights, parse_weight_spec};
use crate::output::{
    format_f64, format_pct, print_header, print_json, print_output, print_warning, KeyValue,
};

/// Arguments for the attribute command.
#[derive(Args, Debug)]
pub struct AttributeArgs {
    /// Price file with date,symbol,close columns
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Weight file with symbol,weight columns
    #[arg(short, long, conflicts_with = "weight", required_unless_present = "weight")]
    pub weights: Option<PathBuf>,

    /// Inline weight as SYMBOL=WEIGHT (repeatable)
    #[arg(long = "weight", value_name = "SYMBOL=WEIGHT")]
    pub weight: Vec<String>,

    /// Lookback horizon (short/1y, medium/3y, long/5y)
    #[arg(long)]
    pub horizon: Option<String>,

    /// Restrict all symbols to their common trading dates first
    #[arg(long)]
    pub align: bool,

    /// Sort holdings by absolute contribution instead of file order
    #[arg(long)]
    pub ranked: bool,
}

/// One holding's contribution, formatted for display.
#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Weight", display_with = "display_pct")]
    weight_pct: f64,
    #[tabled(rename = "Volatility", display_with = "display_vol")]
    volatility: f64,
    #[tabled(rename = "Marginal", display_with = "display_vol")]
    marginal: f64,
    #[tabled(rename = "Contribution", display_with = "display_vol")]
    contribution: f64,
    #[tabled(rename = "Risk Share", display_with = "display_pct")]
    contribution_pct: f64,
}

fn display_pct(value: &f64) -> String {
    format_pct(*value)
}

fn display_vol(value: &f64) -> String {
    format_f64(*value, 6)
}

fn rows(report: &AttributionReport, ranked: bool) -> Vec<ContributionRow> {
    let assets = if ranked {
        report.ranked()
    } else {
        report.assets.iter().collect()
    };

    assets
        .into_iter()
        .map(|a| ContributionRow {
            symbol: a.symbol.to_string(),
            weight_pct: 100.0 * a.weight,
            volatility: a.volatility,
            marginal: a.marginal,
            contribution: a.contribution,
            contribution_pct: a.contribution_pct,
        })
        .collect()
}

fn summary(report: &AttributionReport) -> Vec<KeyValue> {
    let mut summary = vec![
        KeyValue::new("Horizon", report.horizon.to_string()),
        KeyValue::new(
            "Observations",
            format!("{} of {}", report.observations, report.requested_observations),
        ),
    ];
    if let (Some(start), Some(end)) = (report.start_date, report.end_date) {
        summary.push(KeyValue::new("Window", format!("{start} to {end}")));
    }
    summary.push(KeyValue::from_f64("Portfolio Volatility", report.portfolio_volatility, 6));
    summary.push(KeyValue::new(
        "Diversification Ratio",
        report
            .diversification_ratio
            .map_or_else(|| "n/a".to_string(), |r| format_f64(r, 4)),
    ));
    summary
}

/// Execute the attribute command.
pub fn execute(args: AttributeArgs, config: &EngineConfig, output: OutputOptions) -> Result<()> {
    let histories = load_price_data(&args.prices, args.align)?;

    let weights = match &args.weights {
        Some(path) => load_weights(path)?,
        None => args
            .weight
            .iter()
            .map(String::as_str)
            .map(parse_weight_spec)
            .collect::<Result<Vec<_>, _>>()?,
    };

    let request = RiskAttributionRequest {
        histories,
        weights,
        horizon: horizon_or_default(args.horizon.as_deref(), config),
    };

    let report = attribute_risk(&request, config)?;

    if report.degenerate && !output.quiet {
        print_warning("Portfolio volatility is zero; risk shares are split evenly across holdings");
    }

    match output.format {
        OutputFormat::Table => {
            if !output.quiet {
                print_header("Portfolio");
                print_output(&summary(&report), OutputFormat::Table)?;
                print_header("Risk Contributions");
            }
            print_output(&rows(&report, args.ranked), OutputFormat::Table)
        }
        OutputFormat::Json => print_json(&report),
        OutputFormat::Csv => print_output(&rows(&report, args.ranked), OutputFormat::Csv),
        OutputFormat::Minimal => {
            println!("{}", report.portfolio_volatility);
            Ok(())
        }
    }
}
