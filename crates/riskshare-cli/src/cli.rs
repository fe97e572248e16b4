//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AttributeArgs, ConfigArgs, CovarianceArgs, ReturnsArgs};

/// riskshare - Portfolio risk attribution from historical prices
#[derive(Parser)]
#[command(name = "riskshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true, env = "RISKSHARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the return series of one symbol
    Returns(ReturnsArgs),

    /// Estimate the covariance (or correlation) matrix of all symbols
    Covariance(CovarianceArgs),

    /// Attribute portfolio volatility to each holding
    Attribute(AttributeArgs),

    /// Show or create engine configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}

/// Settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress status lines.
    pub quiet: bool,
}
