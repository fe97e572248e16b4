//! CLI command implementations.

pub mod attribute;
pub mod config;
pub mod covariance;
pub mod returns;

// Re-export submodules for convenience
pub use attribute::AttributeArgs;
pub use config::ConfigArgs;
pub use covariance::CovarianceArgs;
pub use returns::ReturnsArgs;

use std::path::Path;

use riskshare_core::types::{PriceHistory, Symbol};
use riskshare_portfolio::{align_histories, EngineConfig, PriceData};

use crate::error::CliResult;
use crate::input::load_prices;

/// Loads a price file, optionally aligning calendars, ready for the engine.
pub fn load_price_data(path: &Path, align: bool) -> CliResult<Vec<(Symbol, PriceData)>> {
    let histories = load_prices(path)?;

    let histories: Vec<(Symbol, PriceHistory)> = if align {
        let (symbols, raw): (Vec<Symbol>, Vec<PriceHistory>) = histories.into_iter().unzip();
        symbols.into_iter().zip(align_histories(&raw)?).collect()
    } else {
        histories
    };

    Ok(histories
        .into_iter()
        .map(|(symbol, history)| (symbol, PriceData::from(history)))
        .collect())
}

/// Horizon label to use when none was given on the command line.
pub fn horizon_or_default(horizon: Option<&str>, config: &EngineConfig) -> String {
    horizon
        .map(str::to_string)
        .unwrap_or_else(|| config.lookback.default_horizon.to_string())
}
