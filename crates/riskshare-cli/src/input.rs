//! CSV input loading.
//!
//! Prices are read in long format, one observation per row:
//!
//! ```text
//! date,symbol,close
//! 2024-01-02,AAPL,185.64
//! 2024-01-02,MSFT,370.87
//! ```
//!
//! Rows may appear in any order. Symbols keep the order of their first
//! appearance, which becomes the asset index order.
//!
//! Weights are read as `symbol,weight` rows.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use riskshare_core::types::{PriceHistory, Symbol};
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// CSV record for one price observation.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    date: NaiveDate,
    symbol: String,
    close: f64,
}

/// CSV record for one weight.
#[derive(Debug, Deserialize)]
struct WeightRecord {
    symbol: String,
    weight: f64,
}

/// Loads dated price histories, one per symbol, in first-appearance order.
pub fn load_prices(path: &Path) -> CliResult<Vec<(Symbol, PriceHistory)>> {
    let display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CliError::Csv {
            path: display.clone(),
            source,
        })?;

    let mut order: Vec<String> = Vec::new();
    let mut observations: HashMap<String, Vec<(NaiveDate, f64)>> = HashMap::new();
    let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

    for result in reader.deserialize() {
        let record: PriceRecord = result.map_err(|source| CliError::Csv {
            path: display.clone(),
            source,
        })?;

        if !seen.insert((record.symbol.clone(), record.date)) {
            return Err(CliError::DuplicateObservation {
                symbol: record.symbol,
                date: record.date.to_string(),
            });
        }

        observations
            .entry(record.symbol.clone())
            .or_insert_with(|| {
                order.push(record.symbol.clone());
                Vec::new()
            })
            .push((record.date, record.close));
    }

    if order.is_empty() {
        return Err(CliError::EmptyInput(display));
    }

    let histories = order
        .into_iter()
        .map(|symbol| {
            let rows = observations.remove(&symbol).unwrap_or_default();
            let history = PriceHistory::from_observations(rows).map_err(|source| {
                CliError::InvalidSeries {
                    symbol: symbol.clone(),
                    source,
                }
            })?;
            Ok((Symbol::new(symbol), history))
        })
        .collect::<CliResult<Vec<_>>>()?;

    let path_display = &display;
    tracing::debug!(
        path = %path_display,
        symbols = histories.len(),
        "loaded price histories"
    );

    Ok(histories)
}

/// Loads `symbol,weight` rows.
pub fn load_weights(path: &Path) -> CliResult<Vec<(Symbol, f64)>> {
    let display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CliError::Csv {
            path: display.clone(),
            source,
        })?;

    let weights = reader
        .deserialize()
        .map(|result| {
            result
                .map(|r: WeightRecord| (Symbol::new(r.symbol), r.weight))
                .map_err(|source| CliError::Csv {
                    path: display.clone(),
                    source,
                })
        })
        .collect::<CliResult<Vec<_>>>()?;

    if weights.is_empty() {
        return Err(CliError::EmptyInput(display));
    }

    Ok(weights)
}

/// Parses a `SYMBOL=WEIGHT` argument.
pub fn parse_weight_spec(spec: &str) -> CliResult<(Symbol, f64)> {
    let (symbol, weight) = spec
        .split_once('=')
        .ok_or_else(|| CliError::InvalidWeightSpec(spec.to_string()))?;

    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(CliError::InvalidWeightSpec(spec.to_string()));
    }

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidWeightSpec(spec.to_string()))?;

    Ok((Symbol::new(symbol), weight))
}
