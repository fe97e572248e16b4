//! CLI error types.

use riskshare_core::RiskShareError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A price or weight file could not be parsed.
    #[error("Failed to read {path}: {source}")]
    Csv {
        /// File being read.
        path: String,
        /// Underlying parser error.
        #[source]
        source: csv::Error,
    },

    /// The same symbol and date appeared twice in a price file.
    #[error("Duplicate observation for {symbol} on {date}")]
    DuplicateObservation {
        /// Asset symbol.
        symbol: String,
        /// Observation date.
        date: String,
    },

    /// A price series failed validation.
    #[error("Invalid prices for {symbol}: {source}")]
    InvalidSeries {
        /// Asset symbol.
        symbol: String,
        /// Validation failure.
        #[source]
        source: RiskShareError,
    },

    /// A symbol was requested that the price file does not contain.
    #[error("Symbol {0} not found in price file")]
    UnknownSymbol(String),

    /// Malformed `SYMBOL=WEIGHT` argument.
    #[error("Invalid weight '{0}'. Use SYMBOL=WEIGHT, e.g. AAPL=0.25.")]
    InvalidWeightSpec(String),

    /// An input file had no rows.
    #[error("No rows in {0}")]
    EmptyInput(String),

    /// Refused to overwrite an existing file.
    #[error("{0} already exists; pass --force to overwrite")]
    FileExists(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine error.
    #[error(transparent)]
    Engine(#[from] RiskShareError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
