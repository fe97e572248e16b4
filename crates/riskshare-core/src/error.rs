//! Error types for risk attribution.
//!
//! This module defines the single error type shared by every riskshare crate.
//! Malformed input is reported through these variants; a zero-volatility
//! portfolio is not an error and is flagged on the result instead.

use thiserror::Error;

/// A specialized Result type for riskshare operations.
pub type RiskShareResult<T> = Result<T, RiskShareError>;

/// Errors that can occur while attributing portfolio risk.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskShareError {
    /// Fewer observations than the minimum viable sample.
    #[error("Insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations available.
        actual: usize,
        /// Which stage rejected the input.
        context: String,
    },

    /// Per-asset series have unequal length or differing calendars.
    #[error("Misaligned series in {context}: expected {expected}, got {actual}")]
    MisalignedSeries {
        /// The expected length or calendar description.
        expected: String,
        /// What was actually supplied.
        actual: String,
        /// Which asset or stage is misaligned.
        context: String,
    },

    /// Weight vector length mismatch or non-finite entries.
    #[error("Invalid weight: {reason}")]
    InvalidWeight {
        /// Description of the problem.
        reason: String,
    },

    /// A price that is non-positive or non-finite.
    #[error("Invalid price at position {position}: {value}")]
    InvalidPrice {
        /// Position of the offending observation.
        position: usize,
        /// The rejected value.
        value: f64,
    },

    /// A covariance matrix supplied from outside failed validation.
    #[error("Invalid covariance matrix: {reason}")]
    InvalidCovariance {
        /// Description of the problem.
        reason: String,
    },

    /// The same symbol appeared twice in an asset index.
    #[error("Duplicate symbol: {symbol}")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },

    /// A symbol was referenced that is not part of the asset index.
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol {
        /// The unknown symbol.
        symbol: String,
    },

    /// An indexed symbol had no entry in a keyed collection.
    #[error("Missing entry for symbol: {symbol}")]
    MissingSymbol {
        /// The symbol without an entry.
        symbol: String,
    },

    /// Configuration failed to parse or validate.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl RiskShareError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize, context: impl Into<String>) -> Self {
        Self::InsufficientData {
            required,
            actual,
            context: context.into(),
        }
    }

    /// Creates a misaligned series error.
    #[must_use]
    pub fn misaligned(
        expected: impl ToString,
        actual: impl ToString,
        context: impl Into<String>,
    ) -> Self {
        Self::MisalignedSeries {
            expected: expected.to_string(),
            actual: actual.to_string(),
            context: context.into(),
        }
    }

    /// Creates an invalid weight error.
    #[must_use]
    pub fn invalid_weight(reason: impl Into<String>) -> Self {
        Self::InvalidWeight {
            reason: reason.into(),
        }
    }

    /// Creates an invalid covariance error.
    #[must_use]
    pub fn invalid_covariance(reason: impl Into<String>) -> Self {
        Self::InvalidCovariance {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
