//! Price-to-return conversion.
//!
//! Converts an ordered price series into the ordered series of
//! period-over-period returns. Output length is always input length − 1.

use riskshare_core::types::{validate_prices, PriceSeries, ReturnSeries};
use riskshare_core::{RiskShareError, RiskShareResult};
use serde::{Deserialize, Serialize};

/// Minimum number of prices needed to form one return.
pub const MIN_PRICES: usize = 2;

/// The return definition applied to consecutive prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// Simple return: `(p[i+1] - p[i]) / p[i]`.
    #[default]
    Simple,
    /// Continuously compounded return: `ln(p[i+1] / p[i])`.
    Log,
}

impl ReturnKind {
    /// Computes returns of this kind from raw prices.
    pub fn compute(self, prices: &[f64]) -> RiskShareResult<Vec<f64>> {
        match self {
            Self::Simple => compute_returns(prices),
            Self::Log => compute_log_returns(prices),
        }
    }
}

/// Computes simple returns from an ordered price series.
///
/// `r[i] = (p[i+1] - p[i]) / p[i]`
///
/// # Arguments
///
/// * `prices` - Positive, finite prices in chronological order
///
/// # Errors
///
/// * `InsufficientData` if fewer than two prices are given
/// * `InvalidPrice` if any price is non-positive or non-finite
///
/// # Example
///
/// ```rust
/// use riskshare_math::returns::compute_returns;
///
/// let r = compute_returns(&[100.0, 101.0, 99.0, 105.0]).unwrap();
/// assert_eq!(r.len(), 3);
/// assert!((r[0] - 0.01).abs() < 1e-12);
/// ```
pub fn compute_returns(prices: &[f64]) -> RiskShareResult<Vec<f64>> {
    check_prices(prices)?;

    Ok(prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect())
}

/// Computes continuously compounded returns, `ln(p[i+1] / p[i])`.
///
/// Same validation rules as [`compute_returns`].
pub fn compute_log_returns(prices: &[f64]) -> RiskShareResult<Vec<f64>> {
    check_prices(prices)?;

    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Computes returns of the requested kind for a validated series.
pub fn returns_of(series: &PriceSeries, kind: ReturnKind) -> RiskShareResult<ReturnSeries> {
    kind.compute(series.as_slice()).map(ReturnSeries::new)
}

fn check_prices(prices: &[f64]) -> RiskShareResult<()> {
    if prices.len() < MIN_PRICES {
        return Err(RiskShareError::insufficient_data(
            MIN_PRICES,
            prices.len(),
            "return calculation",
        ));
    }
    validate_prices(prices)
}
