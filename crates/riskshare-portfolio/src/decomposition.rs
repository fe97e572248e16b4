//! Euler decomposition of portfolio volatility.
//!
//! For weights `w` and covariance `Σ`:
//!
//! ```text
//! σ²_p = wᵀΣw            (floored at 0)
//! m    = Σw
//! CR_i = w_i · m_i / σ_p  (absolute contribution, volatility units)
//! P_i  = 100 · CR_i / σ_p (percentage contribution)
//! ```
//!
//! Because volatility is homogeneous of degree one in the weights, the
//! absolute contributions sum to `σ_p` and the percentages sum to 100 for any
//! real weights, short positions included.

use riskshare_core::types::{WeightScale, WeightVector};
use riskshare_core::{RiskShareError, RiskShareResult};
use riskshare_math::CovarianceMatrix;
use serde::{Deserialize, Serialize};

/// Volatility at or below which a portfolio is treated as riskless.
pub const DEFAULT_DEGENERATE_TOLERANCE: f64 = 1e-12;

/// Settings for [`compute_risk_contributions_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Portfolio volatility at or below this value yields a degenerate result.
    pub degenerate_tolerance: f64,

    /// How raw weights are interpreted.
    pub weight_scale: WeightScale,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            degenerate_tolerance: DEFAULT_DEGENERATE_TOLERANCE,
            weight_scale: WeightScale::Auto,
        }
    }
}

impl DecompositionConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the degenerate volatility tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.degenerate_tolerance = tolerance;
        self
    }

    /// Sets the weight interpretation.
    #[must_use]
    pub fn with_weight_scale(mut self, scale: WeightScale) -> Self {
        self.weight_scale = scale;
        self
    }

    /// Checks the tolerance is finite and non-negative.
    pub fn validate(&self) -> RiskShareResult<()> {
        if !self.degenerate_tolerance.is_finite() || self.degenerate_tolerance < 0.0 {
            return Err(RiskShareError::invalid_config(format!(
                "degenerate_tolerance must be finite and non-negative, got {}",
                self.degenerate_tolerance
            )));
        }
        Ok(())
    }
}

/// Per-asset decomposition of portfolio volatility.
///
/// All vectors are positioned by the asset index used to build the
/// covariance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskContribution {
    /// Weights as fractions, after scale normalisation.
    pub weights: Vec<f64>,

    /// Stand-alone volatility of each asset, `sqrt(Σ[i][i])`.
    pub asset_volatilities: Vec<f64>,

    /// Marginal contribution `∂σ_p/∂w_i = (Σw)_i / σ_p`. Zero when degenerate.
    pub marginal: Vec<f64>,

    /// Absolute contribution in volatility units. Sums to `portfolio_volatility`.
    pub absolute: Vec<f64>,

    /// Share of portfolio volatility (0-100 scale). Sums to 100.
    pub percentages: Vec<f64>,

    /// Portfolio variance `wᵀΣw`, floored at 0.
    pub portfolio_variance: f64,

    /// Portfolio volatility `σ_p`.
    pub portfolio_volatility: f64,

    /// True when `σ_p` was at or below the tolerance.
    pub degenerate: bool,
}

impl RiskContribution {
    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.absolute.len()
    }

    /// Returns true if there are no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absolute.is_empty()
    }

    /// Positions of the `n` largest contributors by absolute percentage.
    ///
    /// Ties keep index order.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|a, b| {
            self.percentages[*b]
                .abs()
                .total_cmp(&self.percentages[*a].abs())
        });
        order.truncate(n);
        order
    }

    /// Positions whose contribution reduces portfolio volatility.
    #[must_use]
    pub fn hedges(&self) -> Vec<usize> {
        self.absolute
            .iter()
            .enumerate()
            .filter(|(_, c)| **c < 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Ratio of weighted stand-alone volatility to portfolio volatility,
    /// `Σ|w_i|σ_i / σ_p`.
    ///
    /// Returns `None` for a degenerate portfolio.
    #[must_use]
    pub fn diversification_ratio(&self) -> Option<f64> {
        if self.degenerate {
            return None;
        }
        let weighted: f64 = self
            .weights
            .iter()
            .zip(&self.asset_volatilities)
            .map(|(w, s)| w.abs() * s)
            .sum();
        Some(weighted / self.portfolio_volatility)
    }

    /// `|Σ CR_i - σ_p|`, zero up to rounding.
    #[must_use]
    pub fn euler_residual(&self) -> f64 {
        (self.absolute.iter().sum::<f64>() - self.portfolio_volatility).abs()
    }

    /// Sum of percentage contributions.
    #[must_use]
    pub fn percentage_sum(&self) -> f64 {
        self.percentages.iter().sum()
    }
}

/// Decomposes portfolio volatility into per-asset contributions.
///
/// Uses the default [`DecompositionConfig`]: weights summing nearer 100 than
/// 1 are read as percentages, and volatility at or below `1e-12` is
/// degenerate.
///
/// # Errors
///
/// Returns `InvalidWeight` if the weight count differs from the covariance
/// dimension or any weight is non-finite.
///
/// # Example
///
/// ```rust
/// use riskshare_math::compute_covariance;
/// use riskshare_portfolio::decomposition::compute_risk_contributions;
///
/// let cov = compute_covariance(&[
///     vec![0.01, -0.02, 0.03],
///     vec![0.02, -0.01, 0.01],
/// ]).unwrap();
/// let rc = compute_risk_contributions(&[0.6, 0.4], &cov).unwrap();
///
/// assert!((rc.percentage_sum() - 100.0).abs() < 1e-9);
/// assert!(rc.euler_residual() < 1e-15);
/// ```
pub fn compute_risk_contributions(
    weights: &[f64],
    covariance: &CovarianceMatrix,
) -> RiskShareResult<RiskContribution> {
    compute_risk_contributions_with(weights, covariance, &DecompositionConfig::default())
}

/// Decomposes portfolio volatility with explicit settings.
///
/// # Errors
///
/// * `InvalidConfig` if the degenerate tolerance is negative or non-finite
/// * `InvalidWeight` as for [`compute_risk_contributions`]
pub fn compute_risk_contributions_with(
    weights: &[f64],
    covariance: &CovarianceMatrix,
    config: &DecompositionConfig,
) -> RiskShareResult<RiskContribution> {
    config.validate()?;
    let weights = WeightVector::normalize(weights, covariance.dim(), config.weight_scale)?;
    let w = weights.as_slice();
    let sigma_w = covariance.mul_vector(w)?;

    let portfolio_variance = w
        .iter()
        .zip(&sigma_w)
        .map(|(wi, mi)| wi * mi)
        .sum::<f64>()
        .max(0.0);
    let portfolio_volatility = portfolio_variance.sqrt();
    let asset_volatilities = covariance.volatilities();

    if portfolio_volatility <= config.degenerate_tolerance {
        tracing::warn!(
            assets = w.len(),
            active = weights.active_count(),
            portfolio_volatility,
            "portfolio volatility is zero; contributions split evenly across held assets"
        );
        return Ok(degenerate(weights, asset_volatilities, portfolio_variance));
    }

    let marginal: Vec<f64> = sigma_w.iter().map(|m| m / portfolio_volatility).collect();
    let absolute: Vec<f64> = w
        .iter()
        .zip(&sigma_w)
        .map(|(wi, mi)| wi * mi / portfolio_volatility)
        .collect();
    let percentages: Vec<f64> = absolute
        .iter()
        .map(|c| 100.0 * c / portfolio_volatility)
        .collect();

    tracing::debug!(
        assets = w.len(),
        portfolio_volatility,
        "decomposed portfolio volatility"
    );

    Ok(RiskContribution {
        weights: w.to_vec(),
        asset_volatilities,
        marginal,
        absolute,
        percentages,
        portfolio_variance,
        portfolio_volatility,
        degenerate: false,
    })
}

fn degenerate(
    weights: WeightVector,
    asset_volatilities: Vec<f64>,
    portfolio_variance: f64,
) -> RiskContribution {
    let n = weights.len();
    let active = weights.active_count();
    let share = if active == 0 { 0.0 } else { 100.0 / active as f64 };
    let percentages = weights
        .as_slice()
        .iter()
        .map(|w| if *w == 0.0 { 0.0 } else { share })
        .collect();

    RiskContribution {
        weights: weights.as_slice().to_vec(),
        asset_volatilities,
        marginal: vec![0.0; n],
        absolute: vec![0.0; n],
        percentages,
        portfolio_variance,
        portfolio_volatility: 0.0,
        degenerate: true,
    }
}
