//! Symbol-level attribution report.

use chrono::NaiveDate;
use riskshare_core::types::Symbol;
use riskshare_math::ReturnKind;
use serde::{Deserialize, Serialize};

use crate::lookback::Horizon;

/// Contribution of a single asset to portfolio volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetContribution {
    /// Asset identifier.
    pub symbol: Symbol,

    /// Weight as a fraction of capital.
    pub weight: f64,

    /// Stand-alone volatility of the asset's returns.
    pub volatility: f64,

    /// Marginal contribution, `∂σ_p/∂w`.
    pub marginal: f64,

    /// Absolute contribution in volatility units.
    pub contribution: f64,

    /// Contribution as percentage of portfolio volatility (0-100).
    pub contribution_pct: f64,
}

/// Result of [`attribute_risk`](crate::pipeline::attribute_risk).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionReport {
    /// Horizon the label resolved to.
    pub horizon: Horizon,

    /// Observations the horizon asked for.
    pub requested_observations: usize,

    /// Price observations actually used per asset.
    pub observations: usize,

    /// First date of the window, when histories were dated.
    pub start_date: Option<NaiveDate>,

    /// Last date of the window, when histories were dated.
    pub end_date: Option<NaiveDate>,

    /// Return definition used.
    pub return_kind: ReturnKind,

    /// Portfolio volatility per return period.
    pub portfolio_volatility: f64,

    /// Portfolio variance per return period.
    pub portfolio_variance: f64,

    /// `Σ|w_i|σ_i / σ_p`; absent for a degenerate portfolio.
    pub diversification_ratio: Option<f64>,

    /// True when the portfolio had zero volatility.
    pub degenerate: bool,

    /// Per-asset contributions in asset index order.
    pub assets: Vec<AssetContribution>,
}

impl AttributionReport {
    /// Looks up an asset by symbol.
    #[must_use]
    pub fn asset(&self, symbol: &str) -> Option<&AssetContribution> {
        self.assets.iter().find(|a| a.symbol.as_str() == symbol)
    }

    /// Assets sorted by absolute percentage contribution, largest first.
    #[must_use]
    pub fn ranked(&self) -> Vec<&AssetContribution> {
        let mut ranked: Vec<&AssetContribution> = self.assets.iter().collect();
        ranked.sort_by(|a, b| b.contribution_pct.abs().total_cmp(&a.contribution_pct.abs()));
        ranked
    }

    /// Returns the top N contributors by absolute percentage.
    #[must_use]
    pub fn top_contributors(&self, n: usize) -> Vec<&AssetContribution> {
        self.ranked().into_iter().take(n).collect()
    }

    /// Assets whose contribution reduces portfolio volatility.
    #[must_use]
    pub fn hedges(&self) -> Vec<&AssetContribution> {
        self.assets.iter().filter(|a| a.contribution < 0.0).collect()
    }

    /// Returns the number of trading periods covered by the window.
    #[must_use]
    pub fn return_periods(&self) -> usize {
        self.observations.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(symbol: &str, pct: f64) -> AssetContribution {
        AssetContribution {
            symbol: Symbol::new(symbol),
            weight: 0.25,
            volatility: 0.01,
            marginal: 0.0,
            contribution: pct / 100.0,
            contribution_pct: pct,
        }
    }

    fn report() -> AttributionReport {
        AttributionReport {
            horizon: Horizon::Short,
            requested_observations: 252,
            observations: 100,
            start_date: None,
            end_date: None,
            return_kind: ReturnKind::Simple,
            portfolio_volatility: 0.01,
            portfolio_variance: 0.0001,
            diversification_ratio: Some(1.2),
            degenerate: false,
            assets: vec![
                asset("A", 20.0),
                asset("B", 90.0),
                asset("C", -30.0),
                asset("D", 20.0),
            ],
        }
    }

    #[test]
    fn test_ranked_by_absolute_percentage() {
        let report = report();
        let order: Vec<&str> = report.ranked().iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A", "D"]);
        assert_eq!(report.top_contributors(1)[0].symbol.as_str(), "B");
    }

    #[test]
    fn test_lookup_and_hedges() {
        let report = report();
        assert_eq!(report.asset("D").unwrap().contribution_pct, 20.0);
        assert!(report.asset("Z").is_none());
        assert_eq!(report.hedges().len(), 1);
        assert_eq!(report.return_periods(), 99);
    }
}
