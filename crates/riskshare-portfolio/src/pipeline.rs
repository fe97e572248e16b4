//! End-to-end attribution at the symbol boundary.
//!
//! Symbols appear only here. The pipeline fixes an [`AssetIndex`] from the
//! request, arranges prices and weights by index position, and runs the
//! numeric stages on plain slices:
//!
//! ```text
//! horizon ─► LookbackPolicy ─► trim prices ─► returns ─► covariance ─► decomposition
//! ```

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use riskshare_core::types::{AssetIndex, PriceHistory, PriceSeries, Symbol};
use riskshare_core::{RiskShareError, RiskShareResult};
use riskshare_math::{compute_covariance_with, CovarianceMatrix};

use crate::config::EngineConfig;
use crate::decomposition::compute_risk_contributions_with;
use crate::lookback::Horizon;
use crate::report::{AssetContribution, AttributionReport};

/// Price data for one asset, with or without observation dates.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceData {
    /// Prices with strictly increasing dates; calendars are checked across assets.
    Dated(PriceHistory),
    /// Bare prices; only lengths are checked across assets.
    Plain(PriceSeries),
}

impl PriceData {
    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Dated(h) => h.len(),
            Self::Plain(s) => s.len(),
        }
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The prices.
    #[must_use]
    pub fn prices(&self) -> &[f64] {
        match self {
            Self::Dated(h) => h.prices().as_slice(),
            Self::Plain(s) => s.as_slice(),
        }
    }

    /// The dates, if any.
    #[must_use]
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        match self {
            Self::Dated(h) => Some(h.dates()),
            Self::Plain(_) => None,
        }
    }
}

impl From<PriceHistory> for PriceData {
    fn from(history: PriceHistory) -> Self {
        Self::Dated(history)
    }
}

impl From<PriceSeries> for PriceData {
    fn from(series: PriceSeries) -> Self {
        Self::Plain(series)
    }
}

/// A request to attribute portfolio risk.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAttributionRequest {
    /// Price data per asset. Order defines the asset index.
    pub histories: Vec<(Symbol, PriceData)>,

    /// Weight per asset, fractions or percentages.
    pub weights: Vec<(Symbol, f64)>,

    /// Horizon label such as `"1y"` or `"medium"`.
    pub horizon: String,
}

impl RiskAttributionRequest {
    /// Creates a request with the given horizon label and no assets.
    #[must_use]
    pub fn new(horizon: impl Into<String>) -> Self {
        Self {
            histories: Vec::new(),
            weights: Vec::new(),
            horizon: horizon.into(),
        }
    }

    /// Adds an asset with its prices and weight.
    #[must_use]
    pub fn with_asset(
        mut self,
        symbol: impl Into<Symbol>,
        prices: impl Into<PriceData>,
        weight: f64,
    ) -> Self {
        let symbol = symbol.into();
        self.histories.push((symbol.clone(), prices.into()));
        self.weights.push((symbol, weight));
        self
    }
}

/// Attributes portfolio volatility to each asset in the request.
///
/// # Errors
///
/// * `DuplicateSymbol` if a symbol repeats in the histories or weights
/// * `InvalidWeight` if a weight is missing, names an unknown symbol, or is non-finite
/// * `MisalignedSeries` if price lengths or calendars differ across assets
/// * `InsufficientData` if the reconciled window is below the minimum sample
///
/// # Example
///
/// ```rust
/// use riskshare_core::types::PriceSeries;
/// use riskshare_portfolio::prelude::*;
///
/// let a: Vec<f64> = (0..30).map(|i| 100.0 + ((i * 7) % 5) as f64).collect();
/// let b: Vec<f64> = (0..30).map(|i| 50.0 + ((i * 3) % 4) as f64).collect();
///
/// let request = RiskAttributionRequest::new("1y")
///     .with_asset("A", PriceSeries::new(a).unwrap(), 0.6)
///     .with_asset("B", PriceSeries::new(b).unwrap(), 0.4);
///
/// let report = attribute_risk(&request, &EngineConfig::default()).unwrap();
/// let total: f64 = report.assets.iter().map(|a| a.contribution_pct).sum();
/// assert!((total - 100.0).abs() < 1e-9);
/// ```
pub fn attribute_risk(
    request: &RiskAttributionRequest,
    config: &EngineConfig,
) -> RiskShareResult<AttributionReport> {
    let index = build_index(&request.histories)?;
    let weights = order_weights(&index, &request.weights)?;
    let estimate = estimate_window(index, &request.histories, &request.horizon, config)?;

    let rc = compute_risk_contributions_with(&weights, &estimate.covariance, &config.decomposition)?;

    let assets = estimate
        .index
        .symbols()
        .iter()
        .enumerate()
        .map(|(i, symbol)| AssetContribution {
            symbol: symbol.clone(),
            weight: rc.weights[i],
            volatility: rc.asset_volatilities[i],
            marginal: rc.marginal[i],
            contribution: rc.absolute[i],
            contribution_pct: rc.percentages[i],
        })
        .collect();

    Ok(AttributionReport {
        horizon: estimate.horizon,
        requested_observations: estimate.requested_observations,
        observations: estimate.observations,
        start_date: estimate.start_date,
        end_date: estimate.end_date,
        return_kind: config.return_kind,
        portfolio_volatility: rc.portfolio_volatility,
        portfolio_variance: rc.portfolio_variance,
        diversification_ratio: rc.diversification_ratio(),
        degenerate: rc.degenerate,
        assets,
    })
}

/// Covariance of windowed returns, with the window that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceEstimate {
    /// Asset order of the matrix rows and columns.
    pub index: AssetIndex,

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

    /// Sample covariance of the windowed returns.
    pub covariance: CovarianceMatrix,
}

/// Runs the lookback, returns and covariance stages without weights.
///
/// # Errors
///
/// Same as [`attribute_risk`], minus the weight checks.
pub fn estimate_covariance(
    histories: &[(Symbol, PriceData)],
    horizon: &str,
    config: &EngineConfig,
) -> RiskShareResult<CovarianceEstimate> {
    let index = build_index(histories)?;
    estimate_window(index, histories, horizon, config)
}

fn build_index(histories: &[(Symbol, PriceData)]) -> RiskShareResult<AssetIndex> {
    if histories.is_empty() {
        return Err(RiskShareError::insufficient_data(1, 0, "assets"));
    }
    AssetIndex::new(histories.iter().map(|(s, _)| s.clone()))
}

fn estimate_window(
    index: AssetIndex,
    histories: &[(Symbol, PriceData)],
    label: &str,
    config: &EngineConfig,
) -> RiskShareResult<CovarianceEstimate> {
    let available = check_alignment(histories)?;

    let horizon = config.lookback.resolve(label);
    let requested = config.lookback.days(horizon);
    let count = config.lookback.reconcile(requested, available)?;

    tracing::debug!(
        assets = index.len(),
        %horizon,
        requested,
        available,
        observations = count,
        "reconciled lookback window"
    );

    let returns = histories
        .iter()
        .map(|(_, data)| {
            let prices = data.prices();
            config.return_kind.compute(&prices[prices.len() - count..])
        })
        .collect::<RiskShareResult<Vec<_>>>()?;

    let covariance = compute_covariance_with(&returns, &config.compute)?;
    tracing::debug!(dim = covariance.dim(), periods = count - 1, "estimated covariance");

    let window_dates = reference_calendar(histories).map(|dates| &dates[dates.len() - count..]);

    Ok(CovarianceEstimate {
        index,
        horizon,
        requested_observations: requested,
        observations: count,
        start_date: window_dates.and_then(|d| d.first().copied()),
        end_date: window_dates.and_then(|d| d.last().copied()),
        covariance,
    })
}

/// Restricts dated histories to the dates every one of them shares.
///
/// Use this when a provider returned ragged calendars (holidays on
/// different exchanges, late listings). [`attribute_risk`] never aligns on
/// its own; it rejects mismatched calendars.
///
/// # Errors
///
/// Returns `InsufficientData` if no date is common to all histories.
pub fn align_histories(histories: &[PriceHistory]) -> RiskShareResult<Vec<PriceHistory>> {
    let Some((first, rest)) = histories.split_first() else {
        return Ok(Vec::new());
    };

    let mut common: BTreeSet<NaiveDate> = first.dates().iter().copied().collect();
    for history in rest {
        let dates: HashSet<NaiveDate> = history.dates().iter().copied().collect();
        common.retain(|d| dates.contains(d));
    }

    if common.is_empty() {
        return Err(RiskShareError::insufficient_data(1, 0, "common trading dates"));
    }

    let aligned: Vec<PriceHistory> = histories.iter().map(|h| h.restrict_to(&common)).collect();
    let dropped: usize = histories.iter().map(|h| h.len() - common.len()).sum();
    tracing::debug!(
        assets = histories.len(),
        common_dates = common.len(),
        dropped,
        "aligned price histories"
    );

    Ok(aligned)
}

/// Arranges weights into index order, reporting key problems as weight errors.
fn order_weights(index: &AssetIndex, weights: &[(Symbol, f64)]) -> RiskShareResult<Vec<f64>> {
    index.arrange(weights).map_err(|err| match err {
        RiskShareError::UnknownSymbol { symbol } => {
            RiskShareError::invalid_weight(format!("weight given for unknown symbol {symbol}"))
        }
        RiskShareError::MissingSymbol { symbol } => {
            RiskShareError::invalid_weight(format!("no weight for {symbol}"))
        }
        other => other,
    })
}

/// Calendar of the first dated asset, if any asset is dated.
fn reference_calendar(histories: &[(Symbol, PriceData)]) -> Option<&[NaiveDate]> {
    histories.iter().find_map(|(_, data)| data.dates())
}

/// Checks every asset has the same observation count and every dated asset
/// the same calendar. Returns the shared count.
fn check_alignment(histories: &[(Symbol, PriceData)]) -> RiskShareResult<usize> {
    let (_, reference) = &histories[0];
    let expected = reference.len();

    for (symbol, data) in &histories[1..] {
        if data.len() != expected {
            return Err(RiskShareError::misaligned(
                format!("{expected} observations"),
                format!("{} observations", data.len()),
                format!("asset {symbol}"),
            ));
        }
    }

    if let Some(calendar) = reference_calendar(histories) {
        for (symbol, data) in histories {
            let Some(dates) = data.dates() else {
                continue;
            };
            if let Some(pos) = calendar.iter().zip(dates).position(|(a, b)| a != b) {
                return Err(RiskShareError::misaligned(
                    calendar[pos],
                    dates[pos],
                    format!("calendar of asset {symbol} at observation {pos}"),
                ));
            }
        }
    }

    Ok(expected)
}
