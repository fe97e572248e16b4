//! Price and return series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RiskShareError, RiskShareResult};

/// An ordered, chronological sequence of closing prices for one asset.
///
/// Construction rejects non-positive and non-finite values, so every
/// `PriceSeries` is safe to feed to the returns calculation. Values are
/// never dropped: dropping one would shift the series against the trading
/// calendar of every other asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    /// Creates a validated price series.
    ///
    /// # Errors
    ///
    /// Returns `RiskShareError::InvalidPrice` for the first price that is
    /// zero, negative, NaN, or infinite.
    pub fn new(prices: Vec<f64>) -> RiskShareResult<Self> {
        validate_prices(&prices)?;
        Ok(Self(prices))
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The prices as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The most recent `n` observations (or all of them if fewer exist).
    #[must_use]
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.0[self.0.len().saturating_sub(n)..]
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let prices = Vec::<f64>::deserialize(deserializer)?;
        PriceSeries::new(prices).map_err(serde::de::Error::custom)
    }
}

/// Checks that every price is positive and finite.
pub fn validate_prices(prices: &[f64]) -> RiskShareResult<()> {
    match prices
        .iter()
        .position(|p| !p.is_finite() || *p <= 0.0)
    {
        Some(position) => Err(RiskShareError::InvalidPrice {
            position,
            value: prices[position],
        }),
        None => Ok(()),
    }
}

/// A price series together with its observation dates.
///
/// This is the shape a market-data provider hands back: one closing price
/// per trading date, strictly increasing in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceHistory {
    dates: Vec<NaiveDate>,
    prices: PriceSeries,
}

impl PriceHistory {
    /// Creates a dated price history.
    ///
    /// # Errors
    ///
    /// Fails with `MisalignedSeries` if the date and price counts differ or
    /// the dates are not strictly increasing, and with `InvalidPrice` for a
    /// bad price.
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> RiskShareResult<Self> {
        if dates.len() != prices.len() {
            return Err(RiskShareError::misaligned(
                format!("{} prices", dates.len()),
                format!("{} prices", prices.len()),
                "price history dates",
            ));
        }

        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(RiskShareError::misaligned(
                format!("a date after {}", w[0]),
                w[1],
                "price history ordering",
            ));
        }

        Ok(Self {
            dates,
            prices: PriceSeries::new(prices)?,
        })
    }

    /// Builds a history from `(date, close)` pairs, sorting by date.
    pub fn from_observations(mut observations: Vec<(NaiveDate, f64)>) -> RiskShareResult<Self> {
        observations.sort_by_key(|(date, _)| *date);
        let (dates, prices) = observations.into_iter().unzip();
        Self::new(dates, prices)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The validated prices.
    #[must_use]
    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    /// Date of the most recent observation.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// The most recent `n` dates (or all of them if fewer exist).
    #[must_use]
    pub fn tail_dates(&self, n: usize) -> &[NaiveDate] {
        &self.dates[self.dates.len().saturating_sub(n)..]
    }

    /// Restricts the history to the given dates, keeping order.
    ///
    /// Dates not present in this history are ignored.
    #[must_use]
    pub fn restrict_to(&self, keep: &std::collections::BTreeSet<NaiveDate>) -> Self {
        let (dates, prices): (Vec<NaiveDate>, Vec<f64>) = self
            .dates
            .iter()
            .zip(self.prices.as_slice())
            .filter(|(d, _)| keep.contains(*d))
            .map(|(d, p)| (*d, *p))
            .unzip();

        Self {
            dates,
            prices: PriceSeries(prices),
        }
    }
}

/// An ordered sequence of period-over-period returns for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Wraps computed returns.
    #[must_use]
    pub fn new(returns: Vec<f64>) -> Self {
        Self(returns)
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The returns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the series, returning the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for ReturnSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
