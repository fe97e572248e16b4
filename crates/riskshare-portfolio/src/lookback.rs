//! Lookback horizon policy.
//!
//! Maps a horizon label such as `"1y"` to a target number of trading-day
//! price observations, and reconciles that target against the number of
//! observations actually collected.

use std::fmt;
use std::str::FromStr;

use riskshare_core::{RiskShareError, RiskShareResult};
use serde::{Deserialize, Serialize};

/// Trading days in one year.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Named lookback horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    /// One year of daily observations.
    #[default]
    Short,
    /// Three years of daily observations.
    Medium,
    /// Five years of daily observations.
    Long,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    /// Parses a horizon label, case-insensitively.
    ///
    /// Returns `None` for labels that name no horizon.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "short" | "1y" | "1yr" | "one_year" => Some(Self::Short),
            "medium" | "3y" | "3yr" | "three_year" => Some(Self::Medium),
            "long" | "5y" | "5yr" | "five_year" => Some(Self::Long),
            _ => None,
        }
    }

    /// Canonical label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = RiskShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| RiskShareError::invalid_config(format!("unknown horizon '{s}'")))
    }
}

/// Horizon-to-window mapping and minimum sample rule.
///
/// # Example
///
/// ```rust
/// use riskshare_portfolio::lookback::LookbackPolicy;
///
/// let policy = LookbackPolicy::default();
/// assert_eq!(policy.window_for("3y"), 756);
/// assert_eq!(policy.window_for("unheard-of"), 252);
///
/// // Only 300 observations were collected for a five-year request
/// assert_eq!(policy.reconcile(1260, 300).unwrap(), 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookbackPolicy {
    /// Observations for [`Horizon::Short`].
    pub short_days: usize,

    /// Observations for [`Horizon::Medium`].
    pub medium_days: usize,

    /// Observations for [`Horizon::Long`].
    pub long_days: usize,

    /// Horizon used when a label is not recognised.
    pub default_horizon: Horizon,

    /// Fewest price observations a window may hold after reconciliation.
    pub minimum_sample: usize,
}

impl Default for LookbackPolicy {
    fn default() -> Self {
        Self {
            short_days: TRADING_DAYS_PER_YEAR,
            medium_days: 3 * TRADING_DAYS_PER_YEAR,
            long_days: 5 * TRADING_DAYS_PER_YEAR,
            default_horizon: Horizon::Short,
            minimum_sample: 20,
        }
    }
}

impl LookbackPolicy {
    /// Creates a policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the horizon used for unrecognised labels.
    #[must_use]
    pub fn with_default_horizon(mut self, horizon: Horizon) -> Self {
        self.default_horizon = horizon;
        self
    }

    /// Sets the minimum reconciled sample size.
    #[must_use]
    pub fn with_minimum_sample(mut self, minimum: usize) -> Self {
        self.minimum_sample = minimum;
        self
    }

    /// Sets the observation count for one horizon.
    #[must_use]
    pub fn with_days(mut self, horizon: Horizon, days: usize) -> Self {
        match horizon {
            Horizon::Short => self.short_days = days,
            Horizon::Medium => self.medium_days = days,
            Horizon::Long => self.long_days = days,
        }
        self
    }

    /// Observation count for a horizon.
    #[must_use]
    pub fn days(&self, horizon: Horizon) -> usize {
        match horizon {
            Horizon::Short => self.short_days,
            Horizon::Medium => self.medium_days,
            Horizon::Long => self.long_days,
        }
    }

    /// Resolves a label, falling back to the default horizon.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Horizon {
        Horizon::from_label(label).unwrap_or_else(|| {
            tracing::debug!(
                label,
                fallback = %self.default_horizon,
                "unrecognised horizon label"
            );
            self.default_horizon
        })
    }

    /// Target number of observations for a horizon label.
    #[must_use]
    pub fn window_for(&self, label: &str) -> usize {
        self.days(self.resolve(label))
    }

    /// Reconciles a requested window against the observations available.
    ///
    /// Returns `min(requested, available)`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the reconciled count is below
    /// `minimum_sample`.
    pub fn reconcile(&self, requested: usize, available: usize) -> RiskShareResult<usize> {
        let count = requested.min(available);
        if count < self.minimum_sample {
            return Err(RiskShareError::insufficient_data(
                self.minimum_sample,
                count,
                "lookback window",
            ));
        }
        Ok(count)
    }

    /// Keeps the most recent observations of a series that fit the window.
    pub fn trim<'a, T>(&self, observations: &'a [T], requested: usize) -> RiskShareResult<&'a [T]> {
        let count = self.reconcile(requested, observations.len())?;
        Ok(&observations[observations.len() - count..])
    }

    /// Checks the policy for unusable settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a minimum sample below two, or for a
    /// window shorter than the minimum sample.
    pub fn validate(&self) -> RiskShareResult<()> {
        if self.minimum_sample < 2 {
            return Err(RiskShareError::invalid_config(format!(
                "minimum_sample must be at least 2, got {}",
                self.minimum_sample
            )));
        }

        for horizon in Horizon::ALL {
            let days = self.days(horizon);
            if days < self.minimum_sample {
                return Err(RiskShareError::invalid_config(format!(
                    "{horizon} lookback window of {days} days is below minimum_sample {}",
                    self.minimum_sample
                )));
            }
        }

        Ok(())
    }
}
