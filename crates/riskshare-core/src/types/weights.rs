//! Portfolio weight vectors.

use serde::{Deserialize, Serialize};

use crate::error::{RiskShareError, RiskShareResult};

/// How a raw weight vector is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightScale {
    /// Infer from the sum: nearer 100 means percentages, otherwise fractions.
    #[default]
    Auto,
    /// Weights are fractions of capital (sum ≈ 1).
    Fraction,
    /// Weights are percentages of capital (sum ≈ 100).
    Percent,
}

impl WeightScale {
    /// Resolves `Auto` against a concrete weight sum.
    #[must_use]
    pub fn resolve(self, sum: f64) -> Self {
        match self {
            Self::Auto => {
                if (sum - 100.0).abs() < (sum - 1.0).abs() {
                    Self::Percent
                } else {
                    Self::Fraction
                }
            }
            other => other,
        }
    }
}

/// Portfolio weights as fractions, one per asset index position.
///
/// Short positions are expressed as negative weights.
///
/// # Example
///
/// ```rust
/// use riskshare_core::types::{WeightScale, WeightVector};
///
/// let w = WeightVector::normalize(&[60.0, 40.0], 2, WeightScale::Auto).unwrap();
/// assert_eq!(w.as_slice(), &[0.6, 0.4]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Validates raw weights and converts them to fractions.
    ///
    /// # Errors
    ///
    /// Returns `RiskShareError::InvalidWeight` if the length differs from
    /// `asset_count` or any entry is non-finite.
    pub fn normalize(raw: &[f64], asset_count: usize, scale: WeightScale) -> RiskShareResult<Self> {
        if raw.len() != asset_count {
            return Err(RiskShareError::invalid_weight(format!(
                "weight vector has {} entries but there are {} assets",
                raw.len(),
                asset_count
            )));
        }

        if let Some((i, w)) = raw.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(RiskShareError::invalid_weight(format!(
                "weight at position {i} is not finite ({w})"
            )));
        }

        let sum: f64 = raw.iter().sum();
        let weights = match scale.resolve(sum) {
            WeightScale::Percent => raw.iter().map(|w| w / 100.0).collect(),
            _ => raw.to_vec(),
        };

        Ok(Self(weights))
    }

    /// Number of weights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The weights as fractions.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Sum of absolute weights (gross exposure).
    #[must_use]
    pub fn gross(&self) -> f64 {
        self.0.iter().map(|w| w.abs()).sum()
    }

    /// Number of non-zero weights.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|w| **w != 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_inference() {
        assert_eq!(WeightScale::Auto.resolve(1.0), WeightScale::Fraction);
        assert_eq!(WeightScale::Auto.resolve(100.0), WeightScale::Percent);
        assert_eq!(WeightScale::Auto.resolve(99.2), WeightScale::Percent);
        assert_eq!(WeightScale::Auto.resolve(0.0), WeightScale::Fraction);
        assert_eq!(WeightScale::Fraction.resolve(100.0), WeightScale::Fraction);
        assert_eq!(WeightScale::Percent.resolve(1.0), WeightScale::Percent);
    }

    #[test]
    fn test_percent_normalized() {
        let w = WeightVector::normalize(&[50.0, 30.0, 20.0], 3, WeightScale::Auto).unwrap();
        assert_relative_eq!(w.as_slice()[0], 0.5);
        assert_relative_eq!(w.as_slice()[1], 0.3);
        assert_relative_eq!(w.as_slice()[2], 0.2);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fractions_untouched() {
        let raw = [0.7, 0.5, -0.2];
        let w = WeightVector::normalize(&raw, 3, WeightScale::Auto).unwrap();
        assert_eq!(w.as_slice(), &raw);
        assert_relative_eq!(w.gross(), 1.4);
        assert_eq!(w.active_count(), 3);
    }

    #[test]
    fn test_length_mismatch() {
        let err = WeightVector::normalize(&[0.5, 0.5], 3, WeightScale::Auto).unwrap_err();
        assert!(matches!(err, RiskShareError::InvalidWeight { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = WeightVector::normalize(&[0.5, f64::NAN], 2, WeightScale::Auto).unwrap_err();
        assert!(err.to_string().contains("position 1"));

        let err =
            WeightVector::normalize(&[f64::INFINITY, 0.5], 2, WeightScale::Auto).unwrap_err();
        assert!(matches!(err, RiskShareError::InvalidWeight { .. }));
    }
}
