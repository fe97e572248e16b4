//! Sample covariance estimation.
//!
//! Builds the unbiased sample covariance matrix of N aligned return series:
//!
//! ```text
//! Σ[i][j] = 1/(T-1) · Σ_t (r_i[t] - mean_i)(r_j[t] - mean_j)
//! ```
//!
//! Each unordered pair `(i, j)` with `i <= j` is evaluated exactly once and
//! written to both `[i][j]` and `[j][i]`, so the result is symmetric bit for
//! bit. Evaluating the upper and lower triangles separately would let
//! rounding drift the two halves apart.

use nalgebra::{DMatrix, DVector};
use riskshare_core::{ComputeConfig, RiskShareError, RiskShareResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parallel::maybe_parallel_map;
use crate::stats::{centered_cross_product, mean};

/// Minimum number of returns per series for an unbiased estimate.
pub const MIN_OBSERVATIONS: usize = 2;

/// Relative tolerance for accepting an externally supplied matrix as symmetric.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// A symmetric N×N covariance matrix with non-negative diagonal.
///
/// Built once per request and immutable afterwards: there are no mutable
/// accessors, and the only constructors are the estimator and the
/// validating [`CovarianceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    matrix: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Builds a covariance matrix from row-major data estimated elsewhere.
    ///
    /// The input must be square, finite, have a non-negative diagonal, and be
    /// symmetric within [`SYMMETRY_TOLERANCE`] (relative to the largest
    /// entry). Off-diagonal pairs are averaged so the stored matrix is
    /// exactly symmetric.
    ///
    /// # Errors
    ///
    /// Returns `RiskShareError::InvalidCovariance` describing the first
    /// violated condition.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> RiskShareResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(RiskShareError::invalid_covariance("matrix is empty"));
        }

        let mut matrix = DMatrix::zeros(n, n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(RiskShareError::invalid_covariance(format!(
                    "row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(RiskShareError::invalid_covariance(format!(
                        "entry ({i}, {j}) is not finite"
                    )));
                }
                matrix[(i, j)] = *value;
            }
        }

        for i in 0..n {
            if matrix[(i, i)] < 0.0 {
                return Err(RiskShareError::invalid_covariance(format!(
                    "variance at ({i}, {i}) is negative"
                )));
            }
        }

        let scale = matrix.amax().max(f64::MIN_POSITIVE);
        for i in 0..n {
            for j in (i + 1)..n {
                let (upper, lower) = (matrix[(i, j)], matrix[(j, i)]);
                if (upper - lower).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(RiskShareError::invalid_covariance(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ: {upper} vs {lower}"
                    )));
                }
                let value = 0.5 * (upper + lower);
                matrix[(i, j)] = value;
                matrix[(j, i)] = value;
            }
        }

        Ok(Self { matrix })
    }

    /// Number of assets (rows = columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Entry at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// Read-only view of the underlying matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Per-asset sample variances (the diagonal).
    #[must_use]
    pub fn variances(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().copied().collect()
    }

    /// Per-asset volatilities, `sqrt(Σ[i][i])`.
    #[must_use]
    pub fn volatilities(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    /// Returns true if every entry is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.matrix.iter().all(|v| *v == 0.0)
    }

    /// Matrix-vector product `Σw`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` if `weights` does not have `dim()` entries.
    pub fn mul_vector(&self, weights: &[f64]) -> RiskShareResult<Vec<f64>> {
        if weights.len() != self.dim() {
            return Err(RiskShareError::invalid_weight(format!(
                "weight vector has {} entries but the covariance matrix is {}x{}",
                weights.len(),
                self.dim(),
                self.dim()
            )));
        }
        let w = DVector::from_column_slice(weights);
        Ok((&self.matrix * w).iter().copied().collect())
    }

    /// Correlation matrix implied by this covariance matrix.
    ///
    /// Assets with zero variance have zero correlation with every other
    /// asset; the diagonal is always 1.
    #[must_use]
    pub fn correlation(&self) -> DMatrix<f64> {
        let n = self.dim();
        let vols = self.volatilities();
        let mut corr = DMatrix::identity(n, n);

        for i in 0..n {
            for j in (i + 1)..n {
                let denom = vols[i] * vols[j];
                let value = if denom > 0.0 {
                    (self.matrix[(i, j)] / denom).clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                corr[(i, j)] = value;
                corr[(j, i)] = value;
            }
        }

        corr
    }

    /// Row-major copy of the matrix.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

impl Serialize for CovarianceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CovarianceMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        CovarianceMatrix::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

/// Estimates the sample covariance matrix of aligned return series.
///
/// Uses the default [`ComputeConfig`]; see [`compute_covariance_with`].
///
/// # Errors
///
/// * `MisalignedSeries` if the series lengths differ
/// * `InsufficientData` if there are no series or fewer than two returns
///
/// # Example
///
/// ```rust
/// use riskshare_math::covariance::compute_covariance;
///
/// let a = vec![0.01, -0.02, 0.03];
/// let b = vec![0.02, -0.01, 0.01];
/// let cov = compute_covariance(&[a, b]).unwrap();
/// assert_eq!(cov.get(0, 1), cov.get(1, 0));
/// ```
pub fn compute_covariance<S>(series: &[S]) -> RiskShareResult<CovarianceMatrix>
where
    S: AsRef<[f64]> + Sync,
{
    compute_covariance_with(series, &ComputeConfig::default())
}

/// Estimates the sample covariance matrix with explicit compute settings.
///
/// Parallel and sequential evaluation return identical bits: every cell is
/// produced by the same sequential kernel, only the scheduling differs.
pub fn compute_covariance_with<S>(
    series: &[S],
    config: &ComputeConfig,
) -> RiskShareResult<CovarianceMatrix>
where
    S: AsRef<[f64]> + Sync,
{
    let n = series.len();
    if n == 0 {
        return Err(RiskShareError::insufficient_data(1, 0, "covariance assets"));
    }

    let t = series[0].as_ref().len();
    for (i, s) in series.iter().enumerate() {
        let len = s.as_ref().len();
        if len != t {
            return Err(RiskShareError::misaligned(
                format!("{t} returns"),
                format!("{len} returns"),
                format!("return series {i}"),
            ));
        }
    }

    if t < MIN_OBSERVATIONS {
        return Err(RiskShareError::insufficient_data(
            MIN_OBSERVATIONS,
            t,
            "covariance observations",
        ));
    }

    for (i, s) in series.iter().enumerate() {
        if let Some(pos) = s.as_ref().iter().position(|r| !r.is_finite()) {
            return Err(RiskShareError::invalid_covariance(format!(
                "return series {i} has a non-finite value at position {pos}"
            )));
        }
    }

    let means: Vec<f64> = series.iter().map(|s| mean(s.as_ref())).collect();
    let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| (i..n).map(move |j| (i, j))).collect();
    let denom = (t - 1) as f64;

    let cells = maybe_parallel_map(&pairs, config, |&(i, j)| {
        centered_cross_product(series[i].as_ref(), means[i], series[j].as_ref(), means[j]) / denom
    });

    let mut matrix = DMatrix::zeros(n, n);
    for (&(i, j), value) in pairs.iter().zip(cells) {
        matrix[(i, j)] = value;
        matrix[(j, i)] = value;
    }

    Ok(CovarianceMatrix { matrix })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::sample_variance;
    use approx::assert_relative_eq;

    fn two_asset() -> CovarianceMatrix {
        compute_covariance(&[vec![0.01, -0.02, 0.03], vec![0.02, -0.01, 0.01]]).unwrap()
    }

    #[test]
    fn test_two_asset_values() {
        let cov = two_asset();
        assert_eq!(cov.dim(), 2);
        assert_relative_eq!(cov.get(0, 0), 19.0 / 30_000.0, epsilon = 1e-15);
        assert_relative_eq!(cov.get(1, 1), 7.0 / 30_000.0, epsilon = 1e-15);
        assert_relative_eq!(cov.get(0, 1), 8.5 / 30_000.0, epsilon = 1e-15);
        assert_eq!(cov.get(0, 1).to_bits(), cov.get(1, 0).to_bits());
    }

    #[test]
    fn test_diagonal_is_sample_variance() {
        let series = vec![
            vec![0.012, -0.004, 0.007, 0.001, -0.011],
            vec![0.003, 0.002, -0.006, 0.009, 0.0],
            vec![-0.02, 0.015, 0.004, -0.001, 0.006],
        ];
        let cov = compute_covariance(&series).unwrap();
        for (i, s) in series.iter().enumerate() {
            assert_eq!(cov.get(i, i), sample_variance(s).unwrap());
        }
    }

    #[test]
    fn test_zero_variance_asset_allowed() {
        let cov = compute_covariance(&[vec![0.01, 0.01, 0.01], vec![0.02, -0.01, 0.03]]).unwrap();
        assert_eq!(cov.get(0, 0), 0.0);
        assert_eq!(cov.get(0, 1), 0.0);
        assert_eq!(cov.get(1, 0), 0.0);
        assert!(cov.get(1, 1) > 0.0);

        let corr = cov.correlation();
        assert_eq!(corr[(0, 1)], 0.0);
        assert_eq!(corr[(0, 0)], 1.0);
    }

    #[test]
    fn test_misaligned_lengths() {
        let err = compute_covariance(&[vec![0.01, 0.02, 0.03], vec![0.01, 0.02]]).unwrap_err();
        assert!(matches!(err, RiskShareError::MisalignedSeries { .. }));
        assert!(err.to_string().contains("return series 1"));
    }

    #[test]
    fn test_insufficient_observations() {
        let err = compute_covariance(&[vec![0.01], vec![0.02]]).unwrap_err();
        assert_eq!(
            err,
            RiskShareError::insufficient_data(2, 1, "covariance observations")
        );

        let empty: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            compute_covariance(&empty),
            Err(RiskShareError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_non_finite_return_rejected() {
        let err = compute_covariance(&[vec![0.01, f64::NAN, 0.0]]).unwrap_err();
        assert!(matches!(err, RiskShareError::InvalidCovariance { .. }));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let series: Vec<Vec<f64>> = (0..12)
            .map(|i| {
                (0..40)
                    .map(|t| ((i * 7 + t * 13) % 17) as f64 / 1000.0 - 0.008)
                    .collect()
            })
            .collect();

        let seq = compute_covariance_with(&series, &ComputeConfig::sequential()).unwrap();
        let par = compute_covariance_with(&series, &ComputeConfig::new().with_threshold(1)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_correlation() {
        let cov = two_asset();
        let corr = cov.correlation();
        let expected = 8.5 / (19.0f64 * 7.0).sqrt();
        assert_relative_eq!(corr[(0, 1)], expected, epsilon = 1e-12);
        assert_eq!(corr[(0, 1)], corr[(1, 0)]);
    }

    #[test]
    fn test_from_rows_validation() {
        let ok = CovarianceMatrix::from_rows(&[vec![0.04, 0.01], vec![0.01, 0.09]]).unwrap();
        assert_eq!(ok.volatilities(), vec![0.2, 0.3]);

        let not_square = CovarianceMatrix::from_rows(&[vec![0.04, 0.01]]);
        assert!(matches!(not_square, Err(RiskShareError::InvalidCovariance { .. })));

        let asym = CovarianceMatrix::from_rows(&[vec![0.04, 0.01], vec![0.02, 0.09]]);
        assert!(matches!(asym, Err(RiskShareError::InvalidCovariance { .. })));

        let negative = CovarianceMatrix::from_rows(&[vec![-0.04]]);
        assert!(matches!(negative, Err(RiskShareError::InvalidCovariance { .. })));

        let nan = CovarianceMatrix::from_rows(&[vec![f64::NAN]]);
        assert!(matches!(nan, Err(RiskShareError::InvalidCovariance { .. })));
    }

    #[test]
    fn test_mul_vector() {
        let cov = two_asset();
        let m = cov.mul_vector(&[0.6, 0.4]).unwrap();
        assert_relative_eq!(m[0], 14.8 / 30_000.0, epsilon = 1e-15);
        assert_relative_eq!(m[1], 7.9 / 30_000.0, epsilon = 1e-15);
        assert!(cov.mul_vector(&[1.0]).is_err());
    }

    #[test]
    fn test_serde_rows() {
        let cov = two_asset();
        let json = serde_json::to_string(&cov).unwrap();
        let back: CovarianceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(cov, back);
    }
}
