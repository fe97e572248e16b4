//! Descriptive statistics kernels.
//!
//! These are the sequential building blocks of the covariance estimator.
//! Each kernel reads its inputs in index order so that a given call always
//! produces the same bits regardless of which thread runs it.

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of centred cross products, `Σ_t (x[t] - mean_x)(y[t] - mean_y)`.
///
/// The slices must have equal length; the shorter length is used otherwise.
pub fn centered_cross_product(x: &[f64], mean_x: f64, y: &[f64], mean_y: f64) -> f64 {
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum()
}

/// Unbiased sample variance (divisor `n - 1`).
///
/// Returns `None` for fewer than two observations.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    Some(centered_cross_product(values, m, values, m) / (values.len() - 1) as f64)
}

/// Unbiased sample covariance of two equal-length series.
///
/// Returns `None` if lengths differ or fewer than two observations exist.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    Some(centered_cross_product(x, mx, y, my) / (x.len() - 1) as f64)
}

/// Sample standard deviation.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_variance() {
        // Classic textbook example: population variance 4, sample variance 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_variance(&values).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert!(sample_variance(&[1.0]).is_none());
    }

    #[test]
    fn test_constant_series_has_zero_variance() {
        assert_eq!(sample_variance(&[0.01, 0.01, 0.01]).unwrap(), 0.0);
        assert_eq!(sample_std_dev(&[3.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_sample_covariance() {
        let x = [0.01, -0.02, 0.03];
        let y = [0.02, -0.01, 0.01];
        assert_relative_eq!(sample_covariance(&x, &y).unwrap(), 0.000_283_333_333, epsilon = 1e-12);
        assert!(sample_covariance(&x, &y[..2]).is_none());
    }
}
