//! Property-based tests for risk decomposition invariants.
//!
//! These tests verify key mathematical properties that should always hold:
//! - Absolute contributions sum to portfolio volatility (Euler identity)
//! - Percentage contributions sum to 100
//! - Scaling all weights leaves percentages unchanged
//! - Degenerate portfolios never produce NaN

use proptest::prelude::*;
use riskshare_math::{compute_covariance, CovarianceMatrix};
use riskshare_portfolio::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut h = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(i);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}

/// Covariance of `n` synthetic return series with a common factor.
fn generate_covariance(n: usize, seed: u64) -> CovarianceMatrix {
    let t = 60;
    let factor: Vec<f64> = (0..t)
        .map(|k| (simple_hash(seed, k) % 401) as f64 / 10_000.0 - 0.02)
        .collect();
    let series: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let beta = 0.2 + (simple_hash(seed ^ 0xbeef, i as u64) % 150) as f64 / 100.0;
            (0..t)
                .map(|k| {
                    let idio = (simple_hash(seed + 1 + i as u64, k) % 201) as f64 / 10_000.0 - 0.01;
                    beta * factor[k as usize] + idio
                })
                .collect()
        })
        .collect();
    compute_covariance(&series).unwrap()
}

/// Long-only weights summing to one.
fn generate_weights(n: usize, seed: u64) -> Vec<f64> {
    let raw: Vec<f64> = (0..n)
        .map(|i| 1.0 + (simple_hash(seed, 100 + i as u64) % 1000) as f64)
        .collect();
    let total: f64 = raw.iter().sum();
    raw.iter().map(|w| w / total).collect()
}

// =============================================================================
// EULER IDENTITY
// =============================================================================

#[test]
fn test_percentages_sum_to_100_long_only() {
    for seed in 0..50 {
        let n = 1 + (seed as usize % 15);
        let cov = generate_covariance(n, seed);
        let rc = compute_risk_contributions(&generate_weights(n, seed), &cov).unwrap();

        assert!(!rc.degenerate);
        assert!(
            (rc.percentage_sum() - 100.0).abs() < 1e-6 * n as f64,
            "seed {}: sum {}",
            seed,
            rc.percentage_sum()
        );
        assert!(rc.euler_residual() < 1e-12 * rc.portfolio_volatility.max(1.0));
    }
}

#[test]
fn test_percentages_invariant_to_weight_scale() {
    let config = DecompositionConfig::new().with_weight_scale(WeightScale::Fraction);
    for seed in 0..20 {
        let cov = generate_covariance(5, seed);
        let w = generate_weights(5, seed);
        let doubled: Vec<f64> = w.iter().map(|x| 2.0 * x).collect();

        let base = compute_risk_contributions_with(&w, &cov, &config).unwrap();
        let scaled = compute_risk_contributions_with(&doubled, &cov, &config).unwrap();

        for (a, b) in base.percentages.iter().zip(&scaled.percentages) {
            assert!((a - b).abs() < 1e-9);
        }
        assert!((scaled.portfolio_volatility - 2.0 * base.portfolio_volatility).abs() < 1e-15);
    }
}

// =============================================================================
// RANDOMIZED PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_euler_identity_long_short(
        seed in 0u64..5_000,
        weights in prop::collection::vec(-1.0f64..1.0, 2..12)
    ) {
        let cov = generate_covariance(weights.len(), seed);
        let config = DecompositionConfig::new().with_weight_scale(WeightScale::Fraction);
        let rc = compute_risk_contributions_with(&weights, &cov, &config).unwrap();

        prop_assert!(rc.percentages.iter().all(|p| p.is_finite()));
        if !rc.degenerate {
            let tol = 1e-9 * rc.portfolio_volatility.max(1e-12);
            prop_assert!(rc.euler_residual() <= tol.max(1e-15));
            // Percentage sum drifts only when σ_p is tiny relative to the weights
            if rc.portfolio_volatility > 1e-6 {
                prop_assert!((rc.percentage_sum() - 100.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn prop_zero_covariance_never_nan(
        weights in prop::collection::vec(-5.0f64..5.0, 1..8)
    ) {
        let n = weights.len();
        let rows = vec![vec![0.0; n]; n];
        let cov = CovarianceMatrix::from_rows(&rows).unwrap();
        let rc = compute_risk_contributions(&weights, &cov).unwrap();

        prop_assert!(rc.degenerate);
        prop_assert_eq!(rc.portfolio_volatility, 0.0);
        prop_assert!(rc.absolute.iter().all(|c| *c == 0.0));
        prop_assert!(rc.percentages.iter().all(|p| p.is_finite()));
    }
}
