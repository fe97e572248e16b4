//! Property-based tests for return and covariance invariants.
//!
//! These tests verify properties that must hold for any valid input:
//! - Return series are exactly one shorter than their price series
//! - Covariance matrices are exactly symmetric with a non-negative diagonal
//! - The diagonal matches the per-series sample variance
//! - Parallel and sequential estimation agree bit for bit

use proptest::prelude::*;
use riskshare_math::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Deterministic pseudo-random mixing of a seed and an index.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut h = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(i);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h
}

/// Generates a positive price path of length `len` as a random walk.
fn generate_prices(len: usize, seed: u64) -> Vec<f64> {
    let mut price = 50.0 + (simple_hash(seed, 0) % 100) as f64;
    let mut out = Vec::with_capacity(len);
    for t in 0..len {
        // Daily moves between -3% and +3%
        let step = (simple_hash(seed, t as u64 + 1) % 601) as f64 / 10_000.0 - 0.03;
        price *= 1.0 + step;
        out.push(price);
    }
    out
}

/// Generates `n` aligned return series of `t` observations each.
fn generate_returns(n: usize, t: usize, seed: u64) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| compute_returns(&generate_prices(t + 1, seed ^ ((i as u64) << 8))).unwrap())
        .collect()
}

// =============================================================================
// RETURN PROPERTIES
// =============================================================================

#[test]
fn test_return_length_is_price_length_minus_one() {
    for seed in 0..25 {
        for len in [2, 3, 10, 253] {
            let prices = generate_prices(len, seed);
            let simple = compute_returns(&prices).unwrap();
            let log = compute_log_returns(&prices).unwrap();
            assert_eq!(simple.len(), len - 1);
            assert_eq!(log.len(), len - 1);
        }
    }
}

#[test]
fn test_compounded_returns_recover_final_price() {
    for seed in 0..25 {
        let prices = generate_prices(60, seed);
        let returns = compute_returns(&prices).unwrap();
        let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
        let expected = prices[prices.len() - 1] / prices[0];
        assert!(
            (growth - expected).abs() < 1e-9 * expected,
            "seed {}: {} vs {}",
            seed,
            growth,
            expected
        );
    }
}

// =============================================================================
// COVARIANCE PROPERTIES
// =============================================================================

#[test]
fn test_covariance_exactly_symmetric() {
    for seed in 0..20 {
        let n = 2 + (seed as usize % 9);
        let series = generate_returns(n, 40, seed);
        let cov = compute_covariance(&series).unwrap();

        for i in 0..n {
            assert!(cov.get(i, i) >= 0.0);
            for j in 0..n {
                assert_eq!(
                    cov.get(i, j).to_bits(),
                    cov.get(j, i).to_bits(),
                    "seed {} cell ({}, {})",
                    seed,
                    i,
                    j
                );
            }
        }
    }
}

#[test]
fn test_diagonal_matches_sample_variance() {
    for seed in 0..20 {
        let series = generate_returns(5, 30, seed);
        let cov = compute_covariance(&series).unwrap();
        for (i, s) in series.iter().enumerate() {
            assert_eq!(cov.get(i, i), sample_variance(s).unwrap());
        }
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let series = generate_returns(30, 120, 7);
    let sequential = compute_covariance_with(&series, &ComputeConfig::sequential()).unwrap();
    let parallel = compute_covariance_with(&series, &ComputeConfig::new().with_threshold(1)).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_correlation_bounded() {
    for seed in 0..10 {
        let cov = compute_covariance(&generate_returns(6, 50, seed)).unwrap();
        let corr = cov.correlation();
        for value in corr.iter() {
            assert!((-1.0..=1.0).contains(value));
        }
        for i in 0..6 {
            assert_eq!(corr[(i, i)], 1.0);
        }
    }
}

// =============================================================================
// RANDOMIZED PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_returns_finite_for_positive_prices(
        prices in prop::collection::vec(0.01f64..10_000.0, 2..64)
    ) {
        let returns = compute_returns(&prices).unwrap();
        prop_assert_eq!(returns.len(), prices.len() - 1);
        prop_assert!(returns.iter().all(|r| r.is_finite() && *r > -1.0));
    }

    #[test]
    fn prop_covariance_psd_quadratic_form(
        seed in 0u64..10_000,
        weights in prop::collection::vec(-2.0f64..2.0, 4)
    ) {
        let cov = compute_covariance(&generate_returns(4, 25, seed)).unwrap();
        let m = cov.mul_vector(&weights).unwrap();
        let quad: f64 = weights.iter().zip(&m).map(|(w, x)| w * x).sum();
        prop_assert!(quad >= -1e-15);
    }
}
