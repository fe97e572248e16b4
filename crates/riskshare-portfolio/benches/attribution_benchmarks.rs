//! Benchmarks for the riskshare attribution pipeline.
//!
//! Run with: cargo bench -p riskshare-portfolio

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use riskshare_core::types::PriceSeries;
use riskshare_core::ComputeConfig;
use riskshare_math::{compute_covariance_with, compute_returns};
use riskshare_portfolio::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_prices(asset: usize, len: usize) -> Vec<f64> {
    let mut price = 50.0 + asset as f64;
    (0..len)
        .map(|t| {
            let step = (((t * 37 + asset * 101) % 41) as f64 - 20.0) / 2_000.0;
            price *= 1.0 + step;
            price
        })
        .collect()
}

fn create_returns(assets: usize, len: usize) -> Vec<Vec<f64>> {
    (0..assets)
        .map(|i| compute_returns(&create_prices(i, len + 1)).unwrap())
        .collect()
}

fn create_request(assets: usize, len: usize) -> RiskAttributionRequest {
    let weight = 1.0 / assets as f64;
    (0..assets).fold(RiskAttributionRequest::new("5y"), |request, i| {
        let prices = PriceSeries::new(create_prices(i, len)).unwrap();
        request.with_asset(format!("ASSET{i:04}"), prices, weight)
    })
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("covariance");

    for assets in [10, 50, 200] {
        let returns = create_returns(assets, 756);
        group.throughput(Throughput::Elements((assets * (assets + 1) / 2) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", assets), &returns, |b, r| {
            let config = ComputeConfig::sequential();
            b.iter(|| compute_covariance_with(black_box(r), &config));
        });

        group.bench_with_input(BenchmarkId::new("parallel", assets), &returns, |b, r| {
            let config = ComputeConfig::new().with_threshold(1);
            b.iter(|| compute_covariance_with(black_box(r), &config));
        });
    }

    group.finish();
}

fn bench_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition");

    for assets in [10, 50, 200] {
        let returns = create_returns(assets, 252);
        let cov = compute_covariance_with(&returns, &ComputeConfig::default()).unwrap();
        let weights = vec![1.0 / assets as f64; assets];

        group.bench_with_input(BenchmarkId::from_parameter(assets), &weights, |b, w| {
            b.iter(|| compute_risk_contributions(black_box(w), &cov));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("attribute_risk");
    group.sample_size(20);

    for assets in [10, 100] {
        let request = create_request(assets, 1500);
        let config = EngineConfig::default();

        group.bench_with_input(BenchmarkId::from_parameter(assets), &request, |b, r| {
            b.iter(|| attribute_risk(black_box(r), &config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_covariance, bench_decomposition, bench_pipeline);
criterion_main!(benches);
