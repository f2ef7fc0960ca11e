use cgrowth_confidence::{
    BootstrapEngine, ConfidenceIntervalReducer, PercentileInterval, variance_difference,
};
use cgrowth_core::{draw_gamma, ExecutionStrategy};
use cgrowth_likelihood::LikelihoodModel;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

/// Generate Gamma(5, 5) arrival times
fn generate_gamma_data(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    draw_gamma(5.0, 5.0, size, &mut rng).unwrap()
}

fn bench_bootstrap_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("BootstrapMean");

    for size in [50, 500, 5000] {
        let data = generate_gamma_data(size, 42);
        let engine = BootstrapEngine::default().with_replicates(1000).with_seed(42);

        group.bench_with_input(BenchmarkId::new("sequential", size), &data, |b, data| {
            b.iter(|| engine.replicate_mean(black_box(data)))
        });

        let parallel = engine.clone().with_strategy(ExecutionStrategy::Parallel);
        group.bench_with_input(BenchmarkId::new("parallel", size), &data, |b, data| {
            b.iter(|| parallel.replicate_mean(black_box(data)))
        });
    }

    group.finish();
}

fn bench_bootstrap_mle(c: &mut Criterion) {
    let mut group = c.benchmark_group("BootstrapMLE");
    group.sample_size(10);

    let data = generate_gamma_data(500, 7);
    let model = LikelihoodModel::Gamma;
    let init = model.default_init();

    for strategy in [ExecutionStrategy::Sequential, ExecutionStrategy::Parallel] {
        let engine = BootstrapEngine::default()
            .with_replicates(100)
            .with_seed(7)
            .with_strategy(strategy);

        group.bench_function(format!("{strategy:?}"), |b| {
            b.iter(|| engine.replicate_mle(black_box(&data), model, &init))
        });
    }

    group.finish();
}

fn bench_permutation(c: &mut Criterion) {
    let x = generate_gamma_data(200, 1);
    let y = generate_gamma_data(200, 2);
    let engine = BootstrapEngine::default().with_replicates(1000).with_seed(3);

    c.bench_function("permutation_variance_difference", |b| {
        b.iter(|| engine.replicate_permutation_statistic(black_box(&x), black_box(&y), variance_difference))
    });
}

fn bench_percentile(c: &mut Criterion) {
    let replicates = generate_gamma_data(10_000, 9);
    let reducer = PercentileInterval::default();

    c.bench_function("percentile_interval_10000", |b| {
        b.iter(|| reducer.reduce(black_box(&replicates)))
    });
}

criterion_group!(
    benches,
    bench_bootstrap_mean,
    bench_bootstrap_mle,
    bench_permutation,
    bench_percentile
);
criterion_main!(benches);
