use appraisal_engine::analysis::evaluation::AppraisalEngine;
use appraisal_engine::core::scenario::{PriceAxis, PriceScenario};
use appraisal_engine::fixtures::{generate_random_catalog, CatalogConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

fn bench_evaluate_10_options(c: &mut Criterion) {
    let config = CatalogConfig {
        option_count: 10,
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config);
    let engine = AppraisalEngine::default();
    let scenario = PriceScenario::new(dec!(0.10), dec!(0.05));

    c.bench_function("evaluate_10_options", |b| {
        b.iter(|| engine.evaluate(black_box(&catalog), black_box(&scenario)))
    });
}

fn bench_evaluate_100_options(c: &mut Criterion) {
    let config = CatalogConfig {
        option_count: 100,
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config);
    let engine = AppraisalEngine::default();
    let scenario = PriceScenario::new(dec!(0.10), dec!(0.05));

    c.bench_function("evaluate_100_options", |b| {
        b.iter(|| engine.evaluate(black_box(&catalog), black_box(&scenario)))
    });
}

fn bench_evaluate_1000_options(c: &mut Criterion) {
    let config = CatalogConfig {
        option_count: 1000,
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config);
    let engine = AppraisalEngine::default();
    let scenario = PriceScenario::new(dec!(0.10), dec!(0.05));

    c.bench_function("evaluate_1000_options", |b| {
        b.iter(|| engine.evaluate(black_box(&catalog), black_box(&scenario)))
    });
}

fn bench_electricity_sweep_100_options(c: &mut Criterion) {
    let config = CatalogConfig {
        option_count: 100,
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config);
    let engine = AppraisalEngine::default();
    let samples = engine
        .bounds()
        .range(PriceAxis::Electricity)
        .sample_points(26);

    c.bench_function("electricity_sweep_100_options", |b| {
        b.iter(|| {
            engine.sweep(
                black_box(&catalog),
                PriceAxis::Electricity,
                black_box(&samples),
                dec!(0.05),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate_10_options,
    bench_evaluate_100_options,
    bench_evaluate_1000_options,
    bench_electricity_sweep_100_options
);
criterion_main!(benches);
