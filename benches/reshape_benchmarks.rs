//! Reshape and axis-range benchmarks
//!
//! Toyota Way: Genchi Genbutsu (measure, don't guess)
//!
//! The melt and axis paths run once per plot render; these benchmarks keep
//! them honest as featureset/learner grids grow.
//!
//! Run with: cargo bench --bench reshape_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resumen::curve::axis::AxisRangeCalculator;
use resumen::curve::reshape::LongFormReshaper;
use resumen::curve::{CurvePoint, CurveTable};

const SIZES: [usize; 2] = [1_000, 50_000];

#[allow(clippy::cast_precision_loss)]
fn synthetic_table(num_points: usize) -> CurveTable {
    let metrics = ["f1", "accuracy", "pearson"];
    let points = (0..num_points)
        .map(|i| CurvePoint {
            featureset_name: format!("fs_{}", i % 8),
            learner_name: format!("learner_{}", i % 4),
            metric: metrics[i % metrics.len()].to_string(),
            train_set_name: "train".to_string(),
            training_set_size: 100 * (i as u64 % 10 + 1),
            train_score_mean: (i % 100) as f64 / 100.0,
            test_score_mean: (i % 90) as f64 / 100.0,
            fit_time_mean: (i % 50) as f64 / 10.0,
            train_score_std: 0.05,
            test_score_std: 0.04,
            fit_time_std: 0.01,
            backend_version: None,
            version: None,
        })
        .collect();
    CurveTable::from_points(points)
}

fn bench_melt_scores(c: &mut Criterion) {
    let mut group = c.benchmark_group("melt_scores");
    for size in SIZES {
        let table = synthetic_table(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| LongFormReshaper::new().melt_scores(black_box(table)));
        });
    }
    group.finish();
}

fn bench_melt_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("melt_times");
    for size in SIZES {
        let table = synthetic_table(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| LongFormReshaper::new().melt_times(black_box(table)));
        });
    }
    group.finish();
}

fn bench_axis_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis_ranges");
    for size in SIZES {
        let table = synthetic_table(size);
        let frame = LongFormReshaper::new().melt_scores(&table);
        let metrics = frame.metric_levels().to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| {
                AxisRangeCalculator::new()
                    .compute(black_box(frame), &metrics)
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_melt_scores, bench_melt_times, bench_axis_ranges);
criterion_main!(benches);
