// Performance benchmarks for prediction, MSE evaluation and k sweeps
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knnreg_core::{predict, Evaluator, EvaluatorConfig, NeighborTracker, Table};
use rand::prelude::*;
use rand::rngs::StdRng;

const COLUMNS: usize = 8;

fn generate_random_table(rows: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = Table::new();
    for _ in 0..rows {
        let row: Vec<f32> = (0..COLUMNS).map(|_| rng.random_range(-1.0f32..1.0f32)).collect();
        table.append(&row).unwrap();
    }
    table
}

fn benchmark_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker");
    let mut rng = StdRng::seed_from_u64(1);
    let distances: Vec<f32> = (0..10_000).map(|_| rng.random::<f32>()).collect();

    for k in [1, 5, 25, 100].iter() {
        group.bench_with_input(BenchmarkId::new("offer", k), k, |b, &k| {
            b.iter(|| {
                let mut tracker = NeighborTracker::new(k).unwrap();
                for (id, &d) in distances.iter().enumerate() {
                    tracker.offer(id, d);
                }
                black_box(tracker.selected());
            });
        });
    }

    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    let test = generate_random_table(16, 2);

    for size in [100, 1000, 10000].iter() {
        let train = generate_random_table(*size, 3);
        group.bench_with_input(BenchmarkId::new("single_row", size), size, |b, _| {
            b.iter(|| {
                let value = predict(black_box(&train), &test, 0, 5, COLUMNS - 1).unwrap();
                black_box(value);
            });
        });
    }

    group.finish();
}

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    group.sample_size(20);

    let train = generate_random_table(2000, 4);
    let test = generate_random_table(200, 5);

    for parallel in [false, true] {
        let evaluator = Evaluator::new(EvaluatorConfig {
            response_index: COLUMNS - 1,
            parallel,
            ..Default::default()
        });
        let label = if parallel { "parallel" } else { "sequential" };

        group.bench_function(BenchmarkId::new("mse", label), |b| {
            b.iter(|| {
                let mse = evaluator.mean_squared_error(5, &train, &test).unwrap();
                black_box(mse);
            });
        });

        group.bench_function(BenchmarkId::new("sweep_2_10", label), |b| {
            b.iter(|| {
                let search = evaluator.search_best_k(2, 10, &train, &test).unwrap();
                black_box(search.best_k);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_tracker, benchmark_predict, benchmark_evaluate);
criterion_main!(benches);
