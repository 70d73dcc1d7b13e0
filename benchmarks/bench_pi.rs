use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use loglab::PiEstimator;

const SAMPLES: u64 = 1_000_000;

fn bench_serial(c: &mut Criterion) {
    let estimator = PiEstimator::new();
    let mut group = c.benchmark_group("pi");
    group.sample_size(20);
    group.bench_function("serial", |b| {
        b.iter(|| {
            black_box(estimator.estimate(black_box(SAMPLES)).unwrap());
        });
    });
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("pi_parallel");
    group.sample_size(20);
    let mut worker_counts = vec![1usize, 2, 4, num_cpus::get()];
    worker_counts.sort_unstable();
    worker_counts.dedup();

    for workers in worker_counts {
        let estimator = PiEstimator::new().with_workers(workers);
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| {
                black_box(estimator.estimate_parallel(black_box(SAMPLES)).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(pi_benches, bench_serial, bench_parallel);
criterion_main!(pi_benches);
