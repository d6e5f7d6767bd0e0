use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use empirical_inference::{CoinTest, DiffMeansPermute, ResamplingTest};
use rand::prelude::*;
use rand_distr::Normal;

/// Generate normal data
fn generate_normal_data(size: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..size).map(|_| normal.sample(&mut rng)).collect()
}

fn bench_coin(c: &mut Criterion) {
    let mut group = c.benchmark_group("CoinTest");

    for &iters in &[100, 1_000] {
        group.bench_with_input(BenchmarkId::new("p_value", iters), &iters, |b, &iters| {
            let mut rng = StdRng::seed_from_u64(42);
            let mut test = ResamplingTest::new(CoinTest::new(), (140, 110)).unwrap();
            b.iter(|| test.p_value(black_box(iters), &mut rng).unwrap())
        });
    }

    group.finish();
}

fn bench_diff_means(c: &mut Criterion) {
    let mut group = c.benchmark_group("DiffMeansPermute");

    for &size in &[50, 500] {
        let data = (
            generate_normal_data(size, 100.0, 15.0, 42),
            generate_normal_data(size, 105.0, 15.0, 43),
        );
        group.bench_with_input(BenchmarkId::new("p_value", size), &data, |b, data| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut test = ResamplingTest::new(DiffMeansPermute::new(), data.clone()).unwrap();
            b.iter(|| test.p_value(1_000, &mut rng).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_coin, bench_diff_means);
criterion_main!(benches);
