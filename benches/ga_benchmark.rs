use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use genetic_salesman::ga::Driver;
use genetic_salesman::graph::{Graph, Matrix};
use genetic_salesman::random::RandomProvider;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = Criterion::default()
        .without_plots()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(3));
    targets =
        provider_fill_rate,
        one_generation_on_small_graph,
}

fn provider_fill_rate(c: &mut Criterion) {
    c.bench_function("random provider: pop 256 chunks", |b| {
        b.iter(|| {
            let provider = RandomProvider::new();
            for _ in 0..256 {
                criterion::black_box(provider.pop_random());
            }
        })
    });
}

/// A stagnation threshold of 0 makes `Driver::run` stop after exactly one
/// generation, so this times a single crossover/mutation/selection cycle.
fn one_generation_on_small_graph(c: &mut Criterion) {
    let mut rng = rand::rng();
    let graph = Arc::new(Matrix::generate(24, &mut rng).unwrap()) as Arc<dyn Graph + Send + Sync>;
    c.bench_function("one GA generation, n=24 population=32", |b| {
        b.iter_batched(
            || Driver::new(Arc::clone(&graph), 4, 32, 0),
            |mut driver| criterion::black_box(driver.run()),
            criterion::BatchSize::SmallInput,
        )
    });
}
