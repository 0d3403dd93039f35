#[macro_use]
extern crate criterion;
extern crate mandelpool;

use criterion::Criterion;
use mandelpool::{Renderer, Strategy};

const WIDTH: usize = 160;
const HEIGHT: usize = 120;
const WORKERS: usize = 4;

fn bench_strategy(c: &mut Criterion, label: &'static str, strategy: Strategy) {
    let renderer = Renderer::standard(WIDTH, HEIGHT, 500).unwrap();
    c.bench_function(label, move |b| b.iter(|| renderer.generate(strategy).unwrap()));
}

fn sequential(c: &mut Criterion) {
    bench_strategy(c, "sequential", Strategy::Sequential);
}

fn per_row(c: &mut Criterion) {
    bench_strategy(c, "row", Strategy::PerRow);
}

fn counter(c: &mut Criterion) {
    bench_strategy(c, "counter", Strategy::Counter { workers: WORKERS });
}

fn pooled(c: &mut Criterion) {
    bench_strategy(c, "pool-row", Strategy::PooledRows { workers: WORKERS });
    bench_strategy(c, "pool-chunk-16", Strategy::PooledChunks { workers: WORKERS, chunk: 16 });
    bench_strategy(c, "pool-chunk-256", Strategy::PooledChunks { workers: WORKERS, chunk: 256 });
    bench_strategy(c, "pool-cell", Strategy::PooledCells { workers: WORKERS });
}

criterion_group!(benches, sequential, per_row, counter, pooled);
criterion_main!(benches);
