//! Squarified layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marketmap_render::{squarify, Rect};

fn bench_squarify(c: &mut Criterion) {
    // Zipf-ish weights, descending, roughly the shape of an index's
    // market-cap distribution.
    let weights: Vec<f64> = (1..=500).map(|i| 1.0e12 / i as f64).collect();
    let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    c.bench_function("squarify_500_weights", |b| {
        b.iter(|| squarify(black_box(&weights), black_box(bounds)))
    });
}

criterion_group!(benches, bench_squarify);
criterion_main!(benches);
