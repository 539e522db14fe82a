//! Benchmarks for index mapping and whole-curve generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hilbertcurve::{Order, generate_curve, index_to_point, path_length, point_to_index};

/// Benchmark single index ↔ point conversions on the largest grid.
fn bench_mapping(c: &mut Criterion) {
    let side = Order::new(Order::MAX).expect("valid order").side();
    let midpoint = side * side / 2;
    let pt = index_to_point(side, midpoint);

    c.bench_function("index_to_point", |b| {
        b.iter(|| index_to_point(black_box(side), black_box(midpoint)))
    });
    c.bench_function("point_to_index", |b| {
        b.iter(|| point_to_index(black_box(side), black_box(pt)))
    });
}

/// Benchmark generating and measuring full curves across orders.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for order in [2, 4, 6, 8] {
        let order = Order::new(order).expect("valid order");
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, &o| {
            b.iter(|| generate_curve(black_box(o)))
        });
    }
    group.finish();

    let curve = generate_curve(Order::new(Order::MAX).expect("valid order"));
    c.bench_function("path_length/8", |b| {
        b.iter(|| path_length(black_box(curve.points())))
    });
}

criterion_group!(benches, bench_mapping, bench_generate);
criterion_main!(benches);
