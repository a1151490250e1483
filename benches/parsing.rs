//! Benchmarks for markdown rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markedly::document::{DEFAULT_WIDTH, render};

fn bench_render_simple(c: &mut Criterion) {
    let md = "# Hello\n\nWorld";
    c.bench_function("render_simple", |b| {
        b.iter(|| render(black_box(md), DEFAULT_WIDTH))
    });
}

fn bench_render_medium(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");
    c.bench_function("render_medium", |b| {
        b.iter(|| render(black_box(md), DEFAULT_WIDTH))
    });
}

fn bench_render_narrow(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");
    c.bench_function("render_narrow", |b| b.iter(|| render(black_box(md), 24)));
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_render_medium,
    bench_render_narrow
);
criterion_main!(benches);
