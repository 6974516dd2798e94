//! Benchmarks for message splitting and evaluation.
//!
//! Run with: cargo bench -p ledgerbot-expr

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledgerbot_expr::{split_expression, DecimalEvaluator, Evaluator};

const SHORT: &str = "(100 * 78.5)*50%/(10-5.3) blah";

fn long_message() -> String {
    format!("{}tail", "(1+2*3-4/5)^2*50%% + ".repeat(200))
}

fn bench_split(c: &mut Criterion) {
    let long = long_message();
    let mut group = c.benchmark_group("split");

    group.bench_function("short", |b| {
        b.iter(|| split_expression(black_box(SHORT)));
    });
    group.bench_function("long", |b| {
        b.iter(|| split_expression(black_box(&long)));
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let expression = split_expression(SHORT)
        .map(|s| s.expression)
        .unwrap_or_default();

    c.bench_function("evaluate_short", |b| {
        b.iter(|| DecimalEvaluator.evaluate(black_box(&expression)));
    });
}

criterion_group!(benches, bench_split, bench_evaluate);
criterion_main!(benches);
