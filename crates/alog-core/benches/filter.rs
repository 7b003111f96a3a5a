//! Benchmarks for the filter fast path and full log calls.
//!
//! Run with: cargo bench -p alog-core

use alog_core::{FormatterKind, Level, MapData, Registry, Sink};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io;

fn registry() -> Registry {
    let registry = Registry::new();
    registry
        .setup_filters("APP:info,DB:debug2,NET:warning,UI:trace", "error")
        .expect("valid filter string");
    registry
}

fn benchmark_filter(c: &mut Criterion) {
    let registry = registry();

    c.bench_function("filter_override_hit", |b| {
        b.iter(|| registry.filter(black_box("DB"), black_box(Level::Debug)))
    });

    c.bench_function("filter_default_miss", |b| {
        b.iter(|| registry.filter(black_box("OTHER"), black_box(Level::Debug)))
    });
}

fn benchmark_log(c: &mut Criterion) {
    let registry = registry();
    registry.add_sink(Sink::from_writer("sink", io::sink()));

    c.bench_function("log_standard", |b| {
        b.iter(|| registry.log("APP", Level::Info, black_box("hello world"), MapData::new()))
    });

    registry.set_formatter_kind(FormatterKind::Json);
    c.bench_function("log_json", |b| {
        b.iter(|| registry.log("APP", Level::Info, black_box("hello world"), MapData::new()))
    });

    c.bench_function("log_with_disabled", |b| {
        b.iter(|| {
            registry.log_with("APP", Level::Debug, MapData::new(), || {
                format!("expensive {}", black_box(42))
            })
        })
    });
}

criterion_group!(benches, benchmark_filter, benchmark_log);
criterion_main!(benches);
