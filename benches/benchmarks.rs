use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use observable_cell::{Listener, ObservableCell};

fn counting_cell(listener_count: usize) -> (ObservableCell<u64>, Arc<AtomicUsize>) {
    let cell = ObservableCell::new(0);
    let hits = Arc::new(AtomicUsize::new(0));
    for _ in 0..listener_count {
        let hits = hits.clone();
        cell.subscribe(move |_| {
            hits.fetch_add(1, Ordering::Relaxed);
        });
    }
    (cell, hits)
}

fn suppressed_write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("suppressed_write");

    // Equal writes should cost the same no matter how many listeners wait.
    for listener_count in [0usize, 10, 100] {
        let (cell, hits) = counting_cell(listener_count);
        cell.set(7);
        let baseline = hits.load(Ordering::Relaxed);

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            &listener_count,
            |b, _| b.iter(|| cell.set(black_box(7))),
        );
        assert_eq!(hits.load(Ordering::Relaxed), baseline);
    }
    group.finish();
}

fn changed_write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("changed_write");

    for listener_count in [0usize, 10, 100] {
        let (cell, _hits) = counting_cell(listener_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            &listener_count,
            |b, _| {
                let mut next = 0u64;
                b.iter(|| {
                    next = next.wrapping_add(1);
                    cell.set(black_box(next));
                });
            },
        );
    }
    group.finish();
}

fn forced_notify_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("forced_notify");

    for listener_count in [1usize, 10, 100] {
        let (cell, _hits) = counting_cell(listener_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            &listener_count,
            |b, _| b.iter(|| cell.notify()),
        );
    }
    group.finish();
}

fn string_unchanged_write_benchmark(c: &mut Criterion) {
    let cell: ObservableCell<String> = ObservableCell::new("steady".to_string());
    cell.subscribe(|_| unreachable!("equal writes never notify"));

    c.bench_function("string_unchanged_write", |b| {
        b.iter(|| {
            cell.set(black_box("steady".to_string()));
        });
    });
}

fn listener_churn_benchmark(c: &mut Criterion) {
    // Removal scans from the back, so the newest registration is the cheap case.
    let (cell, _hits) = counting_cell(100);
    let listener = Listener::new(|_: &u64| {});

    c.bench_function("listener_add_remove_with_100", |b| {
        b.iter(|| {
            cell.add_listener(listener.clone());
            black_box(cell.remove_listener(&listener));
        });
    });
}

criterion_group!(
    benches,
    suppressed_write_benchmark,
    changed_write_benchmark,
    forced_notify_benchmark,
    string_unchanged_write_benchmark,
    listener_churn_benchmark,
);
criterion_main!(benches);
