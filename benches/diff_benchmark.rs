//! Performance benchmarks for SheetSync
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sheetsync::config::SyncConfig;
use sheetsync::source::{MemorySource, Row};
use sheetsync::sync::{new_rows, SyncEngine};
use tempfile::TempDir;

/// A table of `count` rows with `width` cells each
fn make_table(count: usize, width: usize, offset: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            (0..width)
                .map(|c| format!("r{}c{}", i + offset, c))
                .collect()
        })
        .collect()
}

fn bench_new_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("new_rows");

    for size in [1_000usize, 10_000, 50_000].iter() {
        let previous = make_table(*size, 10, 0);
        // 10% of rows are new, the rest shifted in position
        let mut current = make_table(*size, 10, *size / 10);
        current.reverse();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(new_rows(black_box(&previous), black_box(&current))));
        });
    }

    group.finish();
}

fn bench_sync_cycle(c: &mut Criterion) {
    c.bench_function("sync_cycle_5000_rows", |b| {
        b.iter_with_setup(
            || {
                let dir = TempDir::new().unwrap();
                let source = MemorySource::new().with_table("Sheet1", make_table(5_000, 8, 0));
                let engine = SyncEngine::new(SyncConfig::with_output_dir(dir.path()), source);
                (dir, engine)
            },
            |(_dir, engine)| {
                black_box(engine.run().unwrap());
            },
        );
    });
}

criterion_group!(benches, bench_new_rows, bench_sync_cycle);
criterion_main!(benches);
