//! Date normalisation throughput benchmarks.
//!
//! Every record in a dataset passes through the normaliser once at load time,
//! so load latency for large files is dominated by these paths.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `record` | One record with numeric, text, 2-digit-year and 12-hour fields |
//! | `dataset` | `normalize_all` over generated datasets of increasing size |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use battlemap_core::{EventRecord, RawField, normalizer};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn record(i: usize) -> EventRecord {
    EventRecord {
        battle_name: format!("Battle {}", i % 5),
        route_id: (i % 40) as i64,
        year: if i % 3 == 0 {
            RawField::Text(format!("{}", 1800 + i % 200))
        } else {
            RawField::Number((i % 100) as i64)
        },
        month: RawField::from(MONTHS[i % 12]),
        day: RawField::Number((i % 28 + 1) as i64),
        time: RawField::Text(format!("{:02}:{:02}:00", i % 24, i % 60)),
        latitude: (i % 90) as f64,
        longitude: -((i % 180) as f64),
        key_event_notes: format!("note {}", i % 17),
    }
}

// ---------------------------------------------------------------------------
// Single record
// ---------------------------------------------------------------------------

fn record_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    group.throughput(Throughput::Elements(1));

    let numeric = record(1);
    let text = record(3);
    let mut twelve_hour = record(1);
    twelve_hour.time = RawField::from("3:15 PM");
    let mut bad_month = record(1);
    bad_month.month = RawField::from("Julyy");

    for (name, rec) in [
        ("numeric", &numeric),
        ("text_year", &text),
        ("twelve_hour", &twelve_hour),
        ("bad_month", &bad_month),
    ] {
        group.bench_with_input(BenchmarkId::new(name, ""), rec, |b, rec| {
            b.iter(|| normalizer::normalize_record(black_box(rec)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Whole dataset
// ---------------------------------------------------------------------------

fn dataset_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset");

    for size in [100usize, 1_000, 10_000] {
        let records: Vec<EventRecord> = (0..size).map(record).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| normalizer::normalize_all(black_box(records.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, record_bench, dataset_bench);
criterion_main!(benches);
