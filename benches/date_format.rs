//! Benchmarks for due date formatting.
//!
//! The crate is a binary, so these exercise the same `chrono` format string
//! the task rows use rather than calling into the crate.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const DATE_FORMAT: &str = "%d-%m-%Y";

fn bench_format_single(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap_or_default();
    c.bench_function("format_date_single", |b| {
        b.iter(|| black_box(date).format(DATE_FORMAT).to_string())
    });
}

fn bench_format_year(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    c.bench_function("format_date_366_days", |b| {
        b.iter(|| {
            (0..366)
                .filter_map(|offset| start.checked_add_days(Days::new(offset)))
                .map(|date| date.format(DATE_FORMAT).to_string())
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(benches, bench_format_single, bench_format_year);
criterion_main!(benches);
