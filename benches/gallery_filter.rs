//! Benchmarks for gallery file name filtering.
//!
//! Mirrors the case-insensitive extension pattern used when scanning the
//! gallery directory.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex::Regex;

const IMAGE_PATTERN: &str = r"(?i)\.(png|jpe?g|gif|bmp|webp)$";

fn file_names(count: usize) -> Vec<String> {
    let extensions = ["png", "JPG", "jpeg", "txt", "gif", "mov", "webp", "pdf"];
    (0..count)
        .map(|i| format!("IMG_{:04}.{}", i, extensions[i % extensions.len()]))
        .collect()
}

fn bench_filter_names(c: &mut Criterion) {
    let pattern = match Regex::new(IMAGE_PATTERN) {
        Ok(pattern) => pattern,
        Err(_) => return,
    };
    let names = file_names(1000);
    c.bench_function("gallery_filter_1000", |b| {
        b.iter(|| {
            names
                .iter()
                .filter(|name| pattern.is_match(black_box(name)))
                .count()
        })
    });
}

criterion_group!(benches, bench_filter_names);
criterion_main!(benches);
