//! Benchmarks for markup decoding and wrapping.
//!
//! Run with: cargo bench -p clif-text

use clif_text::{decode, wrap_markup};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

// =============================================================================
// Test Data
// =============================================================================

/// Plain ASCII, the fast path.
fn ascii_text(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

/// Mixed ASCII and CJK without markup.
fn mixed_text(len: usize) -> String {
    "Hello \u{4E16}\u{754C}! Test \u{6D4B}\u{8BD5}. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

/// Text where every other word is a colored span.
fn markup_text(words: usize) -> String {
    (0..words)
        .map(|i| {
            if i % 2 == 0 {
                format!(r#"<cc format="{}">word{i}</cc> "#, 16 + i % 200)
            } else {
                format!("plain{i} ")
            }
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_markup");

    for len in [80, 1_000, 10_000] {
        let ascii = ascii_text(len);
        group.throughput(Throughput::Bytes(ascii.len() as u64));
        group.bench_with_input(BenchmarkId::new("ascii", len), &ascii, |b, text| {
            b.iter(|| wrap_markup(black_box(text), 76));
        });

        let mixed = mixed_text(len);
        group.throughput(Throughput::Bytes(mixed.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", len), &mixed, |b, text| {
            b.iter(|| wrap_markup(black_box(text), 76));
        });
    }

    for words in [10, 100, 1_000] {
        let markup = markup_text(words);
        group.throughput(Throughput::Bytes(markup.len() as u64));
        group.bench_with_input(BenchmarkId::new("markup", words), &markup, |b, text| {
            b.iter(|| wrap_markup(black_box(text), 36));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for words in [10, 100, 1_000] {
        let markup = markup_text(words);
        group.throughput(Throughput::Bytes(markup.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &markup, |b, text| {
            b.iter(|| decode(black_box(text), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrap, bench_decode);
criterion_main!(benches);
