//! Benchmarks for markdown conversion.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mdh_converter::convert;

/// Generate a document with the given number of sections.
fn generate_markdown(sections: usize) -> String {
    let mut md = String::with_capacity(sections * 300);
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str(&format!(
            "Paragraph {i} with **bold**, *italic*, `code` and a [link](https://example.com/{i}).\n\n"
        ));
        md.push_str("- first\n- second\n- third\n\n");
        md.push_str("```rust\nfn main() {}\n```\n\n");
    }
    md
}

fn bench_convert_simple(c: &mut Criterion) {
    c.bench_function("convert_simple", |b| {
        b.iter(|| convert("# Hello\n\nSimple **content**."));
    });
}

fn bench_convert_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_sections");
    for sections in [10, 100, 1000] {
        let markdown = generate_markdown(sections);
        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &markdown, |b, md| {
            b.iter(|| convert(md));
        });
    }
    group.finish();
}

fn bench_convert_adversarial(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_adversarial");
    for size in [1_000, 10_000, 100_000] {
        let unclosed = "**a ".repeat(size / 4);
        group.throughput(Throughput::Bytes(unclosed.len() as u64));
        group.bench_with_input(BenchmarkId::new("unclosed_bold", size), &unclosed, |b, md| {
            b.iter(|| convert(md));
        });

        let brackets = "[".repeat(size);
        group.bench_with_input(BenchmarkId::new("open_brackets", size), &brackets, |b, md| {
            b.iter(|| convert(md));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_convert_simple,
    bench_convert_varying_sizes,
    bench_convert_adversarial
);
criterion_main!(benches);
