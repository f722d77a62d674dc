//! Benchmarks for layout reconstruction and TSV parsing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ocr_indent::engine::tesseract::parse_tsv;
use ocr_indent::geometry::BoundingBox;
use ocr_indent::layout::reconstruct;
use ocr_indent::recognition::{Block, Line, Paragraph, RecognitionResult};

const HEADER: &str =
    "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

/// A code listing of `lines` lines, indented in steps of four columns.
fn code_listing(lines: usize) -> RecognitionResult {
    let lines = (0..lines)
        .map(|i| {
            let depth = (i % 4) as f64;
            let x0 = depth * 40.0;
            let y0 = i as f64 * 14.0;
            Line::new("let value = compute(x);\n", BoundingBox::new(x0, y0, x0 + 200.0, y0 + 12.0))
        })
        .collect();
    RecognitionResult {
        blocks: vec![Block {
            paragraphs: vec![Paragraph { lines }],
        }],
    }
}

fn tsv_report(lines: usize) -> String {
    let mut out = String::from(HEADER);
    out.push_str("\n2\t1\t1\t0\t0\t0\t0\t0\t800\t600\t-1\t");
    out.push_str("\n3\t1\t1\t1\t0\t0\t0\t0\t800\t600\t-1\t");
    for i in 0..lines {
        let top = i * 14;
        let left = (i % 4) * 40;
        out.push_str(&format!("\n4\t1\t1\t1\t{}\t0\t{}\t{}\t200\t12\t-1\t", i + 1, left, top));
        out.push_str(&format!("\n5\t1\t1\t1\t{}\t1\t{}\t{}\t30\t12\t95\tlet", i + 1, left, top));
        out.push_str(&format!("\n5\t1\t1\t1\t{}\t2\t{}\t{}\t50\t12\t95\tvalue", i + 1, left + 40, top));
        out.push_str(&format!("\n5\t1\t1\t1\t{}\t3\t{}\t{}\t110\t12\t95\tcompute(x);", i + 1, left + 100, top));
    }
    out.push('\n');
    out
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");
    for lines in [10, 100, 1000] {
        let result = code_listing(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &result, |b, result| {
            b.iter(|| reconstruct(black_box(result)))
        });
    }
    group.finish();
}

fn bench_parse_tsv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_tsv");
    for lines in [10, 100, 1000] {
        let report = tsv_report(lines);
        group.bench_with_input(BenchmarkId::new("preserve_spaces", lines), &report, |b, report| {
            b.iter(|| parse_tsv(black_box(report), true))
        });
        group.bench_with_input(BenchmarkId::new("single_spaces", lines), &report, |b, report| {
            b.iter(|| parse_tsv(black_box(report), false))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconstruct, bench_parse_tsv);
criterion_main!(benches);
