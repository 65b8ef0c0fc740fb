use core_syntax::{refresh_all, scan_row, select};
use core_text::Document;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_scan_row(c: &mut Criterion) {
    let profile = select("bench.c").expect("C profile");
    let line = "static int count = 42; /* running total */ if (count > 9000) return \"overflow\"; // unlikely";
    c.bench_function("scan_row_mixed_line", |b| {
        b.iter(|| scan_row(black_box(line), false, profile))
    });
}

fn bench_refresh_all(c: &mut Criterion) {
    let profile = select("bench.c").expect("C profile");
    let lines: Vec<String> = (0..512)
        .map(|i| format!("int value_{i} = {i}; // line {i}"))
        .collect();
    c.bench_function("refresh_all_512_rows", |b| {
        b.iter_batched(
            || Document::from_lines(lines.clone()),
            |mut doc| refresh_all(&mut doc, Some(profile)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_scan_row, bench_refresh_all);
criterion_main!(benches);
