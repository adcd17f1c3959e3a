use std::hint::black_box;

use copista::render::{render, to_markup};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for len in [100, 1000, 10000] {
        let reference: Vec<char> = "let x = a < b && c > d;\n".chars().cycle().take(len).collect();
        let mut typed = reference[..len / 2].to_vec();
        // Mismatch halfway through the typed text
        typed[len / 4] = '#';

        group.bench_with_input(BenchmarkId::new("tokens", len), &len, |b, _| {
            b.iter(|| render(black_box(&typed), black_box(&reference), black_box(true)))
        });

        let tokens = render(&typed, &reference, true);
        group.bench_with_input(BenchmarkId::new("markup", len), &len, |b, _| {
            b.iter(|| to_markup(black_box(&tokens)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_render);
criterion_main!(benches);
