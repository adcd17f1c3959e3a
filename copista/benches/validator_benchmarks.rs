use std::hint::black_box;

use copista::TypedBuffer;
use copista::validator::{Key, validate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// A code-like reference text of roughly `len` characters
fn reference_text(len: usize) -> Vec<char> {
    "fn main() {\n    println!(\"hello\");\n}\n"
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn benchmark_prefix_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator_prefix_scan");

    for len in [100, 1000, 10000] {
        let reference = reference_text(len);
        // Worst case: the whole buffer matches, so the scan never exits early
        let typed = TypedBuffer::from_chars(&reference[..len - 1]);

        group.bench_with_input(BenchmarkId::new("char", len), &len, |b, _| {
            b.iter(|| validate(black_box(Key::Char('x')), black_box(&typed), black_box(&reference)))
        });

        group.bench_with_input(BenchmarkId::new("enter", len), &len, |b, _| {
            b.iter(|| validate(black_box(Key::Enter), black_box(&typed), black_box(&reference)))
        });
    }

    group.finish();
}

fn benchmark_full_transcription(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator_full_transcription");

    for len in [100, 1000] {
        let reference = reference_text(len);

        group.bench_with_input(BenchmarkId::new("keystrokes", len), &len, |b, _| {
            b.iter(|| {
                let mut typed = TypedBuffer::new();
                for char in &reference {
                    let key = if *char == '\n' { Key::Enter } else { Key::Char(*char) };
                    black_box(validate(key, &typed, &reference));
                    typed.insert(&char.to_string());
                }
                black_box(typed)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_prefix_scan, benchmark_full_transcription);
criterion_main!(benches);
