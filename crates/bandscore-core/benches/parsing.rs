use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bandscore_core::model::LiteralPolicy;
use bandscore_core::normalize::{fold_literal, normalize};
use bandscore_core::parser::{parse_answer_key_str, validate_answer_key};

const READING_KEY: &str = include_str!("../../../answer-keys/book17-reading-test1.toml");
const LISTENING_KEY: &str = include_str!("../../../answer-keys/book17-listening-test1.toml");

fn bench_parse_answer_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_answer_key");

    group.bench_function("reading", |b| {
        b.iter(|| parse_answer_key_str(black_box(READING_KEY), Path::new("reading.toml")))
    });

    group.bench_function("listening", |b| {
        b.iter(|| parse_answer_key_str(black_box(LISTENING_KEY), Path::new("listening.toml")))
    });

    group.bench_function("validate", |b| {
        let key = parse_answer_key_str(READING_KEY, Path::new("reading.toml")).unwrap();
        b.iter(|| validate_answer_key(black_box(&key)))
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let policy = LiteralPolicy::default();

    let short = "  Corridor ";
    let long = "  The   Quick-Brown fox, jumped over\tthe lazy dogs.  ".repeat(20);

    group.bench_function("short", |b| b.iter(|| normalize(black_box(short))));
    group.bench_function("long", |b| b.iter(|| normalize(black_box(&long))));
    group.bench_function("fold_literal_long", |b| {
        b.iter(|| fold_literal(black_box(&long), black_box(&policy)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_answer_key, bench_normalize);
criterion_main!(benches);
