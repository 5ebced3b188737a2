use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bandscore_core::band::to_band;
use bandscore_core::matcher::matches;
use bandscore_core::model::{AnswerSpec, Skill};
use bandscore_core::parser::parse_answer_key_str;
use bandscore_core::scorer::score;
use bandscore_core::sheet::AnswerSheet;

const READING_KEY: &str = include_str!("../../../answer-keys/book17-reading-test1.toml");

fn full_sheet() -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    for i in 1..=40 {
        sheet.record(i.to_string(), "B");
    }
    sheet.record("2", "Passageway");
    sheet.record("8", "true");
    sheet
}

fn bench_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("matches");

    let literal = AnswerSpec::Literal("corridor/passageway".into());
    group.bench_function("literal_alternatives", |b| {
        b.iter(|| matches(black_box("  Passage-Way. "), black_box(&literal)))
    });

    let choice = AnswerSpec::Choice("C".into());
    group.bench_function("choice", |b| {
        b.iter(|| matches(black_box(" c "), black_box(&choice)))
    });

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let key = parse_answer_key_str(READING_KEY, Path::new("bench.toml")).unwrap();

    group.bench_function("empty_sheet", |b| {
        let sheet = AnswerSheet::new();
        b.iter(|| score(black_box(&sheet), black_box(&key)))
    });

    group.bench_function("full_sheet", |b| {
        let sheet = full_sheet();
        b.iter(|| score(black_box(&sheet), black_box(&key)))
    });

    group.finish();
}

fn bench_to_band(c: &mut Criterion) {
    c.bench_function("to_band_all_counts", |b| {
        b.iter(|| {
            (0..=40)
                .map(|raw| to_band(black_box(raw), Skill::Reading))
                .max()
        })
    });
}

criterion_group!(benches, bench_matches, bench_score, bench_to_band);
criterion_main!(benches);
