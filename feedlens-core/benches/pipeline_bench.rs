//! Criterion benchmarks for the result pipeline.
//!
//! Benchmarks:
//! 1. Import normalization (multi-line text, single-record CSV)
//! 2. Adapter builds (sentiment, themes, words)
//! 3. Full dashboard fan-out through the registry

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use feedlens_core::adapters::{build_sentiment_chart, build_theme_chart, build_word_chart};
use feedlens_core::chart::HeadlessEngine;
use feedlens_core::import::normalize;
use feedlens_core::{AnalysisResult, Dashboard, SentimentCounts, ThemeFrequency, WordCount};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_lines(n: usize, sep: &str) -> String {
    (0..n)
        .map(|i| format!("feedback entry number {i} about shipping and price"))
        .collect::<Vec<_>>()
        .join(sep)
}

fn make_result(themes: usize, words: usize) -> AnalysisResult {
    AnalysisResult {
        total_feedbacks: Some(1000),
        sentiment_counts: SentimentCounts::new(612, 251, 137),
        theme_frequency: (0..themes).map(|i| (format!("theme_{i}"), i as u64 * 3)).collect(),
        top_words: (0..words)
            .map(|i| WordCount::new(format!("word_{i}"), 100 - i as u64))
            .collect(),
        positive_examples: vec!["fast delivery".into(), "great support".into()],
        negative_examples: vec!["late again".into()],
    }
}

// ── 1. Normalization ─────────────────────────────────────────────────

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for &n in &[100, 1_000, 10_000] {
        let multi = make_lines(n, "\n");
        group.bench_with_input(BenchmarkId::new("txt_lines", n), &multi, |b, text| {
            b.iter(|| normalize(black_box(text.as_bytes()), "feedback.txt"))
        });

        let single = make_lines(n, ",");
        group.bench_with_input(BenchmarkId::new("csv_single_record", n), &single, |b, text| {
            b.iter(|| normalize(black_box(text.as_bytes()), "feedback.csv"))
        });
    }

    group.finish();
}

// ── 2. Adapters ──────────────────────────────────────────────────────

fn bench_adapters(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapters");
    let counts = SentimentCounts::new(612, 251, 137);
    let themes: ThemeFrequency = (0..12).map(|i| (format!("theme_{i}"), i as u64)).collect();
    let words: Vec<WordCount> = (0..10).map(|i| WordCount::new(format!("w{i}"), i)).collect();

    group.bench_function("sentiment", |b| b.iter(|| build_sentiment_chart(black_box(&counts))));
    group.bench_function("themes_12", |b| b.iter(|| build_theme_chart(black_box(&themes))));
    group.bench_function("words_10", |b| b.iter(|| build_word_chart(black_box(&words))));

    group.finish();
}

// ── 3. Dashboard fan-out ─────────────────────────────────────────────

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_render");

    for &themes in &[4, 32] {
        let result = make_result(themes, 10);
        group.bench_with_input(BenchmarkId::from_parameter(themes), &result, |b, result| {
            let mut dashboard = Dashboard::new(HeadlessEngine::new());
            b.iter(|| dashboard.render(black_box(result.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_adapters, bench_dashboard);
criterion_main!(benches);
