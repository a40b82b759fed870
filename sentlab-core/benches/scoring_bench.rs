//! Criterion benchmarks for SentLab hot paths.
//!
//! Benchmarks:
//! 1. Text normalization (URL/mention stripping, tokenization, stopwords)
//! 2. Document scoring against a lexicon
//! 3. Daily aggregation of scored documents
//! 4. Returns + merge over a multi-year price series

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{Duration, NaiveDate};
use sentlab_core::domain::{DocumentRecord, EmotionCategory, PriceRecord};
use sentlab_core::{
    aggregate_daily, compute_returns, merge_datasets, Lexicon, Normalizer, SentimentScorer,
};

// ── Helpers ──────────────────────────────────────────────────────────

const SAMPLE_TEXTS: &[&str] = &[
    "@elonmusk Tesla deliveries beat expectations, great quarter! https://t.co/abc",
    "Terrible service at the Tesla store today. Angry and disappointed.",
    "Model Y price cut again?! Surprise surprise... RT @trader: buy the dip",
    "Autopilot recall worries me, fear of another crash report",
    "Giga Berlin ramp looks good, trust the process #TSLA",
];

fn make_lexicon() -> Lexicon {
    Lexicon::from_pairs([
        ("great", EmotionCategory::Joy),
        ("great", EmotionCategory::Positive),
        ("good", EmotionCategory::Positive),
        ("terrible", EmotionCategory::Negative),
        ("angry", EmotionCategory::Anger),
        ("angry", EmotionCategory::Negative),
        ("disappointed", EmotionCategory::Sadness),
        ("surprise", EmotionCategory::Surprise),
        ("fear", EmotionCategory::Fear),
        ("crash", EmotionCategory::Fear),
        ("trust", EmotionCategory::Trust),
        ("beat", EmotionCategory::Anticipation),
    ])
}

fn make_documents(n: usize) -> Vec<DocumentRecord> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            DocumentRecord::new(
                i.to_string(),
                base + Duration::days((i / 50) as i64),
                SAMPLE_TEXTS[i % SAMPLE_TEXTS.len()],
            )
        })
        .collect()
}

fn make_prices(n: usize) -> Vec<PriceRecord> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 200.0 + (i as f64 * 0.1).sin() * 20.0;
            PriceRecord::new(base + Duration::days(i as i64), close, 1_000_000)
        })
        .collect()
}

// ── 1. Normalization ─────────────────────────────────────────────────

fn bench_normalize(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    c.bench_function("normalize_5_texts", |b| {
        b.iter(|| {
            let mut total = 0;
            for text in SAMPLE_TEXTS {
                total += normalizer.normalize(black_box(text)).tokens().count();
            }
            total
        });
    });
}

// ── 2. Scoring ───────────────────────────────────────────────────────

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_documents");
    let lexicon = make_lexicon();
    let normalizer = Normalizer::new();
    let scorer = SentimentScorer::new(&lexicon, &normalizer);

    for &n in &[1_000, 10_000] {
        let docs = make_documents(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                docs.iter()
                    .map(|d| scorer.score_document(black_box(d)))
                    .count()
            });
        });
    }

    group.finish();
}

// ── 3. Aggregation ───────────────────────────────────────────────────

fn bench_aggregate(c: &mut Criterion) {
    let lexicon = make_lexicon();
    let normalizer = Normalizer::new();
    let scorer = SentimentScorer::new(&lexicon, &normalizer);
    let scored: Vec<_> = make_documents(10_000)
        .iter()
        .map(|d| scorer.score_document(d))
        .collect();

    c.bench_function("aggregate_10k_docs", |b| {
        b.iter(|| aggregate_daily(black_box(scored.iter().copied())));
    });
}

// ── 4. Returns + Merge ───────────────────────────────────────────────

fn bench_returns_merge(c: &mut Criterion) {
    let prices = make_prices(2520);
    let lexicon = make_lexicon();
    let normalizer = Normalizer::new();
    let scorer = SentimentScorer::new(&lexicon, &normalizer);
    let daily = aggregate_daily(make_documents(50 * 2520).iter().map(|d| scorer.score_document(d)));

    c.bench_function("returns_and_merge_2520_days", |b| {
        b.iter(|| {
            let returns = compute_returns(black_box(&prices)).unwrap();
            merge_datasets(black_box(&daily), &returns).unwrap().len()
        });
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_scoring,
    bench_aggregate,
    bench_returns_merge,
);
criterion_main!(benches);
