//! Benchmarks for the corpus scan and the re-ranking pass.
//!
//! Simulates realistic content-browser corpora:
//! - small:  50 items  (single collection)
//! - medium: 200 items (typical library)
//! - large:  800 items (power user, past the design point)
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mustela::testing::{make_article_full, Article};
use mustela::{re_rank, search_corpus, SearchOptions, WeightConfig};

/// Corpus sizes to benchmark
const CORPUS_SIZES: &[usize] = &[50, 200, 800];

/// Vocabulary for generated titles and summaries
const WORDS: &[&str] = &[
    "cognitive",
    "bias",
    "systems",
    "thinking",
    "decision",
    "feedback",
    "complexity",
    "incentive",
    "leverage",
    "emergence",
    "probability",
    "inversion",
    "compounding",
    "entropy",
    "equilibrium",
    "network",
    "signal",
    "noise",
    "margin",
    "safety",
];

/// Deterministic pseudo-random corpus (no RNG dependency, reproducible runs)
fn build_corpus(size: usize) -> Vec<Article> {
    (0..size)
        .map(|i| {
            let pick = |offset: usize| WORDS[(i * 7 + offset * 13) % WORDS.len()];
            let title = format!("{} {}", pick(0), pick(1));
            let summary = format!("{} {} {} {}", pick(2), pick(3), pick(4), pick(5));
            let tags = [pick(6), pick(7)];
            make_article_full(&title, &summary, pick(8), &tags, &[])
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_corpus");

    for &size in CORPUS_SIZES {
        let corpus = build_corpus(size);
        let options = SearchOptions::default();
        group.throughput(Throughput::Elements(size as u64));

        // Substring-tier query: early exits dominate
        group.bench_with_input(BenchmarkId::new("substring", size), &corpus, |b, corpus| {
            b.iter(|| search_corpus(black_box(corpus), black_box("thinking"), &options));
        });

        // Typo query: most fields fall through to the Levenshtein DP
        group.bench_with_input(BenchmarkId::new("fuzzy", size), &corpus, |b, corpus| {
            b.iter(|| search_corpus(black_box(corpus), black_box("thinkng"), &options));
        });
    }

    group.finish();
}

fn bench_re_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("re_rank");
    let config = WeightConfig::default();
    let weights = config.profile("narrative").unwrap();

    for &size in CORPUS_SIZES {
        let corpus = build_corpus(size);
        let results = search_corpus(&corpus, "thinking", &SearchOptions::default());
        group.throughput(Throughput::Elements(results.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &results, |b, results| {
            b.iter(|| re_rank(black_box(results.clone()), black_box(weights), None));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_re_rank);
criterion_main!(benches);
