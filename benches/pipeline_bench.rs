//! Performance benchmarks for the feedback pipeline
//!
//! Targets:
//! - Short comment analysis: <10µs
//! - Long comment analysis: <200µs
//! - Canonicalization: <20µs per phrase
//! - Profile of 100 submissions (no clustering): <20ms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;
use traitlens_core::{
    ClusteringConfig, HashedEmbeddingService, InMemoryVectorIndex, PipelineConfig, ProfileBuilder,
    Submission, TraitClusterer, TraitPipeline, Vote,
};

const COMMENTS: &[(i64, &str)] = &[
    (1, "chiller"),
    (-1, "She is nice but sometimes rude"),
    (1, "Great teammate. Always shows up on time and works hard"),
    (-1, "He always talks over people in meetings, which is annoying"),
    (1, "funny"),
    (-1, "kind of boring"),
    (1, "really supportive and helpful when I was stuck on the lab"),
    (0, "met once"),
];

fn history(n: usize) -> Vec<Submission> {
    COMMENTS
        .iter()
        .cycle()
        .take(n)
        .map(|(vote, comment)| Submission::new(*vote, *comment).unwrap())
        .collect()
}

fn pipeline() -> Arc<TraitPipeline> {
    Arc::new(TraitPipeline::with_defaults(PipelineConfig::default()).unwrap())
}

/// Benchmark 1: Per-comment analysis
fn bench_analyze_comment(c: &mut Criterion) {
    let pipeline = pipeline();
    let mut group = c.benchmark_group("analyze_comment");
    group.throughput(Throughput::Elements(1));

    group.bench_function("short", |b| {
        b.iter(|| pipeline.analyze_comment(black_box("chiller"), Vote::Up, 0).unwrap())
    });

    group.bench_function("long_with_contrast", |b| {
        b.iter(|| {
            pipeline
                .analyze_comment(
                    black_box("He always talks over people in meetings, but he is really funny"),
                    Vote::Down,
                    0,
                )
                .unwrap()
        })
    });

    group.finish();
}

/// Benchmark 2: Canonicalization
fn bench_canonicalize(c: &mut Criterion) {
    let pipeline = pipeline();
    let mut group = c.benchmark_group("canonicalize");

    for phrase in ["chiller", "doesn't listen", "a really friendly person", "great sense of humor"] {
        group.bench_with_input(BenchmarkId::from_parameter(phrase), phrase, |b, phrase| {
            b.iter(|| pipeline.canonicalize(black_box(phrase)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark 3: Whole profiles
fn bench_build_profile(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("build_profile");

    for size in [10usize, 100] {
        let submissions = history(size);
        group.throughput(Throughput::Elements(size as u64));

        let unclustered = ProfileBuilder::new(pipeline(), None);
        group.bench_with_input(BenchmarkId::new("unclustered", size), &submissions, |b, subs| {
            b.to_async(&rt)
                .iter(|| async { unclustered.build_profile(black_box(subs), 8).await.unwrap() })
        });

        let clusterer = TraitClusterer::new(
            Arc::new(HashedEmbeddingService::new(256)),
            Arc::new(InMemoryVectorIndex::new(256)),
            &ClusteringConfig::default(),
        );
        let clustered = ProfileBuilder::new(pipeline(), Some(Arc::new(clusterer)));
        group.bench_with_input(BenchmarkId::new("hashed_memory", size), &submissions, |b, subs| {
            b.to_async(&rt)
                .iter(|| async { clustered.build_profile(black_box(subs), 8).await.unwrap() })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_analyze_comment,
    bench_canonicalize,
    bench_build_profile
);
criterion_main!(benches);
