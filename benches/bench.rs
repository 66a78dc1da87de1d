//! Criterion benchmarks for skos-analysis.
//!
//! Covers store loading, per-token expansion at several depths, and the
//! analyzer chain over generated documents.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use skos_analysis::analysis::analyzer::Analyzer;
use skos_analysis::skos::engine::EngineBuilder;
use skos_analysis::skos::store::ConceptStore;
use skos_analysis::skos::vocabulary::Vocabulary;

/// Generate a thesaurus shaped as a tree with ten children per concept and
/// a related link between siblings.
fn generate_vocabulary(concepts: usize) -> Vocabulary {
    let mut vocabulary = Vocabulary::new();
    for i in 0..concepts {
        let id = format!("urn:concept:{i}");
        vocabulary = vocabulary
            .pref_label(&id, &format!("term{i}"), Some("en"))
            .alt_label(&id, &format!("synonym{i}"), Some("en"))
            .alt_label(&id, &format!("variant{i}"), Some("en"));
        if i > 0 {
            let parent = format!("urn:concept:{}", (i - 1) / 10);
            vocabulary = vocabulary.broader(&id, &parent).narrower(&parent, &id);
        }
        if i % 10 != 0 {
            vocabulary = vocabulary.related(&id, &format!("urn:concept:{}", i - 1));
        }
    }
    vocabulary
}

/// Generate documents mixing thesaurus terms with unknown words.
fn generate_test_documents(count: usize, concepts: usize) -> Vec<String> {
    let filler = ["the", "search", "engine", "finds", "every", "matching", "document"];

    (0..count)
        .map(|i| {
            let length = 50 + (i % 50);
            (0..length)
                .map(|j| {
                    if (i + j) % 3 == 0 {
                        format!("term{}", (i * 7 + j * 13) % concepts)
                    } else {
                        filler[(i + j) % filler.len()].to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_store_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_load");
    group.sample_size(20);

    for concepts in [1_000, 10_000] {
        let vocabulary = generate_vocabulary(concepts);
        group.throughput(Throughput::Elements(vocabulary.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(concepts), &vocabulary, |b, v| {
            b.iter(|| black_box(ConceptStore::load(v).unwrap()))
        });
    }

    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");
    let vocabulary = generate_vocabulary(10_000);

    for depth in [0, 1, 2] {
        let engine = EngineBuilder::new()
            .max_depth(depth)
            .build(&vocabulary)
            .unwrap();
        group.bench_with_input(BenchmarkId::new("label", depth), &engine, |b, engine| {
            b.iter(|| black_box(engine.expand(black_box("term123"))))
        });
    }

    let engine = EngineBuilder::new().build(&vocabulary).unwrap();
    group.bench_function("label_miss", |b| {
        b.iter(|| black_box(engine.expand(black_box("unknown"))))
    });

    group.finish();
}

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer");

    let concepts = 10_000;
    let engine = EngineBuilder::new()
        .max_depth(1)
        .build(&generate_vocabulary(concepts))
        .unwrap();
    let analyzer = engine.analyzer();
    let texts = generate_test_documents(100, concepts);

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("analyze_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                let count = analyzer.analyze(black_box(text)).unwrap().count();
                black_box(count);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_store_load, bench_expansion, bench_analyzer);
criterion_main!(benches);
