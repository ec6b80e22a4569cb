//! Performance benchmarks for glossary resolution
//!
//! Targets:
//! - Single resolve: <5µs with 20 namespaces of 50 terms
//! - Document scan: <1ms for a 1,000 word document
//! - Mark as known on a shared handle: <100µs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jargon_core::definitions::{DefinitionDocument, KnownTermsDocument};
use jargon_core::{Glossary, GlossaryHandle, Scanner};
use std::fmt::Write;

/// Letter-only rendering of `n` ("0" -> "a", "12" -> "bc"), so names tokenize as one word
fn letters(n: usize) -> String {
    n.to_string()
        .bytes()
        .map(|digit| (b'a' + (digit - b'0')) as char)
        .collect()
}

/// Glossary with `namespaces` namespaces of `terms` terms, each with one alias
fn build_glossary(namespaces: usize, terms: usize) -> Glossary {
    let mut yaml = String::from("global:\n  widget:\n    aka: gizmo\n");
    for ns in 0..namespaces {
        writeln!(yaml, "area{}:", ns).unwrap();
        for term in 0..terms {
            writeln!(yaml, "  term{}x{}:", letters(ns), letters(term)).unwrap();
            writeln!(yaml, "    aka: alias{}x{}", letters(ns), letters(term)).unwrap();
            writeln!(yaml, "    description: Term {} of area {}.", term, ns).unwrap();
        }
    }

    let document = DefinitionDocument::parse(&yaml).unwrap();
    let known: [&KnownTermsDocument; 0] = [];
    Glossary::from_documents([&document], known)
}

fn build_document(words: usize) -> String {
    let vocabulary = ["the", "termdxh", "widgets", "aliasdxbc", "unrelated", "gizmo"];
    (0..words)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Benchmark 1: Resolve
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(1));
    let glossary = build_glossary(20, 50);

    group.bench_function("exact", |b| {
        b.iter(|| glossary.resolve(black_box("termdxh"), black_box("/repo/area3/readme.md")).unwrap())
    });

    group.bench_function("plural_alias", |b| {
        b.iter(|| glossary.resolve(black_box("aliasdxejs"), black_box("/repo/area3/readme.md")).unwrap())
    });

    group.bench_function("global_fallback", |b| {
        b.iter(|| glossary.resolve(black_box("gizmos"), black_box("/repo/docs/readme.md")).unwrap())
    });

    group.bench_function("miss", |b| {
        b.iter(|| glossary.resolve(black_box("nothing"), black_box("/repo/area3/readme.md")).unwrap())
    });

    group.finish();
}

/// Benchmark 2: Document scan
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let glossary = build_glossary(20, 50);
    let scanner = Scanner::new();

    for words in [100, 1_000, 10_000] {
        let text = build_document(words);
        group.throughput(Throughput::Elements(words as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &text, |b, text| {
            b.iter(|| {
                scanner
                    .scan(&glossary, black_box("/repo/area3/notes.md"), black_box(text))
                    .unwrap()
            })
        });
    }

    group.finish();
}

/// Benchmark 3: Shared handle
fn bench_handle(c: &mut Criterion) {
    let mut group = c.benchmark_group("handle");
    group.throughput(Throughput::Elements(1));

    let handle = GlossaryHandle::new(build_glossary(20, 50));

    group.bench_function("snapshot", |b| b.iter(|| black_box(handle.snapshot().unwrap())));

    // Snapshot held elsewhere forces a copy on every write
    let _reader = handle.snapshot().unwrap();
    group.bench_function("mark_as_known_shared", |b| {
        b.iter(|| handle.mark_as_known(black_box("area3"), black_box("termdxh")).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_scan, bench_handle);

criterion_main!(benches);
