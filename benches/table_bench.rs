use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Cursor;
use std::num::NonZeroUsize;

use lexitable::types::{Field, Occurrence};
use lexitable::{HashStrategy, HashTable, Store, TableConfig};

// ─── Test Data ──────────────────────────────────────────────────────────────

const STRATEGIES: [HashStrategy; 3] = [
    HashStrategy::Poly31,
    HashStrategy::Djb2,
    HashStrategy::Xxh64,
];

fn make_rows(n: usize) -> Vec<(Field, Occurrence)> {
    (0..n)
        .map(|i| {
            (
                Field::from(format!("word_{i:05}")),
                vec![
                    Field::from("n"),
                    Field::from(format!("definition of word {i}")),
                ],
            )
        })
        .collect()
}

/// Render a parseable input document with `n` data rows.
fn make_document(n: usize) -> String {
    let mut text = String::from(",\n3\nword,type,def\n");
    for (key, occurrence) in make_rows(n) {
        text.push_str(&key);
        for value in &occurrence {
            text.push(',');
            text.push_str(value);
        }
        text.push('\n');
    }
    text
}

fn build(rows: &[(Field, Occurrence)], slots: usize, strategy: HashStrategy) -> HashTable {
    let mut table = HashTable::new(TableConfig {
        slots: NonZeroUsize::new(slots).unwrap(),
        strategy,
        merge_duplicates: true,
    });
    for (key, occurrence) in rows {
        table.insert(key.clone(), occurrence.clone());
    }
    table
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 1: Building the table
// ═══════════════════════════════════════════════════════════════════════════

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let rows = make_rows(10_000);
    for strategy in STRATEGIES {
        group.bench_function(format!("insert_10k_{strategy}"), |b| {
            b.iter(|| build(black_box(&rows), 1024, strategy))
        });
    }

    let document = make_document(10_000);
    let config = TableConfig {
        slots: NonZeroUsize::new(1024).unwrap(),
        strategy: HashStrategy::Poly31,
        merge_duplicates: true,
    };
    group.bench_function("parse_10k_rows", |b| {
        b.iter(|| {
            let mut input = Cursor::new(black_box(document.as_str()));
            Store::from_reader(&mut input, config).unwrap()
        })
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 2: Lookups
// ═══════════════════════════════════════════════════════════════════════════

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let rows = make_rows(10_000);
    for strategy in STRATEGIES {
        let table = build(&rows, 1024, strategy);
        group.bench_function(format!("hit_{strategy}"), |b| {
            b.iter(|| {
                for (key, _) in rows.iter().step_by(97) {
                    black_box(table.search(black_box(key)).comparisons);
                }
            })
        });
    }

    let table = build(&rows, 1024, HashStrategy::Poly31);
    group.bench_function("miss_poly31", |b| {
        b.iter(|| black_box(table.search(black_box("no_such_word")).comparisons))
    });

    // Degenerate case: one slot, everything collides, lookups pay the full
    // chain scan.
    let collided = build(&make_rows(1_000), 1, HashStrategy::Poly31);
    group.bench_function("single_slot_1k", |b| {
        b.iter(|| black_box(collided.search(black_box("word_00000")).comparisons))
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
