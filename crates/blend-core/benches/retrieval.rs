use blend_core::lexicon::{DictionaryEntry, Lexicon};
use blend_core::retrieval::{alignment_score, retrieve_sources};
use blend_core::table::CandidateTable;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

static STEMS: &[&str] = &[
    "believe", "bieber", "breakfast", "lunch", "smoke", "fog", "motor", "hotel", "spoon",
    "fork", "chuckle", "snort", "brother", "romance", "glamour", "camping", "web", "seminar",
];

static SUFFIXES: &[&str] = &["", "s", "ed", "er", "ing", "ly", "ness"];

fn bench_lexicon() -> Lexicon {
    let entries = STEMS.iter().flat_map(|stem| {
        SUFFIXES.iter().map(move |suffix| DictionaryEntry {
            word: format!("{stem}{suffix}"),
            frequency: 10,
        })
    });
    Lexicon::from_entries(entries)
}

static CANDIDATES: &[&str] = &[
    "belieber", "brunch", "smog", "motel", "spork", "chortle", "bromance", "glamping", "webinar",
];

fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieval/alignment");
    for &(label, source, candidate) in &[
        ("short", "fog", "smog"),
        ("medium", "believe", "belieber"),
        ("long", "brotherhood", "bromanticism"),
    ] {
        group.bench_with_input(
            BenchmarkId::new(label, candidate.len()),
            &(source, candidate),
            |b, &(source, candidate)| {
                b.iter(|| alignment_score(source, candidate));
            },
        );
    }
    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let lexicon = bench_lexicon();
    let mut group = c.benchmark_group("retrieval/sources");
    for count in [1usize, 4, CANDIDATES.len()] {
        let table: CandidateTable = CANDIDATES[..count].iter().copied().collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &table, |b, table| {
            b.iter(|| retrieve_sources(table, &lexicon));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_alignment, bench_retrieve);
criterion_main!(benches);
