//! Benchmarks for sequence reconciliation and song assembly.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use cuebuild::assemble::media::FixedProbe;
use cuebuild::catalog::ContentCatalog;
use cuebuild::ids::SequentialIds;
use cuebuild::payload::{SectionPayload, SequenceEntry, SongPayload};
use cuebuild::reconcile::Reconciler;
use cuebuild::util::UserPaths;
use cuebuild::{Assembler, AssemblyOptions, Presentation};

const BASES: [&str; 6] = ["Verse", "Chorus", "Pre-Chorus", "Bridge", "Tag", "Interlude"];

/// A long song: every base with several numbered copies, and a sequence
/// that walks them twice so the reuse pass runs.
fn long_song() -> SongPayload {
    let mut sections = Vec::new();
    for base in BASES {
        for n in 1..=6 {
            sections.push(
                SectionPayload::new(format!("{base} {n}"))
                    .with_slide(["first line of the slide", "second line"])
                    .with_slide(["third line"]),
            );
        }
    }

    let mut sequence = Vec::new();
    for _ in 0..2 {
        for n in 1..=6 {
            for base in BASES {
                sequence.push(SequenceEntry::labelled(base).with_number(n));
            }
        }
    }
    sequence.push(SequenceEntry::labelled("Outro"));

    SongPayload {
        title: Some("Benchmark".into()),
        sections,
        sequence: Some(sequence),
        ..Default::default()
    }
}

// ============================================================================
// Reconciliation Benchmarks
// ============================================================================

fn bench_catalog(c: &mut Criterion) {
    let payload = long_song();

    c.bench_function("catalog_build", |b| {
        b.iter(|| ContentCatalog::new(black_box(&payload.sections)));
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let payload = long_song();
    let catalog = ContentCatalog::new(&payload.sections);
    let sequence = payload.sequence.as_deref();

    c.bench_function("reconcile", |b| {
        b.iter(|| Reconciler::new(&catalog).reconcile(black_box(sequence)));
    });
}

// ============================================================================
// Assembly Benchmarks
// ============================================================================

fn bench_assemble_song(c: &mut Criterion) {
    let payload = long_song();
    let options = AssemblyOptions::default().with_user_paths(UserPaths::new("/nonexistent"));

    c.bench_function("assemble_song", |b| {
        b.iter(|| {
            let mut assembler = Assembler::new()
                .with_ids(SequentialIds::new())
                .with_probe(FixedProbe::default())
                .with_options(options.clone());
            let mut doc = Presentation::default();
            assembler.assemble_song(&mut doc, black_box(&payload));
            doc.to_bytes()
        });
    });
}

criterion_group!(
    benches,
    // Reconciliation
    bench_catalog,
    bench_reconcile,
    // Assembly
    bench_assemble_song,
);
criterion_main!(benches);
