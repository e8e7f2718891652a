//! Criterion micro-benchmarks for overlap removal and the selection pipeline.

use criterion::{criterion_group, criterion_main, Criterion};
use hepsel_bench::{reference_profile, stress_profile};
use hepsel_core::SystematicVariant;
use hepsel_select::{remove_sfos_pairs, OverlapRemover, SelectionConfig, Selector};
use std::hint::black_box;

fn bench_e_e_stress(c: &mut Criterion) {
    let store = stress_profile(42);
    let remover = OverlapRemover::default();
    c.bench_function("e_e_overlap_stress", |b| {
        b.iter(|| {
            let mut electrons = store.electrons();
            remover.e_e(&mut electrons);
            black_box(electrons.len())
        });
    });
}

fn bench_perform_overlap(c: &mut Criterion) {
    let store = stress_profile(42);
    let remover = OverlapRemover::default();
    c.bench_function("perform_overlap_stress", |b| {
        b.iter(|| {
            let mut electrons = store.electrons();
            let mut muons = store.muons();
            let mut jets = store.jets();
            remover.perform_overlap(&mut electrons, &mut muons, &mut jets);
            remove_sfos_pairs(&mut muons, SelectionConfig::DEFAULT_MLL_MIN);
            black_box((electrons.len(), muons.len(), jets.len()))
        });
    });
}

fn bench_baseline_reference(c: &mut Criterion) {
    let store = reference_profile(42);
    let selector = Selector::default();
    c.bench_function("baseline_objects_reference", |b| {
        b.iter(|| black_box(selector.baseline_objects(&store).n_light_leptons()));
    });
}

fn bench_select_variants(c: &mut Criterion) {
    let mut store = reference_profile(42);
    let selector = Selector::default();
    c.bench_function("select_two_variants_reference", |b| {
        b.iter(|| {
            let mut total = 0;
            for variant in [SystematicVariant::Nominal, SystematicVariant::JesUp] {
                if let Ok(event) = selector.select(&mut store, variant) {
                    total += event.signal.jets().len();
                }
            }
            black_box(total)
        });
    });
}

criterion_group!(
    benches,
    bench_e_e_stress,
    bench_perform_overlap,
    bench_baseline_reference,
    bench_select_variants
);
criterion_main!(benches);
