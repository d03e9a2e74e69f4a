//! Registry benchmarks: merge and resolve on small and full-width tables.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use flagset_core::{FlagSet, Mask};
use std::hint::black_box;

fn wide() -> FlagSet<String> {
    FlagSet::from_names((0..Mask::MAX_FLAGS).map(|i| format!("F{i}"))).unwrap()
}

fn bench_merge(c: &mut Criterion) {
    let flags = wide();
    let every_other: Vec<String> = (0..Mask::MAX_FLAGS)
        .step_by(2)
        .map(|i| format!("F{i}"))
        .collect();

    c.bench_function("merge_64_of_128", |b| {
        b.iter(|| flags.merge(black_box(&every_other)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let flags = wide();
    let mask = Mask(0x5555_5555_5555_5555_5555_5555_5555_5555);

    c.bench_function("resolve_64_of_128", |b| {
        b.iter(|| flags.resolve(black_box(mask)).len())
    });
}

fn bench_has(c: &mut Criterion) {
    let flags = FlagSet::from_names(["EN", "FR", "DE", "ES", "IT"]).unwrap();
    let current = flags.merge(["EN", "FR", "DE"]).unwrap();

    c.bench_function("has_by_name", |b| {
        b.iter(|| flags.has(black_box(current), ["FR", "DE"]))
    });
}

criterion_group!(benches, bench_merge, bench_resolve, bench_has);
criterion_main!(benches);
