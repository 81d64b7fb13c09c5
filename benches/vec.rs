//! Benchmarks for the Standard Library's [`Vec`], searched linearly.

use criterion::Criterion;

use crate::skipset::{SWEEP_SIZE, sweep_keys};

/// Benchmarking a lookup of every key in `0..SWEEP_SIZE`, counting hits.
pub fn lookup_sweep(c: &mut Criterion) {
    let keys = sweep_keys();

    c.bench_function("Vec Lookup Sweep", |b| {
        b.iter(|| {
            (0..SWEEP_SIZE)
                .filter(|key| keys.iter().any(|k| k == key))
                .count()
        });
    });
}
