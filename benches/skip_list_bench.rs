// Benchmarks for the indexable skip list.
//
// A sorted Vec is the baseline: O(log n) lookups, O(n) inserts and removals.

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use indexable_skiplist::SkipList;

// =============================================================================
// Benchmark Helpers
// =============================================================================

fn shuffled(size: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values: Vec<u64> = (0..size as u64).collect();
    values.shuffle(&mut rng);
    values
}

fn build(values: &[u64]) -> SkipList<u64> {
    let mut list = SkipList::with_rng(StdRng::seed_from_u64(1));
    for &v in values {
        list.insert(v);
    }
    list
}

fn sorted_vec_insert(vec: &mut Vec<u64>, value: u64) {
    if let Err(pos) = vec.binary_search(&value) {
        vec.insert(pos, value);
    }
}

// =============================================================================
// Random Inserts
// =============================================================================

fn bench_random_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_inserts");

    for size in [1_000, 10_000, 100_000] {
        let values = shuffled(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("SkipList", size), &values, |b, values| {
            b.iter(|| black_box(build(values).len()));
        });

        group.bench_with_input(BenchmarkId::new("SortedVec", size), &values, |b, values| {
            b.iter(|| {
                let mut vec = Vec::with_capacity(values.len());
                for &v in values {
                    sorted_vec_insert(&mut vec, v);
                }
                black_box(vec.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Rank Lookups
// =============================================================================

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for size in [1_000, 100_000] {
        let list = build(&shuffled(size, 7));
        let mut rng = StdRng::seed_from_u64(3);
        let probes: Vec<usize> = (0..1_000).map(|_| rng.gen_range(0..size)).collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_with_input(BenchmarkId::new("SkipList", size), &probes, |b, probes| {
            b.iter(|| {
                let mut sum = 0u64;
                for &i in probes {
                    sum += list.get(i).copied().unwrap_or(0);
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Mixed Remove / Reinsert
// =============================================================================

fn bench_remove_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_at_reinsert");

    for size in [1_000, 100_000] {
        let values = shuffled(size, 11);
        group.throughput(Throughput::Elements(1_000));

        group.bench_with_input(BenchmarkId::new("SkipList", size), &values, |b, values| {
            let mut list = build(values);
            let mut rng = StdRng::seed_from_u64(5);
            b.iter(|| {
                for _ in 0..1_000 {
                    let index = rng.gen_range(0..list.len());
                    if let Ok(v) = list.remove_at(index) {
                        list.insert(v);
                    }
                }
                black_box(list.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_random_inserts,
    bench_get,
    bench_remove_reinsert,
);

criterion_main!(benches);
