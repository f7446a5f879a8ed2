//! Criterion micro-benchmarks for slot allocation and release patterns.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dvs_bench::{churn, fill_space, release_order};
use dvs_pool::{PoolConfig, SlotAllocator};
use dvs_space::Space;

/// Benchmark: allocate and release 10K slots in strict LIFO order.
fn bench_pool_lifo_10k(c: &mut Criterion) {
    let mut pool = SlotAllocator::<f64>::new(3, &PoolConfig::new()).unwrap();
    let mut slots = Vec::with_capacity(10_000);
    c.bench_function("pool_lifo_10k", |b| {
        b.iter(|| {
            for _ in 0..10_000 {
                slots.push(pool.allocate());
            }
            while let Some(slot) = slots.pop() {
                pool.deallocate(slot);
            }
            black_box(pool.page_count());
        });
    });
}

/// Benchmark: allocate 10K slots, release them in a shuffled order.
fn bench_pool_shuffled_10k(c: &mut Criterion) {
    let mut pool = SlotAllocator::<f64>::new(3, &PoolConfig::new()).unwrap();
    let order = release_order(10_000, 42);
    let mut slots = Vec::with_capacity(10_000);
    c.bench_function("pool_shuffled_10k", |b| {
        b.iter(|| {
            slots.clear();
            for _ in 0..10_000 {
                slots.push(pool.allocate());
            }
            for &i in &order {
                pool.deallocate(slots[i]);
            }
            black_box(pool.free_len());
        });
    });
}

/// Benchmark: vector handles through a space, shuffled release.
fn bench_space_churn(c: &mut Criterion) {
    let space = Space::<f64>::new(3);
    let mut seed = 0u64;
    c.bench_function("space_churn_1k_x4", |b| {
        b.iter(|| {
            seed += 1;
            black_box(churn(&space, 1_000, 4, seed));
        });
    });
}

/// Benchmark: tear down a populated space.
fn bench_space_teardown(c: &mut Criterion) {
    c.bench_function("space_teardown_10k", |b| {
        b.iter_batched(
            || Space::<f64>::new(4),
            |space| {
                let vs = fill_space(&space, 10_000);
                drop(vs);
                black_box(space.page_count());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_pool_lifo_10k,
    bench_pool_shuffled_10k,
    bench_space_churn,
    bench_space_teardown
);
criterion_main!(benches);
