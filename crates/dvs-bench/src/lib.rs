//! Benchmark workloads for pooled vector spaces.
//!
//! Provides deterministic allocation patterns shared by the criterion
//! benches:
//!
//! - [`release_order`]: a seeded permutation of `0..n` for non-LIFO release
//! - [`fill_space`]: `n` vectors with distinct, reproducible values
//! - [`churn`]: interleaved allocate/release rounds that exercise the free list

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dvs_core::Scalar;
use dvs_space::{Space, Vector};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A seeded shuffle of `0..n`.
///
/// The same `(n, seed)` always yields the same order.
pub fn release_order(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    order
}

/// Allocate `n` vectors whose components count up from `i * dim`.
pub fn fill_space<S>(space: &Space<S>, n: usize) -> Vec<Vector<'_, S>>
where
    S: Scalar + From<u16>,
{
    let dim = space.dim();
    (0..n)
        .map(|i| space.make_with(|k| S::from(((i * dim + k) % 1024) as u16)))
        .collect()
}

/// Run `rounds` of: allocate `batch` vectors, then release them in a
/// seeded random order. Returns the number of page growths observed.
pub fn churn<S>(space: &Space<S>, batch: usize, rounds: usize, seed: u64) -> u64
where
    S: Scalar + From<u16>,
{
    let grown_before = space.stats().pages_grown;
    for round in 0..rounds {
        let mut live: Vec<Option<Vector<'_, S>>> =
            fill_space(space, batch).into_iter().map(Some).collect();
        for i in release_order(batch, seed.wrapping_add(round as u64)) {
            live[i] = None;
        }
    }
    space.stats().pages_grown - grown_before
}
