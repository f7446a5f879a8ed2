//! Integration test: vector handle lifecycle against the space's pool.
//!
//! Covers the observable contract of a space: cached zero and basis
//! vectors, live accounting across LIFO and non-LIFO release, copy and
//! move semantics, and the teardown check for leaked handles.

use dvs_pool::PoolConfig;
use dvs_space::{Metric, Space, Vector};
use proptest::prelude::*;

// ── Zero and basis ───────────────────────────────────────────────────

#[test]
fn zero_and_basis_for_every_dimension() {
    for dim in 1..=12 {
        let space = Space::<f64>::new(dim);
        let zero = space.zero();
        assert_eq!(zero.len(), dim);
        assert!(zero.iter().all(|x| x == 0.0));
        for i in 0..dim {
            let e = space.basis(i);
            assert_eq!(e.len(), dim);
            for (k, x) in e.iter().enumerate() {
                assert_eq!(x, if k == i { 1.0 } else { 0.0 }, "basis({i})[{k}] in R^{dim}");
            }
        }
        assert_eq!(space.outstanding(), 0);
    }
}

#[test]
fn narrow_scalars_need_wider_vectors() {
    assert!(Space::<f32>::try_new(1).is_err());
    assert!(Space::<f32>::try_new(2).is_ok());
    assert!(Space::<i16>::try_new(4).is_ok());
    assert!(Space::<f64>::try_new(1).is_ok());
}

// ── Live accounting ──────────────────────────────────────────────────

#[test]
fn lifo_sequence_restores_live_and_pages() {
    let space = Space::<f64>::with_config(3, PoolConfig::with_page_bytes(256));
    let pages = space.page_count();
    {
        let mut stack: Vec<Vector<'_, f64>> = Vec::new();
        for i in 0..200 {
            stack.push(space.filled(i as f64));
            assert_eq!(space.outstanding(), i + 1);
        }
        assert!(space.page_count() > pages);
        while let Some(v) = stack.pop() {
            drop(v);
        }
    }
    assert_eq!(space.outstanding(), 0);
    assert_eq!(space.page_count(), pages);
    assert_eq!(space.free_len(), 0);
}

#[test]
fn freed_slot_is_reused_before_growth() {
    let space = Space::<f64>::with_config(2, PoolConfig::with_page_bytes(72));
    let per_page = space.slots_per_page();

    // Fill at least three slots and end exactly on a page boundary.
    let mut held: Vec<Vector<'_, f64>> = Vec::new();
    while held.len() < 3 || space.live() % per_page != 0 {
        held.push(space.filled(1.0));
    }
    let pages = space.page_count();

    // Release one from the middle, then allocate: no new page.
    let victim = held.len() / 2;
    drop(held.remove(victim));
    assert_eq!(space.free_len(), 1);
    let reused = space.filled(2.0);
    assert_eq!(space.page_count(), pages);
    assert_eq!(space.free_len(), 0);
    assert_eq!(space.stats().reuses, 1);

    // The next one has nowhere to go but a new page.
    let grown = space.filled(3.0);
    assert_eq!(space.page_count(), pages + 1);

    drop(grown);
    drop(reused);
    drop(held);
    assert_eq!(space.outstanding(), 0);
}

#[test]
fn temporaries_release_their_slots() {
    let space = Space::<f64>::new(3);
    let a = space.make([1.0, 2.0, 3.0]);
    let b = space.make([4.0, 5.0, 6.0]);
    let dot = (&a + &b).dot(&a - &b);
    assert_eq!(dot, a.norm_squared() - b.norm_squared());
    assert_eq!(space.outstanding(), 2);
}

// ── Copy and move ────────────────────────────────────────────────────

#[test]
fn copies_are_independent() {
    let space = Space::<f64>::new(3);
    let a = space.make([1.0, 2.0, 3.0]);
    let mut b = a.clone();
    assert_eq!(a, b);
    b.fill(0.0);
    assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
    assert_eq!(b, space.zero());

    let mut c = space.filled(9.0);
    c.clone_from(&a);
    assert_eq!(c, a);
    assert_eq!(space.outstanding(), 3);
}

#[test]
fn moves_do_not_touch_the_pool() {
    let space = Space::<f64>::new(3);
    let a = space.make([1.0, 2.0, 3.0]);
    let before = space.stats();

    let moved = a;
    let mut boxed = vec![moved];
    let mut taken = boxed[0].take();
    let again = taken.take();
    assert_eq!(space.stats(), before);
    assert_eq!(again.to_vec(), vec![1.0, 2.0, 3.0]);

    // Detached leftovers drop without releasing anything.
    drop(taken);
    drop(boxed);
    assert_eq!(space.stats().releases, before.releases);
    assert_eq!(space.outstanding(), 1);
    drop(again);
    assert_eq!(space.outstanding(), 0);
}

#[test]
#[should_panic(expected = "space mismatch")]
fn assigning_across_spaces_of_equal_dimension_panics() {
    let here = Space::<f64>::new(3);
    let there = Space::<f64>::new(3);
    let src = there.make([1.0, 2.0, 3.0]);
    let mut dst = here.filled(0.0);
    dst.clone_from(&src);
}

#[test]
#[should_panic(expected = "space mismatch")]
fn assigning_across_spaces_of_different_dimension_panics() {
    let r2 = Space::<f64>::new(2);
    let r3 = Space::<f64>::new(3);
    let src = r3.make([1.0, 2.0, 3.0]);
    let mut dst = r2.filled(0.0);
    dst.clone_from(&src);
}

#[test]
fn failed_assignment_leaves_the_target_untouched() {
    let r2 = Space::<f64>::new(2);
    let r3 = Space::<f64>::new(3);
    let src = r3.make([1.0, 2.0, 3.0]);
    let mut dst = r2.make([4.0, 5.0]);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        dst.clone_from(&src);
    }));
    assert!(result.is_err());
    assert!(std::ptr::eq(dst.space(), &r2));
    assert_eq!(dst.to_vec(), vec![4.0, 5.0]);
    assert_eq!(r2.outstanding(), 1);
    assert_eq!(r3.outstanding(), 1);
}

// ── Concrete arithmetic ──────────────────────────────────────────────

#[test]
fn r3_arithmetic_and_metrics() {
    let r3 = Space::<f64>::new(3);
    let a = r3.make([1.0, 2.0, 3.0]);
    let b = r3.make([4.0, 5.0, 6.0]);
    assert_eq!((&a + &b).to_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(a.dot(&b), 32.0);

    let c = r3.make([0.0, 1.0, 2.0]);
    let d = r3.make([2.0, 1.0, 0.0]);
    assert_eq!((c - d).to_vec(), vec![-2.0, 0.0, 2.0]);

    let v = r3.make([3.0, 4.0, 0.0]);
    assert_eq!(v.length(), 5.0);
    let unit = v.normalize();
    assert!((unit.get(0) - 0.6).abs() < 1e-12);
    assert!((unit.get(1) - 0.8).abs() < 1e-12);
    assert_eq!(unit.get(2), 0.0);
}

// ── Teardown ─────────────────────────────────────────────────────────

#[test]
#[should_panic(expected = "outstanding")]
fn leaked_vector_is_caught_at_teardown() {
    let space = Space::<f64>::new(3);
    let v = space.make([1.0, 2.0, 3.0]);
    std::mem::forget(v);
    drop(space);
}

#[test]
fn clean_teardown_after_heavy_use() {
    let space = Space::<f32>::with_config(4, PoolConfig::with_page_bytes(64));
    let vs: Vec<_> = (0..100).map(|i| space.filled(i as f32)).collect();
    let total: f32 = vs.iter().map(|v| v.sum()).sum();
    assert_eq!(total, 4.0 * (0..100).sum::<i32>() as f32);
    drop(vs);
    drop(space);
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn live_count_tracks_handles(
        ops in prop::collection::vec((any::<bool>(), any::<prop::sample::Index>()), 1..200),
    ) {
        let space = Space::<f64>::with_config(2, PoolConfig::with_page_bytes(96));
        let mut held: Vec<Vector<'_, f64>> = Vec::new();
        for (alloc, pick) in ops {
            if alloc || held.is_empty() {
                held.push(space.filled(held.len() as f64));
            } else {
                held.swap_remove(pick.index(held.len()));
            }
            prop_assert_eq!(space.outstanding(), held.len());
        }
        drop(held);
        prop_assert_eq!(space.outstanding(), 0);
    }

    #[test]
    fn lifo_restores_page_count(n in 0usize..300, dim in 2usize..8) {
        let space = Space::<f64>::with_config(dim, PoolConfig::with_page_bytes(128));
        let pages = space.page_count();
        let mut stack: Vec<Vector<'_, f64>> = (0..n).map(|_| space.filled(0.0)).collect();
        while stack.pop().is_some() {}
        prop_assert_eq!(space.page_count(), pages);
        prop_assert_eq!(space.outstanding(), 0);
    }

    #[test]
    fn addition_matches_componentwise(
        xs in prop::collection::vec(-1e6f64..1e6, 4),
        ys in prop::collection::vec(-1e6f64..1e6, 4),
    ) {
        let r4 = Space::<f64>::new(4);
        let a = r4.make(xs.iter().copied());
        let b = r4.make(ys.iter().copied());
        let sum = &a + &b;
        for i in 0..4 {
            prop_assert_eq!(sum.get(i), xs[i] + ys[i]);
        }
        prop_assert_eq!(a.dot(&b), b.dot(&a));
    }
}
