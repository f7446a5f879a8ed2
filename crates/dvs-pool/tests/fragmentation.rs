//! Integration test: slot pool footprint under sustained churn.
//!
//! Runs many rounds of interleaved allocation and out-of-order release and
//! checks that the page count stays bounded by the peak working set, that
//! every slot is returned, and that values written into reused slots never
//! bleed into each other.

use dvs_pool::{PoolConfig, Slot, SlotAllocator};

/// Small pages so that a few dozen slots span several pages.
fn pool(dim: usize) -> SlotAllocator<f64> {
    SlotAllocator::new(dim, &PoolConfig::with_page_bytes(128)).unwrap()
}

/// Seeded xorshift64 generator for the release pattern.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

// ── Churn keeps pages bounded ────────────────────────────────────────

#[test]
fn churn_does_not_grow_past_the_working_set() {
    let mut pool = pool(3);
    let per_page = pool.slots_per_page();
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut live: Vec<Slot> = Vec::new();
    let mut peak = 0;

    for _ in 0..5_000 {
        if live.len() < 40 && (live.is_empty() || rng.below(3) != 0) {
            live.push(pool.allocate());
        } else {
            let i = rng.below(live.len());
            pool.deallocate(live.swap_remove(i));
        }
        peak = peak.max(live.len());
        assert_eq!(pool.live(), live.len());
    }

    // Growth only happens with an empty free list, so pages are bounded
    // by the peak.
    let bound = peak.div_ceil(per_page) + 1;
    assert!(
        pool.page_count() <= bound,
        "{} pages for a peak of {peak} slots ({per_page} per page)",
        pool.page_count()
    );

    for slot in live.drain(..) {
        pool.deallocate(slot);
    }
    assert_eq!(pool.live(), 0);
}

#[test]
fn lifo_drain_after_churn_returns_to_one_page() {
    let mut pool = pool(2);
    let mut rng = XorShift(17);
    let mut live: Vec<Slot> = (0..50).map(|_| pool.allocate()).collect();
    assert!(pool.page_count() > 1);

    // Punch holes, then refill them: reuse must not grow the chain.
    let pages = pool.page_count();
    for _ in 0..20 {
        let i = rng.below(live.len());
        pool.deallocate(live.swap_remove(i));
    }
    for _ in 0..20 {
        live.push(pool.allocate());
    }
    assert_eq!(pool.page_count(), pages);
    assert_eq!(pool.free_len(), 0);

    // Releasing in address order from the top unwinds everything.
    live.sort_by_key(|s| (s.page(), s.index()));
    while let Some(slot) = live.pop() {
        pool.deallocate(slot);
    }
    assert_eq!(pool.page_count(), 1);
    assert_eq!(pool.cursor(), (0, 0));
    assert_eq!(pool.free_len(), 0);
}

#[test]
fn reused_slots_keep_values_isolated() {
    let mut pool = pool(4);
    let mut rng = XorShift(3);
    let mut live: Vec<(Slot, f64)> = Vec::new();

    for step in 0..2_000 {
        if live.len() < 30 && (live.is_empty() || rng.below(2) == 0) {
            let slot = pool.allocate();
            let tag = step as f64;
            pool.values_mut(slot).fill(tag);
            live.push((slot, tag));
        } else {
            let i = rng.below(live.len());
            let (slot, tag) = live.swap_remove(i);
            assert!(pool.values(slot).iter().all(|&v| v == tag));
            pool.deallocate(slot);
        }
    }
    for (slot, tag) in live {
        assert!(pool.values(slot).iter().all(|&v| v == tag));
        pool.deallocate(slot);
    }
}

#[test]
fn stats_account_for_every_allocation() {
    let mut pool = pool(2);
    let mut rng = XorShift(99);
    let mut live: Vec<Slot> = Vec::new();
    let mut allocations = 0;
    let mut releases = 0;

    for _ in 0..1_000 {
        if live.is_empty() || rng.below(2) == 0 {
            live.push(pool.allocate());
            allocations += 1;
        } else {
            let i = rng.below(live.len());
            pool.deallocate(live.swap_remove(i));
            releases += 1;
        }
    }
    let stats = pool.stats();
    assert_eq!(stats.allocations, allocations);
    assert_eq!(stats.reuses + stats.bumps, allocations);
    assert_eq!(stats.releases, releases);
    assert!(stats.peak_live >= live.len());

    for slot in live {
        pool.deallocate(slot);
    }
}
