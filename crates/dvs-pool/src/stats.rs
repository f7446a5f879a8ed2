//! Allocation statistics for a slot pool.

/// Counters describing how a pool has served requests.
///
/// A pool is single-threaded, so the counters are plain integers updated
/// in place and copied out on request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total `allocate` calls.
    pub allocations: u64,
    /// Allocations served from the free list.
    pub reuses: u64,
    /// Allocations served by advancing the bump cursor.
    pub bumps: u64,
    /// Total `deallocate` calls.
    pub releases: u64,
    /// Releases that retracted the bump cursor directly.
    pub retractions: u64,
    /// Free-list entries merged back into the frontier by unwind.
    pub merges: u64,
    /// Pages pushed onto the chain.
    pub pages_grown: u64,
    /// Pages popped off the chain.
    pub pages_released: u64,
    /// Highest live-slot count observed.
    pub peak_live: usize,
}

impl PoolStats {
    /// Fraction of allocations served from the free list.
    ///
    /// Returns 0.0 before the first allocation.
    pub fn reuse_ratio(&self) -> f64 {
        if self.allocations == 0 {
            0.0
        } else {
            self.reuses as f64 / self.allocations as f64
        }
    }

    pub(crate) fn record_allocation(&mut self, reused: bool, live: usize) {
        self.allocations += 1;
        if reused {
            self.reuses += 1;
        } else {
            self.bumps += 1;
        }
        self.peak_live = self.peak_live.max(live);
    }

    pub(crate) fn record_release(&mut self, retracted: bool) {
        self.releases += 1;
        if retracted {
            self.retractions += 1;
        }
    }
}
