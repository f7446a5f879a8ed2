//! Hybrid bump/free-list slot allocator.
//!
//! [`SlotAllocator`] hands out `dim`-wide slots from a [`PageChain`]. New
//! slots come from a bump cursor in the top page; released slots either
//! retract the cursor (when released in LIFO order) or are pushed on a
//! singly linked free list threaded through the per-slot link table.
//!
//! After every retraction the allocator *unwinds*: while the free-list head
//! sits directly below the cursor it is merged back into the frontier, and
//! whenever the cursor reaches the start of a grown page that page is
//! released. Stack-like usage therefore keeps the footprint at the working
//! set, while arbitrary release order still costs O(1).

use dvs_core::{DvsError, Scalar};

use crate::config::{PageLayout, PoolConfig};
use crate::page::PageChain;
use crate::slot::{Slot, SlotLink};
use crate::stats::PoolStats;

/// Allocator for equal-size slots of `dim` scalars.
///
/// # Invariants
///
/// - `live` equals the number of slots handed out and not yet released.
/// - Every free-listed slot lies below the bump cursor, so a cursor at
///   slot 0 of a grown page means that page is empty.
/// - The cursor only sits at slot 0 of the top page when the top page is
///   the root page.
/// - `live == 0` when the allocator is dropped.
pub struct SlotAllocator<S> {
    chain: PageChain<S>,
    /// Next unused slot in the top page.
    cursor: u32,
    /// Most recently freed slot not yet reused or merged.
    free_head: Option<Slot>,
    /// Slots currently handed out.
    live: usize,
    stats: PoolStats,
}

impl<S: Scalar> SlotAllocator<S> {
    /// Create an allocator for vectors of width `dim`.
    ///
    /// # Errors
    ///
    /// Returns the [`PageLayout::new`] error if `dim` or `config` is invalid.
    pub fn new(dim: usize, config: &PoolConfig) -> Result<Self, DvsError> {
        let layout = PageLayout::new::<S>(dim, config)?;
        Ok(Self {
            chain: PageChain::new(layout),
            cursor: 0,
            free_head: None,
            live: 0,
            stats: PoolStats::default(),
        })
    }

    /// Hand out a slot.
    ///
    /// Reuses the most recently freed slot if there is one; otherwise
    /// advances the bump cursor, growing the page chain when the top page
    /// is full. The slot's contents are whatever its last owner left.
    pub fn allocate(&mut self) -> Slot {
        self.live += 1;

        if let Some(slot) = self.free_head {
            let SlotLink::Free { next } = self.chain.link(slot) else {
                unreachable!("free-list head {slot} is not marked free");
            };
            self.free_head = next;
            self.chain.set_link(slot, SlotLink::Live);
            self.stats.record_allocation(true, self.live);
            return slot;
        }

        if self.cursor == self.chain.layout().slot_capacity() {
            self.chain.grow();
            self.cursor = 0;
            self.stats.pages_grown += 1;
        }
        let slot = Slot::new(self.chain.top(), self.cursor);
        self.cursor += 1;
        self.chain.set_link(slot, SlotLink::Live);
        self.stats.record_allocation(false, self.live);
        slot
    }

    /// Return a slot to the pool.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not live: released twice, never handed out, or
    /// on a page that has already been released.
    pub fn deallocate(&mut self, slot: Slot) {
        self.assert_live(slot);
        self.live -= 1;

        if slot.page() == self.chain.top() && slot.index() + 1 == self.cursor {
            self.chain.set_link(slot, SlotLink::Vacant);
            self.cursor = slot.index();
            self.stats.record_release(true);
            self.unwind();
        } else {
            self.chain.set_link(
                slot,
                SlotLink::Free {
                    next: self.free_head,
                },
            );
            self.free_head = Some(slot);
            self.stats.record_release(false);
        }
    }

    /// Merge adjacent free-list heads into the frontier and release
    /// emptied pages.
    fn unwind(&mut self) {
        loop {
            if self.cursor == 0 && !self.chain.at_root() {
                self.chain.shrink();
                self.cursor = self.chain.layout().slot_capacity();
                self.stats.pages_released += 1;
                continue;
            }

            let Some(head) = self.free_head else {
                return;
            };
            if head.page() != self.chain.top() || head.index() + 1 != self.cursor {
                return;
            }
            let SlotLink::Free { next } = self.chain.link(head) else {
                unreachable!("free-list head {head} is not marked free");
            };
            self.free_head = next;
            self.chain.set_link(head, SlotLink::Vacant);
            self.cursor = head.index();
            self.stats.merges += 1;
        }
    }

    /// Scalars of a live slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not live.
    pub fn values(&self, slot: Slot) -> &[S] {
        self.assert_live(slot);
        let dim = self.dim();
        self.chain.page(slot.page()).slot(slot.index(), dim)
    }

    /// Mutable scalars of a live slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not live.
    pub fn values_mut(&mut self, slot: Slot) -> &mut [S] {
        self.assert_live(slot);
        let dim = self.dim();
        self.chain.page_mut(slot.page()).slot_mut(slot.index(), dim)
    }

    /// Copy the scalars of `src` into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if either slot is not live.
    pub fn copy(&mut self, src: Slot, dst: Slot) {
        self.assert_live(src);
        self.assert_live(dst);
        if src == dst {
            return;
        }
        let (from, to) = self.chain.slot_pair(src, dst);
        to.copy_from_slice(from);
    }

    /// Combine `src` into `dst` element by element: `dst[i] = f(dst[i], src[i])`.
    ///
    /// `src` may equal `dst`, in which case `f` sees each element twice.
    ///
    /// # Panics
    ///
    /// Panics if either slot is not live.
    pub fn zip_with(&mut self, dst: Slot, src: Slot, mut f: impl FnMut(S, S) -> S) {
        self.assert_live(src);
        self.assert_live(dst);
        if src == dst {
            for v in self.values_mut(dst) {
                *v = f(*v, *v);
            }
            return;
        }
        let (from, to) = self.chain.slot_pair(src, dst);
        for (d, &s) in to.iter_mut().zip(from) {
            *d = f(*d, s);
        }
    }

    /// Whether `slot` is currently handed out.
    pub fn is_live(&self, slot: Slot) -> bool {
        slot.page() < self.chain.page_count() as u32
            && (slot.index() as usize) < self.slots_per_page()
            && self.chain.link(slot) == SlotLink::Live
    }

    fn assert_live(&self, slot: Slot) {
        assert!(
            slot.page() < self.chain.page_count() as u32,
            "{slot} refers to a released page ({} pages live)",
            self.chain.page_count()
        );
        match self.chain.link(slot) {
            SlotLink::Live => {}
            SlotLink::Free { .. } => panic!("{slot} is already on the free list (double release)"),
            SlotLink::Vacant => panic!("{slot} was never handed out"),
        }
    }

    /// Vector width in scalars.
    pub fn dim(&self) -> usize {
        self.chain.layout().dim()
    }

    /// Slots per page.
    pub fn slots_per_page(&self) -> usize {
        self.chain.layout().slots_per_page()
    }

    /// Page geometry.
    pub fn layout(&self) -> &PageLayout {
        self.chain.layout()
    }

    /// Number of slots currently handed out.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Number of pages in the chain.
    pub fn page_count(&self) -> usize {
        self.chain.page_count()
    }

    /// Bump cursor position as `(page, slot)`.
    pub fn cursor(&self) -> (u32, u32) {
        (self.chain.top(), self.cursor)
    }

    /// Length of the free list. Walks the list.
    pub fn free_len(&self) -> usize {
        let mut len = 0;
        let mut cur = self.free_head;
        while let Some(slot) = cur {
            len += 1;
            cur = match self.chain.link(slot) {
                SlotLink::Free { next } => next,
                other => unreachable!("free-list entry {slot} is marked {other:?}"),
            };
        }
        len
    }

    /// Snapshot of allocation statistics.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Reset statistics counters. Live state is untouched.
    pub fn reset_stats(&mut self) {
        self.stats = PoolStats {
            peak_live: self.live,
            ..PoolStats::default()
        };
    }

    /// Memory usage of slot storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.chain.memory_bytes()
    }
}

impl<S> Drop for SlotAllocator<S> {
    fn drop(&mut self) {
        if self.live != 0 && !std::thread::panicking() {
            panic!(
                "slot pool dropped with {} outstanding slot(s); every vector must be released before its space",
                self.live
            );
        }
    }
}
