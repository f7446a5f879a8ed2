//! Slot addresses and per-slot link state.

use std::fmt;

/// Address of one `dim`-wide slot within a pool.
///
/// Slots are plain coordinates `(page, index)`; ownership lives with
/// whoever holds the slot between `allocate` and `deallocate`. They never
/// cross pool boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Slot {
    page: u32,
    index: u32,
}

impl Slot {
    pub(crate) fn new(page: u32, index: u32) -> Self {
        Self { page, index }
    }

    /// Index of the page holding this slot (0 is the root page).
    pub fn page(self) -> u32 {
        self.page
    }

    /// Position of this slot within its page, in slots.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Offset of the slot's first scalar within its page.
    pub(crate) fn start(self, dim: usize) -> usize {
        self.index as usize * dim
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot(page={}, index={})", self.page, self.index)
    }
}

/// Bookkeeping for one slot, stored beside the page data.
///
/// A free slot's link is the free-list node; live and vacant slots carry
/// no link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum SlotLink {
    /// At or above the bump cursor.
    #[default]
    Vacant,
    /// Handed out and not yet released.
    Live,
    /// On the free list.
    Free {
        /// Next entry, or `None` at the tail.
        next: Option<Slot>,
    },
}
