//! Fixed-capacity pages and the LIFO page chain.
//!
//! A [`Page`] is a zero-initialised `Box<[S]>` sized by the pool's
//! [`PageLayout`], plus one link entry per slot. A [`PageChain`] is a stack
//! of pages: new pages are pushed when the bump cursor runs off the end of
//! the top page, and only the top page may be released. The root page is
//! created with the chain and lives as long as it does.

use crate::config::PageLayout;
use crate::slot::{Slot, SlotLink};

/// A single fixed-capacity page of slot storage.
pub struct Page<S> {
    /// Backing storage, `slots_per_page * dim` scalars.
    data: Box<[S]>,
    /// Per-slot link state, one entry per slot.
    links: Box<[SlotLink]>,
}

impl<S: Copy + Default> Page<S> {
    /// Create a zero-initialised page for the given layout.
    pub fn new(layout: &PageLayout) -> Self {
        Self {
            data: vec![S::default(); layout.page_len()].into_boxed_slice(),
            links: vec![SlotLink::Vacant; layout.slots_per_page()].into_boxed_slice(),
        }
    }

    /// Capacity of this page in scalars.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the page has zero capacity (never true for a laid-out page).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scalars of the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the slot lies outside the page.
    pub fn slot(&self, index: u32, dim: usize) -> &[S] {
        let start = index as usize * dim;
        &self.data[start..start + dim]
    }

    /// Mutable scalars of the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the slot lies outside the page.
    pub fn slot_mut(&mut self, index: u32, dim: usize) -> &mut [S] {
        let start = index as usize * dim;
        &mut self.data[start..start + dim]
    }

    pub(crate) fn link(&self, index: u32) -> SlotLink {
        self.links[index as usize]
    }

    pub(crate) fn set_link(&mut self, index: u32, link: SlotLink) {
        self.links[index as usize] = link;
    }

    /// Memory usage of the slot storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<S>()
    }
}

/// A stack of [`Page`]s with LIFO-only release.
///
/// Page 0 is the root page; pages `1..` are the grown pages in push order.
pub struct PageChain<S> {
    /// The first page, never released.
    root: Page<S>,
    /// Pages pushed on overflow, most recent last.
    grown: Vec<Page<S>>,
    layout: PageLayout,
}

impl<S: Copy + Default> PageChain<S> {
    /// Create a chain holding only the root page.
    pub fn new(layout: PageLayout) -> Self {
        Self {
            root: Page::new(&layout),
            grown: Vec::new(),
            layout,
        }
    }

    /// Push a fresh page and return its index.
    ///
    /// # Panics
    ///
    /// Panics if the page count would overflow a `u32` page index.
    /// Exhaustion of the global allocator aborts the process.
    pub fn grow(&mut self) -> u32 {
        self.grown.push(Page::new(&self.layout));
        let top = self.top();
        tracing::trace!(
            page = top,
            page_len = self.layout.page_len(),
            "grew page chain"
        );
        top
    }

    /// Release the top page unless it is the root page.
    ///
    /// Returns `true` if a page was released. Callers must only shrink when
    /// the top page holds no live or free-listed slots.
    pub fn shrink(&mut self) -> bool {
        match self.grown.pop() {
            Some(_) => {
                tracing::trace!(page = self.grown.len() + 1, "released page");
                true
            }
            None => false,
        }
    }

    /// Index of the top (most recently pushed) page.
    pub fn top(&self) -> u32 {
        u32::try_from(self.grown.len()).expect("page index overflowed u32")
    }

    /// Whether the top page is the root page.
    pub fn at_root(&self) -> bool {
        self.grown.is_empty()
    }

    /// Number of live pages (always at least 1).
    pub fn page_count(&self) -> usize {
        self.grown.len() + 1
    }

    /// The page geometry shared by every page in the chain.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The page at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` names a page that was never grown or was released.
    pub fn page(&self, index: u32) -> &Page<S> {
        match index {
            0 => &self.root,
            n => self.grown.get(n as usize - 1).unwrap_or_else(|| {
                panic!(
                    "page {n} is not in the chain ({} pages live)",
                    self.page_count()
                )
            }),
        }
    }

    /// The page at `index`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` names a page that was never grown or was released.
    pub fn page_mut(&mut self, index: u32) -> &mut Page<S> {
        let count = self.page_count();
        match index {
            0 => &mut self.root,
            n => self
                .grown
                .get_mut(n as usize - 1)
                .unwrap_or_else(|| panic!("page {n} is not in the chain ({count} pages live)")),
        }
    }

    pub(crate) fn link(&self, slot: Slot) -> SlotLink {
        self.page(slot.page()).link(slot.index())
    }

    pub(crate) fn set_link(&mut self, slot: Slot, link: SlotLink) {
        self.page_mut(slot.page()).set_link(slot.index(), link);
    }

    /// Borrow `src` for reading and `dst` for writing at the same time.
    ///
    /// # Panics
    ///
    /// Panics if `src == dst` or either slot lies outside the chain.
    pub(crate) fn slot_pair(&mut self, src: Slot, dst: Slot) -> (&[S], &mut [S]) {
        assert!(src != dst, "{src} cannot be both source and destination");
        let dim = self.layout.dim();
        if src.page() == dst.page() {
            let data = &mut self.page_mut(src.page()).data;
            let (s, d) = (src.start(dim), dst.start(dim));
            return if s < d {
                let (lo, hi) = data.split_at_mut(d);
                (&lo[s..s + dim], &mut hi[..dim])
            } else {
                let (lo, hi) = data.split_at_mut(s);
                (&hi[..dim], &mut lo[d..d + dim])
            };
        }
        let (src_page, dst_page) = self.page_pair(src.page(), dst.page());
        (src_page.slot(src.index(), dim), dst_page.slot_mut(dst.index(), dim))
    }

    /// Borrow two distinct pages, the first shared and the second mutable.
    fn page_pair(&mut self, a: u32, b: u32) -> (&Page<S>, &mut Page<S>) {
        let (a, b) = (a as usize, b as usize);
        match (a, b) {
            (0, b) => (&self.root, &mut self.grown[b - 1]),
            (a, 0) => (&self.grown[a - 1], &mut self.root),
            (a, b) if a < b => {
                let (lo, hi) = self.grown.split_at_mut(b - 1);
                (&lo[a - 1], &mut hi[0])
            }
            (a, b) => {
                let (lo, hi) = self.grown.split_at_mut(a - 1);
                (&hi[0], &mut lo[b - 1])
            }
        }
    }

    /// Total memory usage of slot storage across all pages, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.root.memory_bytes() + self.grown.iter().map(Page::memory_bytes).sum::<usize>()
    }
}
