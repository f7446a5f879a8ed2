//! Paged slot allocator for fixed-width vector storage.
//!
//! Hands out equal-size slots of `dim` scalars from a stack of fixed-size
//! pages, reclaims them through a hybrid bump/free-list scheme, and shrinks
//! the page stack back down whenever usage returns to LIFO order.
//!
//! # Architecture
//!
//! ```text
//! SlotAllocator (bump cursor, free-list head, live counter)
//! └── PageChain
//!     ├── root Page (created with the pool, never released)
//!     └── grown Page[] (pushed on overflow, popped once empty)
//!         ├── data: Box<[S]>        (slots_per_page * dim scalars)
//!         └── links: Box<[SlotLink]> (Vacant | Live | Free { next })
//! ```
//!
//! # Slot states
//!
//! - **Vacant:** above the bump cursor, never handed out since the last
//!   retraction.
//! - **Live:** owned by exactly one caller.
//! - **Free:** released out of LIFO order; threaded on the free list and
//!   handed out again before the cursor advances.
//!
//! Releasing the slot directly below the cursor retracts the cursor and
//! runs the *unwind*: adjacent free-list heads are merged back into the
//! frontier and emptied pages are released.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod config;
pub mod page;
pub mod slot;
pub mod stats;

// Public re-exports for the primary API surface.
pub use allocator::SlotAllocator;
pub use config::{PageLayout, PoolConfig};
pub use page::PageChain;
pub use slot::Slot;
pub use stats::PoolStats;
