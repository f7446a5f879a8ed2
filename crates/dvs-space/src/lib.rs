//! Pooled fixed-dimension vector spaces.
//!
//! A [`Space`] is a pool of storage for vectors of one scalar type and one
//! width. Every [`Vector`] it hands out is an owning handle to one slot of
//! that pool and borrows the space, so the compiler rejects any attempt to
//! drop or move a space while its vectors are alive.
//!
//! ```text
//! Space<S>
//! ├── RefCell<SlotAllocator<S>>   (pages, bump cursor, free list)
//! └── BasisCache                  (zero vector + dim one-hot vectors)
//!
//! Vector<'s, S>    owning handle: &'s Space + Option<Slot>
//! VectorRef<'a, S> read-only view: &'a Space + Slot
//! ```
//!
//! # Example
//!
//! ```
//! use dvs_space::{Metric, Space};
//!
//! let r3 = Space::<f64>::new(3);
//! let a = r3.make([1.0, 2.0, 3.0]);
//! let b = r3.make([4.0, 5.0, 6.0]);
//!
//! assert_eq!((&a + &b).to_vec(), vec![5.0, 7.0, 9.0]);
//! assert_eq!(a.dot(&b), 32.0);
//! assert_eq!(r3.basis(1).to_vec(), vec![0.0, 1.0, 0.0]);
//! ```
//!
//! # Single-threaded by construction
//!
//! The pool sits behind a `RefCell`, so a `Space` is not `Sync` and its
//! vectors cannot be sent to another thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arith;
mod basis;
pub mod metric;
pub mod space;
pub mod vector;

// Public re-exports for the primary API surface.
pub use metric::Metric;
pub use space::Space;
pub use vector::{AsView, Values, Vector, VectorRef};
