//! DVS: pooled fixed-dimension vector spaces.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the DVS sub-crates. For most users, adding `dvs` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use dvs::prelude::*;
//!
//! let r3 = Space::<f64>::new(3);
//! let a = r3.make([1.0, 2.0, 3.0]);
//! let b = r3.make([4.0, 5.0, 6.0]);
//!
//! let c = &a + &b;
//! assert_eq!(c.to_vec(), vec![5.0, 7.0, 9.0]);
//! assert_eq!(a.dot(&b), 32.0);
//!
//! let v = r3.make([3.0, 4.0, 0.0]);
//! let (length, unit) = v.decompose();
//! assert_eq!(length, 5.0);
//! assert!((unit.get(0) - 0.6).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dvs-core` | `Scalar`, `SpaceId`, `DvsError`, `common_len` |
//! | [`pool`] | `dvs-pool` | Paged slot allocator, `PoolConfig`, `PoolStats` |
//! | [`space`] | `dvs-space` | `Space`, `Vector`, `VectorRef`, arithmetic, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`dvs-core`).
///
/// Contains the [`types::Scalar`] bound, space identifiers, the
/// [`types::DvsError`] validation error, and the bounds-matching helper.
pub use dvs_core as types;

/// Paged slot allocator (`dvs-pool`).
///
/// Most users only need [`pool::PoolConfig`] and [`pool::PoolStats`] from
/// this module; both are also available in the [`prelude`].
pub use dvs_pool as pool;

/// Spaces, vector handles, arithmetic and metrics (`dvs-space`).
pub use dvs_space as space;

pub use dvs_core::common_len;

/// Common imports for typical DVS usage.
///
/// ```rust
/// use dvs::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use dvs_core::{DvsError, Scalar, SpaceId};

    // Pool configuration and statistics
    pub use dvs_pool::{PoolConfig, PoolStats};

    // Spaces and vectors
    pub use dvs_space::{AsView, Metric, Space, Vector, VectorRef};
}
