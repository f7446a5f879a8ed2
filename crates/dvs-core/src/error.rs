//! Validation errors for space construction and vector creation.
//!
//! Misuse of a live space (detached handles, double release, outstanding
//! handles at teardown) is a contract violation and panics at the point of
//! detection. The errors here cover the inputs a caller can check up front
//! through the `try_*` entry points; the panicking entry points format the
//! same variants into their panic message.

use thiserror::Error;

/// Errors reported by the fallible constructors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DvsError {
    /// A space must hold vectors of at least one component.
    #[error("dimension must be at least 1")]
    ZeroDimension,

    /// A slot is too narrow to hold a free-list link.
    #[error(
        "slot of {dim} x {scalar_bytes}-byte scalars cannot hold a {link_bytes}-byte free-list link"
    )]
    SlotTooNarrow {
        /// Requested vector width.
        dim: usize,
        /// Size of one scalar in bytes.
        scalar_bytes: usize,
        /// Size of one free-list link in bytes.
        link_bytes: usize,
    },

    /// A value sequence did not match the space's dimension.
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch {
        /// The space's dimension.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// Pool configuration rejected at construction.
    #[error("invalid pool configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}
