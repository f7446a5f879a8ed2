//! Core types and traits for pooled fixed-dimension vector spaces.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the allocator and the space layer: the [`Scalar`]
//! bound, space identifiers, validation errors, and the bounds-matching
//! helper used by every elementwise operation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dims;
pub mod error;
pub mod id;
pub mod scalar;

pub use dims::common_len;
pub use error::DvsError;
pub use id::SpaceId;
pub use scalar::Scalar;
