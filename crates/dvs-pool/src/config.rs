//! Pool configuration and derived page geometry.

use std::mem::size_of;

use dvs_core::DvsError;

use crate::slot::Slot;

/// Configuration for a slot pool.
///
/// Validated when a pool is built; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Target size of one page in bytes, including its back-link.
    ///
    /// Default: 4096. Must leave room for the back-link plus at least one
    /// scalar. Pages always hold at least one slot, so a dimension wider
    /// than a page gets single-slot pages rather than an error.
    pub page_bytes: usize,
}

impl PoolConfig {
    /// Default page size in bytes.
    pub const DEFAULT_PAGE_BYTES: usize = 4096;

    /// Bytes reserved per page for the link to the previous page.
    pub const BACK_LINK_BYTES: usize = size_of::<usize>();

    /// Create a config with the default page size.
    pub fn new() -> Self {
        Self {
            page_bytes: Self::DEFAULT_PAGE_BYTES,
        }
    }

    /// Create a config with the given page size in bytes.
    pub fn with_page_bytes(page_bytes: usize) -> Self {
        Self { page_bytes }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Page geometry for one scalar type and dimension.
///
/// `page_len` is always a non-zero multiple of `dim`, so no slot straddles
/// a page boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    dim: usize,
    page_len: usize,
    /// `page_len / dim`, checked to fit a slot index.
    slot_capacity: u32,
}

impl PageLayout {
    /// Derive the page geometry for scalars of type `S` and width `dim`.
    ///
    /// # Errors
    ///
    /// - [`DvsError::ZeroDimension`] if `dim == 0`.
    /// - [`DvsError::SlotTooNarrow`] if a slot cannot hold a free-list link.
    /// - [`DvsError::InvalidConfig`] if `page_bytes` cannot fit the back-link
    ///   and one scalar, or if the slots per page do not fit a `u32` index.
    pub fn new<S>(dim: usize, config: &PoolConfig) -> Result<Self, DvsError> {
        if dim == 0 {
            return Err(DvsError::ZeroDimension);
        }
        let scalar_bytes = size_of::<S>();
        if scalar_bytes == 0 {
            return Err(DvsError::InvalidConfig {
                reason: "zero-sized scalar types cannot be pooled".to_string(),
            });
        }
        let slot_bytes = dim.saturating_mul(scalar_bytes);
        if slot_bytes < size_of::<Slot>() {
            return Err(DvsError::SlotTooNarrow {
                dim,
                scalar_bytes,
                link_bytes: size_of::<Slot>(),
            });
        }
        let usable = config
            .page_bytes
            .checked_sub(PoolConfig::BACK_LINK_BYTES)
            .filter(|&bytes| bytes >= scalar_bytes)
            .ok_or_else(|| DvsError::InvalidConfig {
                reason: format!(
                    "page_bytes must exceed the {}-byte back-link by at least one {}-byte scalar (got {})",
                    PoolConfig::BACK_LINK_BYTES,
                    scalar_bytes,
                    config.page_bytes,
                ),
            })?;

        let slots = (usable / scalar_bytes / dim).max(1);
        let slot_capacity = u32::try_from(slots).map_err(|_| DvsError::InvalidConfig {
            reason: format!(
                "page_bytes {} gives {slots} slots per page, more than a 32-bit slot index can address",
                config.page_bytes
            ),
        })?;
        Ok(Self {
            dim,
            page_len: slots * dim,
            slot_capacity,
        })
    }

    /// Vector width in scalars.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Capacity of one page in scalars.
    pub fn page_len(&self) -> usize {
        self.page_len
    }

    /// Number of slots per page.
    pub fn slots_per_page(&self) -> usize {
        self.page_len / self.dim
    }

    /// Number of slots per page, as a slot index bound.
    pub fn slot_capacity(&self) -> u32 {
        self.slot_capacity
    }
}
