//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`SpaceId`] allocation.
static SPACE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a vector space.
///
/// Allocated from a monotonic atomic counter via [`SpaceId::next`]. Two
/// distinct spaces always have different IDs, even if they share scalar
/// type and dimension. Handles compare IDs to reject copies between
/// spaces, and diagnostics print them to say which pool was misused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(u64);

impl SpaceId {
    /// Allocate a fresh, unique space ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process.
    pub fn next() -> Self {
        Self(SPACE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "space#{}", self.0)
    }
}
