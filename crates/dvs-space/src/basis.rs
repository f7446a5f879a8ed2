//! Cached zero vector and standard basis.

use dvs_core::Scalar;
use dvs_pool::{Slot, SlotAllocator};
use smallvec::SmallVec;

/// The `dim + 1` slots a space precomputes: index 0 holds the zero vector,
/// index `k + 1` the one-hot vector along axis `k`.
///
/// The slots are allocated first thing in a fresh pool, so releasing them
/// in reverse order retracts the bump cursor all the way back to the start.
pub(crate) struct BasisCache {
    slots: SmallVec<[Slot; 8]>,
}

impl BasisCache {
    /// Allocate and fill the zero vector, then each basis vector.
    pub(crate) fn build<S: Scalar>(pool: &mut SlotAllocator<S>) -> Self {
        let dim = pool.dim();
        let mut slots = SmallVec::with_capacity(dim + 1);

        let zero = pool.allocate();
        pool.values_mut(zero).fill(S::zero());
        slots.push(zero);

        for axis in 0..dim {
            let slot = pool.allocate();
            let values = pool.values_mut(slot);
            values.fill(S::zero());
            values[axis] = S::one();
            slots.push(slot);
        }
        Self { slots }
    }

    pub(crate) fn zero(&self) -> Slot {
        self.slots[0]
    }

    /// # Panics
    ///
    /// Panics if `axis` is not below the dimension.
    pub(crate) fn axis(&self, axis: usize) -> Slot {
        let dim = self.slots.len() - 1;
        assert!(
            axis < dim,
            "basis index {axis} out of range for dimension {dim}"
        );
        self.slots[axis + 1]
    }

    /// Number of cached slots (`dim + 1`).
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Release every cached slot, basis vectors last-to-first, then zero.
    pub(crate) fn release<S: Scalar>(&mut self, pool: &mut SlotAllocator<S>) {
        while let Some(slot) = self.slots.pop() {
            pool.deallocate(slot);
        }
    }
}
