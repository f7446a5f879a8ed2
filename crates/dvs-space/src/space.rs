//! The user-facing vector pool.
//!
//! [`Space`] owns one [`SlotAllocator`] and the basis cache. Vectors are
//! created through it and hold a shared borrow of it for their whole
//! lifetime; all pool mutation goes through a `RefCell`, one short borrow
//! per operation.

use std::cell::RefCell;
use std::fmt;

use dvs_core::{DvsError, Scalar, SpaceId};
use dvs_pool::{PoolConfig, PoolStats, Slot, SlotAllocator};

use crate::basis::BasisCache;
use crate::vector::{Vector, VectorRef};

/// A pool of storage for vectors of width `dim` over scalar `S`.
///
/// # Lifecycle
///
/// A space lives until it is dropped. Every [`Vector`] borrows its space,
/// so a space cannot be moved or dropped while any vector from it is alive.
/// On drop the cached basis is released and the pool checks that no slot
/// is still outstanding; a vector leaked with `mem::forget` trips that
/// check and panics.
pub struct Space<S: Scalar> {
    id: SpaceId,
    dim: usize,
    config: PoolConfig,
    pool: RefCell<SlotAllocator<S>>,
    basis: BasisCache,
}

impl<S: Scalar> Space<S> {
    /// Create a space for vectors of width `dim` with the default page size.
    ///
    /// # Panics
    ///
    /// Panics if `dim == 0` or a slot of `dim` scalars cannot hold a
    /// free-list link (see [`Space::try_with_config`]).
    pub fn new(dim: usize) -> Self {
        Self::with_config(dim, PoolConfig::default())
    }

    /// Create a space with an explicit pool configuration.
    ///
    /// # Panics
    ///
    /// Panics on any error [`Space::try_with_config`] would return.
    pub fn with_config(dim: usize, config: PoolConfig) -> Self {
        Self::try_with_config(dim, config)
            .unwrap_or_else(|err| panic!("cannot create a {dim}-dimensional space: {err}"))
    }

    /// Create a space for vectors of width `dim` with the default page size.
    ///
    /// # Errors
    ///
    /// See [`Space::try_with_config`].
    pub fn try_new(dim: usize) -> Result<Self, DvsError> {
        Self::try_with_config(dim, PoolConfig::default())
    }

    /// Create a space, validating the dimension and configuration.
    ///
    /// The zero vector and the `dim` standard basis vectors are allocated
    /// and filled before this returns.
    ///
    /// # Errors
    ///
    /// - [`DvsError::ZeroDimension`] if `dim == 0`.
    /// - [`DvsError::SlotTooNarrow`] if `dim` scalars cannot hold a
    ///   free-list link.
    /// - [`DvsError::InvalidConfig`] if `config.page_bytes` is too small.
    pub fn try_with_config(dim: usize, config: PoolConfig) -> Result<Self, DvsError> {
        let mut pool = SlotAllocator::new(dim, &config)?;
        let basis = BasisCache::build(&mut pool);
        let id = SpaceId::next();
        tracing::debug!(
            space = %id,
            dim,
            page_len = pool.layout().page_len(),
            "created space"
        );
        Ok(Self {
            id,
            dim,
            config,
            pool: RefCell::new(pool),
            basis,
        })
    }

    /// Vector width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Unique identifier of this space.
    pub fn id(&self) -> SpaceId {
        self.id
    }

    /// The configuration this space was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// The cached zero vector.
    pub fn zero(&self) -> VectorRef<'_, S> {
        VectorRef::new(self, self.basis.zero())
    }

    /// The cached standard basis vector along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= dim`.
    pub fn basis(&self, axis: usize) -> VectorRef<'_, S> {
        VectorRef::new(self, self.basis.axis(axis))
    }

    /// Build a vector from exactly `dim` values.
    ///
    /// # Panics
    ///
    /// Panics if `values` yields more or fewer than `dim` items.
    pub fn make<I>(&self, values: I) -> Vector<'_, S>
    where
        I: IntoIterator<Item = S>,
    {
        self.try_make(values).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Build a vector from exactly `dim` values.
    ///
    /// The iterator may read other vectors of this space.
    ///
    /// # Errors
    ///
    /// Returns [`DvsError::DimensionMismatch`] if `values` yields more or
    /// fewer than `dim` items. No slot stays allocated on error.
    pub fn try_make<I>(&self, values: I) -> Result<Vector<'_, S>, DvsError>
    where
        I: IntoIterator<Item = S>,
    {
        let mut out = self.alloc();
        let mut count = 0;
        for value in values {
            if count == self.dim {
                return Err(DvsError::DimensionMismatch {
                    expected: self.dim,
                    actual: count + 1,
                });
            }
            out.set(count, value);
            count += 1;
        }
        if count != self.dim {
            return Err(DvsError::DimensionMismatch {
                expected: self.dim,
                actual: count,
            });
        }
        Ok(out)
    }

    /// Build a vector whose component `i` is `f(i)`.
    pub fn make_with(&self, mut f: impl FnMut(usize) -> S) -> Vector<'_, S> {
        let mut out = self.alloc();
        for i in 0..self.dim {
            let value = f(i);
            out.set(i, value);
        }
        out
    }

    /// Build a vector with every component set to `value`.
    pub fn filled(&self, value: S) -> Vector<'_, S> {
        let mut out = self.alloc();
        out.fill(value);
        out
    }

    /// A handle that owns no slot yet.
    ///
    /// Useful as the target of a later `copy_from` or assignment.
    pub fn detached(&self) -> Vector<'_, S> {
        Vector::detached(self)
    }

    /// Number of vectors handed out and not yet released, excluding the
    /// cached basis.
    pub fn outstanding(&self) -> usize {
        self.live() - self.basis.len()
    }

    /// Raw live-slot count of the pool, including the cached basis.
    pub fn live(&self) -> usize {
        self.pool.borrow().live()
    }

    /// Number of pages currently backing the pool.
    pub fn page_count(&self) -> usize {
        self.pool.borrow().page_count()
    }

    /// Capacity of one page in slots.
    pub fn slots_per_page(&self) -> usize {
        self.pool.borrow().slots_per_page()
    }

    /// Length of the pool's free list.
    pub fn free_len(&self) -> usize {
        self.pool.borrow().free_len()
    }

    /// Memory used by slot storage, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.pool.borrow().memory_bytes()
    }

    /// Snapshot of the pool's allocation statistics.
    pub fn stats(&self) -> PoolStats {
        self.pool.borrow().stats()
    }

    /// Reset the pool's statistics counters.
    pub fn reset_stats(&self) {
        self.pool.borrow_mut().reset_stats();
    }

    /// A handle to a freshly allocated slot with unspecified contents.
    pub(crate) fn alloc(&self) -> Vector<'_, S> {
        let slot = self.pool.borrow_mut().allocate();
        Vector::attached(self, slot)
    }

    pub(crate) fn allocate(&self) -> Slot {
        self.pool.borrow_mut().allocate()
    }

    pub(crate) fn deallocate(&self, slot: Slot) {
        self.pool.borrow_mut().deallocate(slot);
    }

    /// Run `f` over the scalars of `slot`.
    ///
    /// Shared borrows nest, so `f` may read other vectors of this space.
    pub(crate) fn read<R>(&self, slot: Slot, f: impl FnOnce(&[S]) -> R) -> R {
        f(self.pool.borrow().values(slot))
    }

    /// Run `f` over the scalars of `slot`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `f` touches any vector of this space.
    pub(crate) fn write<R>(&self, slot: Slot, f: impl FnOnce(&mut [S]) -> R) -> R {
        f(self.pool.borrow_mut().values_mut(slot))
    }

    /// `dst[i] = f(dst[i], src[i])` for every component.
    ///
    /// `src` may belong to another space of the same dimension.
    pub(crate) fn zip_with(&self, dst: Slot, src: VectorRef<'_, S>, f: impl FnMut(S, S) -> S) {
        if std::ptr::eq(self, src.space()) {
            self.pool.borrow_mut().zip_with(dst, src.slot(), f);
            return;
        }
        let other = src.space().pool.borrow();
        let from = other.values(src.slot());
        let mut pool = self.pool.borrow_mut();
        let mut f = f;
        for (d, &s) in pool.values_mut(dst).iter_mut().zip(from) {
            *d = f(*d, s);
        }
    }

    /// Copy `src` into `dst`. Both slots must belong to this space.
    pub(crate) fn copy(&self, src: Slot, dst: Slot) {
        self.pool.borrow_mut().copy(src, dst);
    }
}

impl<S: Scalar> Drop for Space<S> {
    fn drop(&mut self) {
        let pool = self.pool.get_mut();
        self.basis.release(pool);
        let live = pool.live();
        tracing::debug!(space = %self.id, live, pages = pool.page_count(), "dropping space");
        if live != 0 && !std::thread::panicking() {
            panic!(
                "{} dropped with {live} outstanding vector(s); every vector must be released before its space",
                self.id
            );
        }
    }
}

impl<S: Scalar> fmt::Debug for Space<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pool = self.pool.borrow();
        f.debug_struct("Space")
            .field("id", &self.id)
            .field("dim", &self.dim)
            .field("live", &pool.live())
            .field("pages", &pool.page_count())
            .finish()
    }
}
