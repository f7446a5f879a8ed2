//! Owning vector handles and read-only views.
//!
//! A [`Vector`] owns exactly one slot of its [`Space`] (or none, when
//! detached) and gives it back on drop. A [`VectorRef`] is a `Copy` view of
//! a slot owned by someone else: a vector, or the space's basis cache.
//!
//! Component access goes through the space's pool one element at a time, so
//! iterators and closures may freely read other vectors of the same space.
//! The slice-based accessors [`Vector::with_values`] and
//! [`Vector::with_values_mut`] hold the pool borrow for the closure's
//! duration instead.

use std::fmt;
use std::iter::FusedIterator;

use dvs_core::Scalar;
use dvs_pool::Slot;

use crate::space::Space;

/// Anything that can lend a read-only view of a live slot.
///
/// Every arithmetic operator and [`Metric`](crate::Metric) method takes its
/// right-hand operand through this trait, so `Vector`, `&Vector` and
/// `VectorRef` mix freely.
pub trait AsView<S: Scalar> {
    /// Borrow a view of the underlying slot.
    ///
    /// # Panics
    ///
    /// Panics if the underlying handle is detached.
    fn view(&self) -> VectorRef<'_, S>;
}

impl<S: Scalar, T: AsView<S> + ?Sized> AsView<S> for &T {
    fn view(&self) -> VectorRef<'_, S> {
        (**self).view()
    }
}

fn check_index(index: usize, dim: usize) {
    assert!(
        index < dim,
        "index {index} out of range for vector of dimension {dim}"
    );
}

// ── Vector ──────────────────────────────────────────────────────────

/// An owning handle to one slot of a [`Space`].
///
/// The handle borrows its space for `'s`, so the space outlives every
/// vector it created. Cloning allocates a fresh slot; moving does not touch
/// the pool at all.
///
/// # Detached handles
///
/// [`Vector::take`], [`Vector::release`] and [`Space::detached`] produce a
/// handle that owns no slot. It can be dropped, assigned into with
/// [`Vector::copy_from`] or [`Clone::clone_from`], or queried with
/// [`Vector::is_detached`]; reading or writing its values panics.
pub struct Vector<'s, S: Scalar> {
    space: &'s Space<S>,
    slot: Option<Slot>,
}

impl<'s, S: Scalar> Vector<'s, S> {
    pub(crate) fn attached(space: &'s Space<S>, slot: Slot) -> Self {
        Self {
            space,
            slot: Some(slot),
        }
    }

    pub(crate) fn detached(space: &'s Space<S>) -> Self {
        Self { space, slot: None }
    }

    /// The space this vector belongs to.
    pub fn space(&self) -> &'s Space<S> {
        self.space
    }

    /// Number of components (the space's dimension).
    pub fn len(&self) -> usize {
        self.space.dim()
    }

    /// Always `false`: spaces have at least one dimension.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this handle currently owns no slot.
    pub fn is_detached(&self) -> bool {
        self.slot.is_none()
    }

    fn slot(&self) -> Slot {
        match self.slot {
            Some(slot) => slot,
            None => panic!("use of a detached vector from {}", self.space.id()),
        }
    }

    /// A read-only view of this vector.
    ///
    /// # Panics
    ///
    /// Panics if the handle is detached.
    pub fn view(&self) -> VectorRef<'_, S> {
        VectorRef::new(self.space, self.slot())
    }

    /// Component `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()` or the handle is detached.
    pub fn get(&self, index: usize) -> S {
        self.view().get(index)
    }

    /// Overwrite component `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()` or the handle is detached.
    pub fn set(&mut self, index: usize, value: S) {
        check_index(index, self.len());
        self.space.write(self.slot(), |values| values[index] = value);
    }

    /// Replace component `index` with `f(old)`.
    ///
    /// `f` runs without the pool borrowed and may read other vectors.
    pub fn update(&mut self, index: usize, f: impl FnOnce(S) -> S) {
        let value = f(self.get(index));
        self.set(index, value);
    }

    /// Iterate over the components by value.
    pub fn iter(&self) -> Values<'_, S> {
        self.view().iter()
    }

    /// Copy the components out into a `Vec`.
    pub fn to_vec(&self) -> Vec<S> {
        self.view().to_vec()
    }

    /// Run `f` over the components as a slice.
    ///
    /// `f` may read other vectors of the same space but must not modify any.
    pub fn with_values<R>(&self, f: impl FnOnce(&[S]) -> R) -> R {
        self.view().with_values(f)
    }

    /// Run `f` over the components as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `f` reads or writes any vector of the same space while the
    /// slice is borrowed, or if the handle is detached.
    pub fn with_values_mut<R>(&mut self, f: impl FnOnce(&mut [S]) -> R) -> R {
        self.space.write(self.slot(), f)
    }

    /// Set every component to `value`.
    pub fn fill(&mut self, value: S) {
        self.with_values_mut(|values| values.fill(value));
    }

    /// Replace each component `x` with `f(x)`.
    ///
    /// Components are read and written one at a time, so `f` may read other
    /// vectors of the same space.
    pub fn map_in_place(&mut self, mut f: impl FnMut(S) -> S) {
        for index in 0..self.len() {
            self.update(index, &mut f);
        }
    }

    /// Overwrite this vector's values with `src`'s, reusing this handle's
    /// slot. A detached handle is given a fresh slot first.
    ///
    /// # Panics
    ///
    /// Panics if `src` belongs to a different space, or if `src` is a
    /// detached handle.
    pub fn copy_from<R: AsView<S>>(&mut self, src: R) {
        let src = src.view();
        self.assert_same_space(src.space());
        let dst = match self.slot {
            Some(slot) => slot,
            None => {
                let slot = self.space.allocate();
                self.slot = Some(slot);
                slot
            }
        };
        self.space.copy(src.slot(), dst);
    }

    /// # Panics
    ///
    /// Panics if `other` is not this vector's space.
    fn assert_same_space(&self, other: &Space<S>) {
        assert!(
            std::ptr::eq(self.space, other),
            "space mismatch: cannot assign a {}-dimensional vector of {} into a {}-dimensional vector of {}",
            other.dim(),
            other.id(),
            self.space.dim(),
            self.space.id()
        );
    }

    /// Move the slot out into a new handle, leaving `self` detached.
    ///
    /// No allocation or copy takes place.
    pub fn take(&mut self) -> Vector<'s, S> {
        Self {
            space: self.space,
            slot: self.slot.take(),
        }
    }

    /// Return the slot to the pool now, leaving `self` detached.
    ///
    /// Releasing a detached handle does nothing.
    pub fn release(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.space.deallocate(slot);
        }
    }

    /// `self[i] = f(self[i], rhs[i])` for every component.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ or either side is detached.
    pub(crate) fn zip_assign(&mut self, rhs: VectorRef<'_, S>, f: impl FnMut(S, S) -> S) {
        dvs_core::common_len!(self, rhs);
        self.space.zip_with(self.slot(), rhs, f);
    }
}

impl<S: Scalar> AsView<S> for Vector<'_, S> {
    fn view(&self) -> VectorRef<'_, S> {
        Vector::view(self)
    }
}

impl<S: Scalar> Clone for Vector<'_, S> {
    fn clone(&self) -> Self {
        let mut out = Self::detached(self.space);
        if self.slot.is_some() {
            out.copy_from(self);
        }
        out
    }

    /// Assign `source`'s values, reusing this handle's slot.
    ///
    /// A detached `source` releases this handle's slot instead.
    ///
    /// # Panics
    ///
    /// Panics if `source` belongs to a different space.
    fn clone_from(&mut self, source: &Self) {
        self.assert_same_space(source.space);
        if source.is_detached() {
            self.release();
        } else {
            self.copy_from(source);
        }
    }
}

impl<S: Scalar> Drop for Vector<'_, S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<'a, S: Scalar> IntoIterator for &'a Vector<'_, S> {
    type Item = S;
    type IntoIter = Values<'a, S>;

    fn into_iter(self) -> Values<'a, S> {
        self.iter()
    }
}

impl<S: Scalar, R: AsView<S>> PartialEq<R> for Vector<'_, S> {
    fn eq(&self, other: &R) -> bool {
        self.view().eq(&other.view())
    }
}

impl<S: Scalar> fmt::Debug for Vector<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(slot) => fmt::Debug::fmt(&VectorRef::new(self.space, slot), f),
            None => write!(f, "Vector(detached, {})", self.space.id()),
        }
    }
}

impl<S: Scalar + fmt::Display> fmt::Display for Vector<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(slot) => fmt::Display::fmt(&VectorRef::new(self.space, slot), f),
            None => f.write_str("(detached)"),
        }
    }
}

// ── VectorRef ───────────────────────────────────────────────────────

/// A read-only view of one live slot.
///
/// Views are produced by [`Space::zero`], [`Space::basis`] and
/// [`Vector::view`], and cannot outlive what they view.
pub struct VectorRef<'a, S: Scalar> {
    space: &'a Space<S>,
    slot: Slot,
}

impl<S: Scalar> Clone for VectorRef<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Scalar> Copy for VectorRef<'_, S> {}

impl<'a, S: Scalar> VectorRef<'a, S> {
    pub(crate) fn new(space: &'a Space<S>, slot: Slot) -> Self {
        Self { space, slot }
    }

    pub(crate) fn slot(&self) -> Slot {
        self.slot
    }

    /// The space the viewed slot belongs to.
    pub fn space(&self) -> &'a Space<S> {
        self.space
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.space.dim()
    }

    /// Always `false`: spaces have at least one dimension.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Component `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> S {
        check_index(index, self.len());
        self.space.read(self.slot, |values| values[index])
    }

    /// Iterate over the components by value.
    pub fn iter(&self) -> Values<'a, S> {
        Values {
            space: self.space,
            slot: self.slot,
            front: 0,
            back: self.len(),
        }
    }

    /// Copy the components out into a `Vec`.
    pub fn to_vec(&self) -> Vec<S> {
        self.with_values(<[S]>::to_vec)
    }

    /// Run `f` over the components as a slice.
    pub fn with_values<R>(&self, f: impl FnOnce(&[S]) -> R) -> R {
        self.space.read(self.slot, f)
    }

    /// Copy the viewed values into a new owning vector.
    pub fn to_vector(&self) -> Vector<'a, S> {
        let mut out = Vector::detached(self.space);
        out.copy_from(self);
        out
    }
}

impl<S: Scalar> AsView<S> for VectorRef<'_, S> {
    fn view(&self) -> VectorRef<'_, S> {
        *self
    }
}

impl<'a, S: Scalar> IntoIterator for VectorRef<'a, S> {
    type Item = S;
    type IntoIter = Values<'a, S>;

    fn into_iter(self) -> Values<'a, S> {
        self.iter()
    }
}

impl<S: Scalar, R: AsView<S>> PartialEq<R> for VectorRef<'_, S> {
    fn eq(&self, other: &R) -> bool {
        let other = other.view();
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<S: Scalar> fmt::Debug for VectorRef<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<S: Scalar + fmt::Display> fmt::Display for VectorRef<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(&value, f)?;
        }
        f.write_str(")")
    }
}

// ── Values ──────────────────────────────────────────────────────────

/// Iterator over the components of a vector, by value.
pub struct Values<'a, S: Scalar> {
    space: &'a Space<S>,
    slot: Slot,
    front: usize,
    back: usize,
}

impl<S: Scalar> Iterator for Values<'_, S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some(self.space.read(self.slot, |values| values[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<S: Scalar> DoubleEndedIterator for Values<'_, S> {
    fn next_back(&mut self) -> Option<S> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let index = self.back;
        Some(self.space.read(self.slot, |values| values[index]))
    }
}

impl<S: Scalar> ExactSizeIterator for Values<'_, S> {}

impl<S: Scalar> FusedIterator for Values<'_, S> {}
