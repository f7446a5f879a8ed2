//! Reductions and Euclidean metrics.
//!
//! [`Metric`] is implemented for every [`AsView`] type, so the same calls
//! work on `Vector`, `&Vector` and `VectorRef`. Methods that need square
//! roots are restricted to `S: Float`.

use num_traits::Float;

use dvs_core::Scalar;

use crate::vector::{AsView, Vector};

/// Dot products, norms and distances.
pub trait Metric<S: Scalar>: AsView<S> {
    /// Sum of the componentwise products.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    fn dot<R: AsView<S>>(&self, rhs: R) -> S {
        let (a, b) = (self.view(), rhs.view());
        dvs_core::common_len!(a, b);
        a.iter()
            .zip(b.iter())
            .fold(S::zero(), |acc, (x, y)| acc + x * y)
    }

    /// Sum of the components.
    fn sum(&self) -> S {
        self.view().iter().fold(S::zero(), |acc, x| acc + x)
    }

    /// Product of the components.
    fn product(&self) -> S {
        self.view().iter().fold(S::one(), |acc, x| acc * x)
    }

    /// Squared Euclidean norm, `self · self`.
    fn norm_squared(&self) -> S {
        self.view().iter().fold(S::zero(), |acc, x| acc + x * x)
    }

    /// Squared Euclidean distance to `rhs`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    fn distance_squared<R: AsView<S>>(&self, rhs: R) -> S {
        let (a, b) = (self.view(), rhs.view());
        dvs_core::common_len!(a, b);
        a.iter().zip(b.iter()).fold(S::zero(), |acc, (x, y)| {
            let d = x - y;
            acc + d * d
        })
    }

    /// Euclidean length.
    fn length(&self) -> S
    where
        S: Float,
    {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to `rhs`.
    fn distance<R: AsView<S>>(&self, rhs: R) -> S
    where
        S: Float,
    {
        self.distance_squared(rhs).sqrt()
    }

    /// A new unit vector pointing the same way, in the same space.
    ///
    /// # Panics
    ///
    /// Panics if the vector has zero length.
    fn normalize(&self) -> Vector<'_, S>
    where
        S: Float,
    {
        self.decompose().1
    }

    /// Split into length and unit direction.
    ///
    /// # Panics
    ///
    /// Panics if the vector has zero length.
    fn decompose(&self) -> (S, Vector<'_, S>)
    where
        S: Float,
    {
        let view = self.view();
        let length = self.length();
        assert!(
            length != S::zero(),
            "cannot normalize a zero-length vector"
        );
        (length, view.to_vector().div_scalar(length))
    }
}

impl<S: Scalar, T: AsView<S> + ?Sized> Metric<S> for T {}
