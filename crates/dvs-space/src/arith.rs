//! Elementwise arithmetic.
//!
//! `+ - * /` combine two vectors of the same dimension component by
//! component. The left operand decides where the result lives:
//!
//! | left operand   | result                                   |
//! |----------------|------------------------------------------|
//! | `Vector`       | updated in place and returned, no alloc  |
//! | `&Vector`      | a fresh vector in the left operand's space |
//! | `VectorRef`    | a fresh vector in the view's space       |
//!
//! The right operand is anything implementing [`AsView`], and may come
//! from a different space as long as the dimensions match. The `*Assign`
//! forms update the left vector in place.
//!
//! Scalar broadcast is spelled as methods (`mul_scalar` and friends) since
//! the right-hand side of the operators is already generic over views.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use dvs_core::Scalar;

use crate::vector::{AsView, Vector, VectorRef};

macro_rules! elementwise {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl<S: Scalar, R: AsView<S>> $OpAssign<R> for Vector<'_, S> {
            fn $op_assign(&mut self, rhs: R) {
                self.zip_assign(rhs.view(), |a, b| a $sym b);
            }
        }

        impl<'s, S: Scalar, R: AsView<S>> $Op<R> for Vector<'s, S> {
            type Output = Vector<'s, S>;

            fn $op(mut self, rhs: R) -> Vector<'s, S> {
                self.$op_assign(rhs);
                self
            }
        }

        impl<'s, S: Scalar, R: AsView<S>> $Op<R> for &Vector<'s, S> {
            type Output = Vector<'s, S>;

            fn $op(self, rhs: R) -> Vector<'s, S> {
                let mut out = self.clone();
                out.$op_assign(rhs);
                out
            }
        }

        impl<'a, S: Scalar, R: AsView<S>> $Op<R> for VectorRef<'a, S> {
            type Output = Vector<'a, S>;

            fn $op(self, rhs: R) -> Vector<'a, S> {
                let mut out = self.to_vector();
                out.$op_assign(rhs);
                out
            }
        }
    };
}

elementwise!(Add, add, AddAssign, add_assign, +);
elementwise!(Sub, sub, SubAssign, sub_assign, -);
elementwise!(Mul, mul, MulAssign, mul_assign, *);
elementwise!(Div, div, DivAssign, div_assign, /);

impl<'s, S: Scalar + Neg<Output = S>> Neg for Vector<'s, S> {
    type Output = Vector<'s, S>;

    fn neg(mut self) -> Vector<'s, S> {
        self.map_in_place(|x| -x);
        self
    }
}

impl<'s, S: Scalar + Neg<Output = S>> Neg for &Vector<'s, S> {
    type Output = Vector<'s, S>;

    fn neg(self) -> Vector<'s, S> {
        -self.clone()
    }
}

impl<'a, S: Scalar + Neg<Output = S>> Neg for VectorRef<'a, S> {
    type Output = Vector<'a, S>;

    fn neg(self) -> Vector<'a, S> {
        -self.to_vector()
    }
}

impl<S: Scalar> Vector<'_, S> {
    /// Add `k` to every component.
    #[must_use]
    pub fn add_scalar(mut self, k: S) -> Self {
        self.map_in_place(|x| x + k);
        self
    }

    /// Subtract `k` from every component.
    #[must_use]
    pub fn sub_scalar(mut self, k: S) -> Self {
        self.map_in_place(|x| x - k);
        self
    }

    /// Multiply every component by `k`.
    #[must_use]
    pub fn mul_scalar(mut self, k: S) -> Self {
        self.map_in_place(|x| x * k);
        self
    }

    /// Divide every component by `k`.
    ///
    /// Integer division by zero panics as usual.
    #[must_use]
    pub fn div_scalar(mut self, k: S) -> Self {
        self.map_in_place(|x| x / k);
        self
    }

    /// Replace every component `x` with `1 / x`.
    #[must_use]
    pub fn recip(mut self) -> Self {
        self.map_in_place(|x| S::one() / x);
        self
    }
}
