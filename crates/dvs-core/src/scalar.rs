//! The [`Scalar`] bound for vector components.

use std::fmt::Debug;

use num_traits::{Num, NumAssign};

/// Plain numeric data stored in a vector space.
///
/// Scalars are `Copy` (trivially destructible) and `Default`
/// (trivially constructible), so pages can be zero-filled up front and
/// slots can be reused without running any per-element drop logic.
/// The additive and multiplicative identities come from [`num_traits`].
///
/// Implemented automatically for every type meeting the bounds, which
/// covers all primitive integer and floating-point types.
pub trait Scalar: Copy + Default + PartialEq + Debug + Num + NumAssign + 'static {}

impl<T> Scalar for T where T: Copy + Default + PartialEq + Debug + Num + NumAssign + 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn identities<S: Scalar>() -> (S, S) {
        (S::zero(), S::one())
    }

    #[test]
    fn primitive_types_are_scalars() {
        assert_eq!(identities::<f32>(), (0.0, 1.0));
        assert_eq!(identities::<f64>(), (0.0, 1.0));
        assert_eq!(identities::<i32>(), (0, 1));
        assert_eq!(identities::<u8>(), (0, 1));
    }

    #[test]
    fn default_is_additive_identity() {
        assert_eq!(f64::default(), f64::zero());
        assert_eq!(i64::default(), i64::zero());
    }
}
