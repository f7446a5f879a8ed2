//! Bounds matching for elementwise operations.
//!
//! Every elementwise operation zips two or more same-length containers.
//! [`common_len`] returns that shared length and panics if the lengths
//! disagree; the [`common_len!`](crate::common_len!) macro applies it to
//! anything with a `.len()` method.

/// Return the length shared by all of `lens`.
///
/// # Panics
///
/// Panics if fewer than two lengths are supplied, or if any two differ.
pub fn common_len(lens: &[usize]) -> usize {
    assert!(
        lens.len() >= 2,
        "common_len needs at least two containers, got {}",
        lens.len()
    );
    let first = lens[0];
    for (i, &len) in lens.iter().enumerate().skip(1) {
        assert!(
            len == first,
            "dimension mismatch: operand 0 has {first} components, operand {i} has {len}"
        );
    }
    first
}

/// Common `.len()` of two or more containers, panicking on mismatch.
///
/// ```
/// let a = [1.0, 2.0, 3.0];
/// let b = vec![4.0, 5.0, 6.0];
/// assert_eq!(dvs_core::common_len!(a, b), 3);
/// ```
#[macro_export]
macro_rules! common_len {
    ($first:expr $(, $rest:expr)+ $(,)?) => {
        $crate::dims::common_len(&[$first.len() $(, $rest.len())+])
    };
}
