//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector3;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Replaces NaN and ±∞ with `fallback`.
#[inline]
#[must_use]
pub fn finite_or(value: Scalar, fallback: Scalar) -> Scalar {
    if value.is_finite() { value } else { fallback }
}

/// Largest finite value in `values`, or `None` when there is none.
#[must_use]
pub fn finite_max(values: &[Scalar]) -> Option<Scalar> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: Scalar| m.max(v))))
}

/// Maps `values` to `log10(v / norm + floor)`.
///
/// A non-finite or non-positive `norm`, or a non-finite ratio, pins the sample to
/// `log10(floor)` so the output is always finite for a positive `floor`.
#[must_use]
pub fn normalized_log10(values: &[Scalar], norm: Scalar, floor: Scalar) -> Vec<Scalar> {
    let usable = norm.is_finite() && norm > 0.0;
    values
        .iter()
        .map(|&v| {
            let ratio = if usable { finite_or(v / norm, 0.0).max(0.0) } else { 0.0 };
            (ratio + floor).log10()
        })
        .collect()
}
