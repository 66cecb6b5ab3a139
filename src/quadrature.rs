//! Composite Newton–Cotes rules on uniformly sampled integrands.

use crate::math::Scalar;

/// Trapezoidal rule for samples `y` spaced `dx` apart.
#[must_use]
pub fn trapezoid(y: &[Scalar], dx: Scalar) -> Scalar {
    match y.len() {
        0 | 1 => 0.0,
        n => dx * (0.5 * (y[0] + y[n - 1]) + y[1..n - 1].iter().sum::<Scalar>()),
    }
}

/// Composite Simpson rule for samples `y` spaced `dx` apart.
///
/// An odd sample count uses the classic 1-4-2-…-4-1 weights. An even count averages the
/// two ways of closing the odd panel (trapezoid on the last interval, or on the first),
/// which keeps the rule symmetric under reversal of the samples. Two samples fall back
/// to the trapezoid.
#[must_use]
pub fn simpson(y: &[Scalar], dx: Scalar) -> Scalar {
    let n = y.len();
    if n < 3 {
        return trapezoid(y, dx);
    }
    if n % 2 == 1 {
        return simpson_odd(y, dx);
    }
    let close_last = simpson_odd(&y[..n - 1], dx) + 0.5 * dx * (y[n - 2] + y[n - 1]);
    let close_first = 0.5 * dx * (y[0] + y[1]) + simpson_odd(&y[1..], dx);
    0.5 * (close_last + close_first)
}

fn simpson_odd(y: &[Scalar], dx: Scalar) -> Scalar {
    let n = y.len();
    debug_assert!(n % 2 == 1);
    if n == 1 {
        return 0.0;
    }
    let interior: Scalar = y[1..n - 1]
        .iter()
        .enumerate()
        .map(|(k, v)| if k % 2 == 0 { 4.0 * v } else { 2.0 * v })
        .sum();
    dx / 3.0 * (y[0] + interior + y[n - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::linspace;
    use approx::assert_relative_eq;

    #[test]
    fn simpson_is_exact_for_cubics() {
        let xs = linspace(0.0, 2.0, 11);
        let ys: Vec<_> = xs.iter().map(|x| x * x * x - x + 1.0).collect();
        // ∫₀² (x³ − x + 1) dx = 4 − 2 + 2
        assert_relative_eq!(simpson(&ys, xs[1] - xs[0]), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn simpson_even_count_is_close_for_smooth_integrand() {
        let xs = linspace(0.0, std::f64::consts::PI, 200);
        let ys: Vec<_> = xs.iter().map(|x| x.sin()).collect();
        assert_relative_eq!(simpson(&ys, xs[1] - xs[0]), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn trapezoid_handles_short_inputs() {
        assert_eq!(trapezoid(&[], 1.0), 0.0);
        assert_eq!(trapezoid(&[3.0], 1.0), 0.0);
        assert_relative_eq!(simpson(&[1.0, 3.0], 0.5), 1.0);
    }
}
