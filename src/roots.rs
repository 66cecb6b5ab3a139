//! Scalar root finding.

use crate::math::Scalar;

/// Stopping criteria for [`newton_bracketed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootOptions {
    /// Absolute tolerance on the abscissa.
    pub tolerance: Scalar,
    /// Hard cap on function evaluations after the initial bracket check.
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self { tolerance: 1.0e-12, max_iterations: 100 }
    }
}

/// Outcome of a root search. `root` is always inside the initial bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootReport {
    /// Best estimate of the root.
    pub root: Scalar,
    /// Iterations spent.
    pub iterations: usize,
    /// Whether the tolerance was met.
    pub converged: bool,
}

/// Newton's method safeguarded by bisection on the bracket `[lo, hi]`.
///
/// `f` returns the value and the derivative at a point. A Newton step that would leave
/// the current bracket, or that shrinks the step less than bisection would, is replaced
/// by a bisection step, so the iteration cannot diverge. When `f(lo)` and `f(hi)` share a
/// sign the endpoint with the smaller residual is reported as not converged.
pub fn newton_bracketed<F>(mut f: F, lo: Scalar, hi: Scalar, guess: Scalar, options: RootOptions) -> RootReport
where
    F: FnMut(Scalar) -> (Scalar, Scalar),
{
    let (f_lo, _) = f(lo);
    let (f_hi, _) = f(hi);
    if f_lo == 0.0 {
        return RootReport { root: lo, iterations: 0, converged: true };
    }
    if f_hi == 0.0 {
        return RootReport { root: hi, iterations: 0, converged: true };
    }
    if f_lo.is_nan() || f_hi.is_nan() || f_lo.signum() == f_hi.signum() {
        let root = if f_lo.abs() <= f_hi.abs() { lo } else { hi };
        return RootReport { root, iterations: 0, converged: false };
    }

    // Orient so that f(neg) < 0 < f(pos).
    let (mut neg, mut pos) = if f_lo < 0.0 { (lo, hi) } else { (hi, lo) };
    let mut x = if guess.is_finite() { guess.clamp(lo.min(hi), lo.max(hi)) } else { 0.5 * (lo + hi) };
    let mut dx_old = (hi - lo).abs();
    let mut dx = dx_old;
    let (mut fx, mut dfx) = f(x);

    for iteration in 1..=options.max_iterations {
        if fx == 0.0 {
            return RootReport { root: x, iterations: iteration - 1, converged: true };
        }
        let newton_leaves_bracket = ((x - pos) * dfx - fx) * ((x - neg) * dfx - fx) > 0.0;
        let newton_too_slow = (2.0 * fx).abs() > (dx_old * dfx).abs();
        if !dfx.is_finite() || newton_leaves_bracket || newton_too_slow {
            dx_old = dx;
            dx = 0.5 * (pos - neg);
            x = neg + dx;
        } else {
            dx_old = dx;
            dx = fx / dfx;
            let previous = x;
            x -= dx;
            if previous == x {
                return RootReport { root: x, iterations: iteration, converged: true };
            }
        }
        if dx.abs() < options.tolerance {
            return RootReport { root: x, iterations: iteration, converged: true };
        }
        (fx, dfx) = f(x);
        if fx.is_nan() {
            break;
        }
        if fx < 0.0 {
            neg = x;
        } else {
            pos = x;
        }
    }
    RootReport { root: x, iterations: options.max_iterations, converged: false }
}
