//! Sample-grid builders shared by the engines.

use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` samples spaced evenly in log10 between `10^log_start` and `10^log_stop`.
///
/// The endpoints are given as exponents, so the grid can span hundreds of decades
/// without the caller ever forming the intermediate values.
#[must_use]
pub fn logspace(log_start: Scalar, log_stop: Scalar, n: usize) -> Vec<Scalar> {
    linspace(log_start, log_stop, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Generates `n` logarithmically spaced samples between `start` and `stop`.
/// Both ends must be positive; otherwise the interior samples are NaN.
#[must_use]
pub fn geomspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => logspace(start.log10(), stop.log10(), n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn logspace_hits_decades() {
        let v = logspace(0.0, 3.0, 4);
        assert_relative_eq!(v[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(v[1], 10.0, max_relative = 1e-12);
        assert_relative_eq!(v[3], 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn geomspace_single_sample_is_start() {
        assert_eq!(geomspace(5.0, 50.0, 1), vec![5.0]);
        let v = geomspace(1.0e6, 1.0e12, 3);
        assert_relative_eq!(v[1], 1.0e9, max_relative = 1e-12);
    }
}
