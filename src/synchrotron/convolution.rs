use crate::math::Scalar;
use crate::quadrature::simpson;
use crate::sweep::linspace;

use super::{EnergyDistribution, Kernel};

/// Uniform grid in `u = ln E` spanning `[lower, upper]` (erg).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogGrid {
    /// Lowest energy.
    pub lower: Scalar,
    /// Highest energy.
    pub upper: Scalar,
    /// Number of nodes including both ends.
    pub points: usize,
}

impl LogGrid {
    /// Node abscissae `u_j = ln E_j`.
    #[must_use]
    pub fn log_nodes(&self) -> Vec<Scalar> {
        linspace(self.lower.ln(), self.upper.ln(), self.points)
    }

    /// Spacing `Δu` between nodes, zero for fewer than two points.
    #[must_use]
    pub fn step(&self) -> Scalar {
        if self.points < 2 {
            0.0
        } else {
            (self.upper.ln() - self.lower.ln()) / (self.points as Scalar - 1.0)
        }
    }
}

/// Result of convolving a distribution with a kernel on a set of target energies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Convolution {
    /// Integration nodes `u_j = ln E_j`.
    pub log_energies: Vec<Scalar>,
    /// Node spacing `Δu`.
    pub step: Scalar,
    /// `∫ E N(E) K(E, target_i) du` per target, by composite Simpson.
    pub integrated: Vec<Scalar>,
    /// Un-integrated contributions `Δu · E_j N(E_j) K(E_j, target_i)`, indexed `[i][j]`.
    pub bin_contributions: Vec<Vec<Scalar>>,
    /// `E_k N(E_k) K(E_k, target_i)` for each representative energy, indexed `[k][i]`.
    pub representative: Vec<Vec<Scalar>>,
}

/// Convolves `distribution` with `kernel` in log-energy space.
///
/// With `u = ln E`, `dE = E du`, so the integrand on the grid is
/// `e^u N(e^u) K(e^u, target, field)`. Representative energies are evaluated point-wise
/// with the same integrand, without quadrature weights, so they can be overlaid on the
/// integrated curve.
pub fn convolve<D, K>(
    distribution: &D,
    kernel: &K,
    field: Scalar,
    targets: &[Scalar],
    grid: &LogGrid,
    representative_energies: &[Scalar],
) -> Convolution
where
    D: EnergyDistribution + ?Sized,
    K: Kernel + ?Sized,
{
    let log_energies = grid.log_nodes();
    let step = grid.step();
    let nodes: Vec<(Scalar, Scalar)> = log_energies
        .iter()
        .map(|&u| {
            let energy = u.exp();
            (energy, energy * distribution.density(energy))
        })
        .collect();

    let mut integrated = Vec::with_capacity(targets.len());
    let mut bin_contributions = Vec::with_capacity(targets.len());
    for &target in targets {
        let row: Vec<Scalar> = nodes
            .iter()
            .map(|&(energy, weight)| {
                if weight == 0.0 { 0.0 } else { weight * kernel.evaluate(energy, target, field) }
            })
            .collect();
        integrated.push(simpson(&row, step));
        bin_contributions.push(row.into_iter().map(|y| step * y).collect());
    }

    let representative = representative_energies
        .iter()
        .map(|&energy| {
            let weight = energy * distribution.density(energy);
            targets
                .iter()
                .map(|&target| weight * kernel.evaluate(energy, target, field))
                .collect()
        })
        .collect();

    Convolution { log_energies, step, integrated, bin_contributions, representative }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Unit;

    impl Kernel for Unit {
        fn evaluate(&self, _electron_energy: Scalar, _photon_energy: Scalar, _field: Scalar) -> Scalar {
            1.0
        }
    }

    struct Delta;

    impl Kernel for Delta {
        fn evaluate(&self, electron_energy: Scalar, photon_energy: Scalar, _field: Scalar) -> Scalar {
            if electron_energy < photon_energy { 1.0 } else { 0.0 }
        }
    }

    #[test]
    fn power_law_integral_matches_closed_form() {
        // ∫₁^e¹⁰ E · E^{-2} dE = 1 − e^{-10}
        let n = |e: f64| e.powi(-2);
        let grid = LogGrid { lower: 1.0, upper: 10f64.exp(), points: 801 };
        let conv = convolve(&n, &Unit, 1.0, &[1.0], &grid, &[]);
        assert_relative_eq!(conv.integrated[0], 1.0 - (-10f64).exp(), max_relative = 1e-8);
    }

    #[test]
    fn bin_contributions_sum_close_to_integral() {
        let n = |e: f64| e.powi(-2);
        let grid = LogGrid { lower: 1.0, upper: 100.0, points: 2001 };
        let conv = convolve(&n, &Unit, 1.0, &[1.0, 2.0], &grid, &[]);
        assert_eq!(conv.bin_contributions.len(), 2);
        assert_eq!(conv.bin_contributions[0].len(), 2001);
        let riemann: f64 = conv.bin_contributions[0].iter().sum();
        assert_relative_eq!(riemann, conv.integrated[0], max_relative = 1e-2);
    }

    #[test]
    fn kernel_sees_each_target() {
        let n = |_e: f64| 1.0;
        let grid = LogGrid { lower: 1.0, upper: 100.0, points: 5 };
        let conv = convolve(&n, &Delta, 1.0, &[0.5, 1.0e3], &grid, &[3.0]);
        assert_eq!(conv.integrated[0], 0.0);
        assert!(conv.integrated[1] > 0.0);
        assert_eq!(conv.representative, vec![vec![0.0, 3.0]]);
    }

    #[test]
    fn step_matches_nodes() {
        let grid = LogGrid { lower: 1.0, upper: 1.0e4, points: 9 };
        let nodes = grid.log_nodes();
        assert_relative_eq!(nodes[1] - nodes[0], grid.step(), max_relative = 1e-12);
        assert_eq!(LogGrid { points: 1, ..grid }.step(), 0.0);
    }
}
