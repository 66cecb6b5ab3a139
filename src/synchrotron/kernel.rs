use crate::constants::PhysicalConstants;
use crate::math::{finite_or, Scalar};
use crate::special::bessel_k_third_pair;

/// Single-particle emission kernel `(electron energy, photon energy, field) → flux`.
///
/// Energies are in erg, the field in gauss. Implementations return a finite,
/// non-negative value for every positive input.
pub trait Kernel {
    /// Emitted photon number per unit photon energy per unit time.
    fn evaluate(&self, electron_energy: Scalar, photon_energy: Scalar, field: Scalar) -> Scalar;
}

/// Pitch-angle-averaged synchrotron kernel (Crusius & Schlickeiser 1986, Aharonian
/// et al. 2010, eq. 13).
#[derive(Debug, Clone, Copy)]
pub struct SynchrotronKernel {
    rest_energy: Scalar,
    critical_field: Scalar,
    prefactor: Scalar,
}

impl SynchrotronKernel {
    /// Builds the kernel from a constants table, caching the derived quantities.
    #[must_use]
    pub fn new(constants: &PhysicalConstants) -> Self {
        let rest_energy = constants.electron_rest_energy();
        let prefactor = 2.0 * 3.0_f64.sqrt() / 9.0 * constants.fine_structure * rest_energy.powi(4) / constants.planck;
        Self { rest_energy, critical_field: constants.critical_field(), prefactor }
    }

    /// Dimensionless argument `x_c = mₑc² E_ph / (3 (B/B_c) E_el²)` of the Bessel terms.
    #[inline]
    #[must_use]
    pub fn critical_ratio(&self, electron_energy: Scalar, photon_energy: Scalar, field: Scalar) -> Scalar {
        self.rest_energy * photon_energy / (3.0 * field / self.critical_field * electron_energy * electron_energy)
    }
}

impl Kernel for SynchrotronKernel {
    fn evaluate(&self, electron_energy: Scalar, photon_energy: Scalar, field: Scalar) -> Scalar {
        let xc = self.critical_ratio(electron_energy, photon_energy, field);
        let (k13, k43) = bessel_k_third_pair(xc);
        // Both terms grow as xc^(-5/3) for xc → 0; their difference stays positive.
        let bracket = k43 * k13 - 3.0 / 5.0 * xc * (k43 * k43 - k13 * k13);
        let flux = self.prefactor * self.critical_field / field * photon_energy / electron_energy.powi(4) * bracket;
        finite_or(flux, 0.0).max(0.0)
    }
}

/// Characteristic synchrotron photon energy `(B/B_c) E² / (mₑc²)` in erg.
#[must_use]
pub fn characteristic_energy(constants: &PhysicalConstants, electron_energy: Scalar, field: Scalar) -> Scalar {
    field / constants.critical_field() * electron_energy * electron_energy / constants.electron_rest_energy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn characteristic_energy_scales_quadratically() {
        let c = PhysicalConstants::CGS;
        let e = c.ev_to_erg(1.0e9);
        let low = characteristic_energy(&c, e, 10.0);
        assert_relative_eq!(characteristic_energy(&c, 2.0 * e, 10.0), 4.0 * low, max_relative = 1e-12);
        assert_relative_eq!(characteristic_energy(&c, e, 20.0), 2.0 * low, max_relative = 1e-12);
    }

    #[test]
    fn kernel_peaks_near_characteristic_energy() {
        let c = PhysicalConstants::CGS;
        let kernel = SynchrotronKernel::new(&c);
        let e_el = c.ev_to_erg(1.0e10);
        let b = 1.0;
        let e_syn = characteristic_energy(&c, e_el, b);
        // E_ph · K peaks within a decade of the characteristic energy.
        let sed = |f: f64| f * e_syn * kernel.evaluate(e_el, f * e_syn, b);
        let at_peak = sed(1.0);
        assert!(at_peak > sed(1.0e-3));
        assert!(at_peak > sed(1.0e2));
        assert!(sed(1.0e3) < 1.0e-100 * at_peak);
    }

    #[test]
    fn kernel_is_finite_and_non_negative_deep_in_the_tails() {
        let c = PhysicalConstants::CGS;
        let kernel = SynchrotronKernel::new(&c);
        let e_el = c.ev_to_erg(1.0e14);
        for &e_ph in &[1.0e-30, 1.0e-20, 1.0e-10, 1.0, 1.0e10] {
            let v = kernel.evaluate(e_el, e_ph, 1.0e3);
            assert!(v.is_finite() && v >= 0.0, "E_ph = {e_ph}: {v}");
        }
    }

    #[test]
    fn low_energy_slope_is_minus_two_thirds() {
        // Far below the peak the photon-number kernel falls as E_ph^(−2/3).
        let c = PhysicalConstants::CGS;
        let kernel = SynchrotronKernel::new(&c);
        let e_el = c.ev_to_erg(1.0e9);
        let e_syn = characteristic_energy(&c, e_el, 1.0);
        let a = 1.0e-6 * e_syn;
        let b = 1.0e-5 * e_syn;
        let slope = (kernel.evaluate(e_el, b, 1.0) / kernel.evaluate(e_el, a, 1.0)).log10();
        assert_relative_eq!(slope, -2.0 / 3.0, epsilon = 0.01);
    }
}
