//! Physical constants in the two unit systems used by the engines.
//!
//! The synchrotron engine works in Gaussian CGS units (erg, gauss, cm) and reads its
//! values from [`PhysicalConstants::CGS`]. The field and projectile engines work in SI
//! and use the module-level constants below.
//!
//! ## Accuracy
//!
//! The CGS table keeps the historical values the synchrotron plots were calibrated
//! against (pre-2019 electron mass and charge, `h = 6.62e-27`). They agree with CODATA to
//! three or more significant figures, which is far below the resolution of a log-log plot.
//! SI constants marked "exact" have zero uncertainty by the 2019 SI definition.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Rybicki, G. B. & Lightman, A. P. (1979). Radiative Processes in Astrophysics.

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Elementary charge _e_ in coulombs (C).
/// Exact value by 2019 SI definition: 1.602176634 × 10⁻¹⁹ C.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Standard gravitational acceleration used by the projectile engine (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Read-only table of Gaussian CGS constants, published as [`PhysicalConstants::CGS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Elementary charge in esu.
    pub electron_charge: f64,
    /// Speed of light in cm/s.
    pub speed_of_light: f64,
    /// Electron rest mass in g.
    pub electron_mass: f64,
    /// Proton rest mass in g.
    pub proton_mass: f64,
    /// Planck's constant in erg·s.
    pub planck: f64,
    /// Fine-structure constant (dimensionless).
    pub fine_structure: f64,
    /// Thomson cross-section in cm².
    pub thomson_cross_section: f64,
    /// Boltzmann constant in erg/K.
    pub boltzmann: f64,
    /// Conversion factor from electronvolt to erg.
    pub ev_to_erg: f64,
}

impl PhysicalConstants {
    /// The CGS table used by the synchrotron engine.
    pub const CGS: Self = Self {
        electron_charge: 4.803_204_25e-10,
        speed_of_light: 2.997_924_58e10,
        electron_mass: 9.109_389_7e-28,
        proton_mass: 1.672_623_1e-24,
        planck: 6.62e-27,
        fine_structure: 1.0 / 137.036,
        thomson_cross_section: 6.652_458_545_33e-25,
        boltzmann: 1.380_658e-16,
        ev_to_erg: 1.602_18e-12,
    };

    /// Reduced Planck constant ħ = h / 2π.
    #[inline]
    #[must_use]
    pub fn hbar(&self) -> f64 {
        self.planck / (2.0 * PI)
    }

    /// Electron rest energy mₑc² in erg.
    #[inline]
    #[must_use]
    pub fn electron_rest_energy(&self) -> f64 {
        self.electron_mass * self.speed_of_light * self.speed_of_light
    }

    /// Proton rest energy mₚc² in erg.
    #[inline]
    #[must_use]
    pub fn proton_rest_energy(&self) -> f64 {
        self.proton_mass * self.speed_of_light * self.speed_of_light
    }

    /// Quantum critical magnetic field B_c = mₑ²c³ / (eħ) in gauss.
    #[inline]
    #[must_use]
    pub fn critical_field(&self) -> f64 {
        self.electron_mass.powi(2) * self.speed_of_light.powi(3) / self.electron_charge / self.hbar()
    }

    /// Converts an energy in electronvolts to erg.
    #[inline]
    #[must_use]
    pub fn ev_to_erg(&self, ev: f64) -> f64 {
        ev * self.ev_to_erg
    }

    /// Converts an energy in erg to electronvolts.
    #[inline]
    #[must_use]
    pub fn erg_to_ev(&self, erg: f64) -> f64 {
        erg / self.ev_to_erg
    }
}

/// Speed fraction β = v/c of a particle with Lorentz factor γ.
///
/// Accepts `beta_gamma` = βγ = √(γ² − 1) so that ultra-relativistic particles stay
/// representable: β = √(1 − 1/(1 + (βγ)²)).
#[inline]
#[must_use]
pub fn beta_from_beta_gamma(beta_gamma: f64) -> f64 {
    (1.0 - 1.0 / (1.0 + beta_gamma * beta_gamma)).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn electron_rest_energy_is_511_kev() {
        let c = PhysicalConstants::CGS;
        let mec2_ev = c.erg_to_ev(c.electron_rest_energy());
        assert_relative_eq!(mec2_ev, 510_999.0, max_relative = 1.0e-4);
    }

    #[test]
    fn critical_field_matches_reference() {
        // B_c ≈ 4.414 × 10¹³ G
        let bc = PhysicalConstants::CGS.critical_field();
        assert_relative_eq!(bc, 4.414e13, max_relative = 2.0e-3);
    }

    #[test]
    fn ev_erg_conversion_inverts() {
        let c = PhysicalConstants::CGS;
        assert_relative_eq!(c.erg_to_ev(c.ev_to_erg(1.0e9)), 1.0e9, max_relative = 1.0e-14);
    }

    #[test]
    fn beta_stays_below_one() {
        assert_relative_eq!(beta_from_beta_gamma(0.0), 0.0);
        let beta = beta_from_beta_gamma(10.0);
        assert!(beta < 1.0);
        assert_relative_eq!(beta, (100.0_f64 / 101.0).sqrt(), max_relative = 1.0e-12);
    }
}
