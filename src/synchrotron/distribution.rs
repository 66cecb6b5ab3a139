use crate::math::{finite_or, Scalar};

/// Number density of particles per unit energy.
pub trait EnergyDistribution {
    /// dN/dE at `energy` (erg). Must be finite and non-negative for `energy > 0`.
    fn density(&self, energy: Scalar) -> Scalar;
}

impl<F> EnergyDistribution for F
where
    F: Fn(Scalar) -> Scalar,
{
    fn density(&self, energy: Scalar) -> Scalar {
        self(energy)
    }
}

/// Smoothly broken power law `N0 (E/E0)^−p (1 + (E/Eb)^(Δp·s))^(−1/s)`.
///
/// Below `e_break` the slope is `−p`, above it `−(p + Δp)`; `s` sets how sharp the
/// transition is (large `s` approaches a hard break).
#[must_use]
pub fn smoothly_broken_power_law(
    energy: Scalar,
    norm: Scalar,
    pivot: Scalar,
    p: Scalar,
    dp: Scalar,
    e_break: Scalar,
    s: Scalar,
) -> Scalar {
    norm * (energy / pivot).powf(-p) * (1.0 + (energy / e_break).powf(dp * s)).powf(-1.0 / s)
}

/// Electron population: a smoothly broken power law pivoted at `e_min` with soft
/// exponential cut-offs below `e_min` and above `e_max`.
///
/// Energies are in erg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrokenPowerLaw {
    /// Low-energy cut-off (also the normalisation pivot).
    pub e_min: Scalar,
    /// Break energy.
    pub e_break: Scalar,
    /// High-energy cut-off.
    pub e_max: Scalar,
    /// Spectral index below the break.
    pub p: Scalar,
    /// Index change across the break.
    pub dp: Scalar,
    /// Break smoothness.
    pub s: Scalar,
    /// Cut-off sharpness χ in `exp(−(E/E_max)^χ)` and `exp(−(E_min/E)^χ)`.
    pub chi: Scalar,
}

impl EnergyDistribution for BrokenPowerLaw {
    fn density(&self, energy: Scalar) -> Scalar {
        let body = smoothly_broken_power_law(energy, 1.0, self.e_min, self.p, self.dp, self.e_break, self.s);
        let high = (-(energy / self.e_max).powf(self.chi)).exp();
        let low = (-(self.e_min / energy).powf(self.chi)).exp();
        finite_or(body * high * low, 0.0)
    }
}
