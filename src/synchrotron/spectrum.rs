use log::{debug, warn};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::PhysicalConstants;
use crate::errors::{require_finite, Result, SimError};
use crate::math::{finite_max, normalized_log10, Scalar};
use crate::sweep::{geomspace, logspace};

use super::{characteristic_energy, convolve, BrokenPowerLaw, Convolution, EnergyDistribution, LogGrid, SynchrotronKernel};

/// Samples on the electron curve.
pub const ELECTRON_SAMPLES: usize = 100;
/// Samples on the photon curve.
pub const PHOTON_SAMPLES: usize = 200;
/// Additive floor applied before `log10` on the electron curve.
pub const ELECTRON_FLOOR: Scalar = 1.0e-10;
/// Additive floor applied before `log10` on photon curves.
pub const PHOTON_FLOOR: Scalar = 1.0e-30;
/// Fewest quadrature nodes accepted by Simpson's rule.
pub const MIN_INTEGRATION_POINTS: usize = 3;
/// Upper bound on quadrature nodes; each node costs one kernel call per photon sample.
pub const MAX_INTEGRATION_POINTS: usize = 100_000;

/// Most representative electron curves; each costs one kernel call per photon sample.
pub const MAX_VISIBLE_ELECTRONS: usize = 1_000;

/// Largest accepted magnitude of the log10 energies and field; beyond it `E²` leaves the
/// `f64` range.
pub const MAX_LOG_MAGNITUDE: Scalar = 100.0;

/// Inputs of [`compute_spectrum`]. Energies are log10 of electronvolts, the field
/// log10 of gauss.
///
/// Deserialisation also accepts the slider identifiers of the web front end
/// (`lgEmin`, `lgB`, `NvisEl`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumParams {
    /// log10 of the low-energy cut-off.
    #[serde(alias = "lgEmin")]
    pub lg_emin: Scalar,
    /// log10 of the break energy.
    #[serde(alias = "lgEb")]
    pub lg_eb: Scalar,
    /// log10 of the high-energy cut-off.
    #[serde(alias = "lgEmax")]
    pub lg_emax: Scalar,
    /// Spectral index below the break.
    pub p: Scalar,
    /// Index change across the break.
    pub dp: Scalar,
    /// log10 of the break smoothness `s`.
    #[serde(alias = "lgs")]
    pub lg_s: Scalar,
    /// log10 of the cut-off sharpness `χ`.
    #[serde(alias = "lgchi")]
    pub lg_chi: Scalar,
    /// log10 of the magnetic field.
    #[serde(alias = "lgB")]
    pub lg_b: Scalar,
    /// log10 of the single representative electron energy, used when
    /// `num_visible_electrons <= 1`.
    #[serde(alias = "lgEelDelta")]
    pub lg_e_delta: Scalar,
    /// Number of representative electron curves.
    #[serde(alias = "NvisEl")]
    pub num_visible_electrons: usize,
    /// log10 of quadrature nodes per decade of the integration range.
    #[serde(alias = "lgintRes")]
    pub lg_integration_resolution: Scalar,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            lg_emin: 6.0,
            lg_eb: 9.0,
            lg_emax: 12.0,
            p: 2.0,
            dp: 1.0,
            lg_s: 0.0,
            lg_chi: 0.0,
            lg_b: 2.0,
            lg_e_delta: 8.0,
            num_visible_electrons: 1,
            lg_integration_resolution: 2.0,
        }
    }
}

impl SpectrumParams {
    /// Checks every input before any numeric work.
    pub fn validate(&self) -> Result<()> {
        require_finite("lg_emin", self.lg_emin)?;
        require_finite("lg_eb", self.lg_eb)?;
        require_finite("lg_emax", self.lg_emax)?;
        require_finite("p", self.p)?;
        require_finite("dp", self.dp)?;
        require_finite("lg_s", self.lg_s)?;
        require_finite("lg_chi", self.lg_chi)?;
        require_finite("lg_b", self.lg_b)?;
        require_finite("lg_e_delta", self.lg_e_delta)?;
        require_finite("lg_integration_resolution", self.lg_integration_resolution)?;
        for (name, lg) in [
            ("lg_emin", self.lg_emin),
            ("lg_eb", self.lg_eb),
            ("lg_emax", self.lg_emax),
            ("lg_b", self.lg_b),
            ("lg_e_delta", self.lg_e_delta),
        ] {
            if lg.abs() > MAX_LOG_MAGNITUDE {
                return Err(SimError::invalid(name, format!("|{lg}| exceeds {MAX_LOG_MAGNITUDE} decades")));
            }
        }
        if self.num_visible_electrons > MAX_VISIBLE_ELECTRONS {
            return Err(SimError::invalid(
                "num_visible_electrons",
                format!("{} curves requested, limit is {MAX_VISIBLE_ELECTRONS}", self.num_visible_electrons),
            ));
        }
        if self.lg_emin >= self.lg_emax {
            return Err(SimError::invalid(
                "lg_emin",
                format!("low cut-off 1e{} eV must lie below high cut-off 1e{} eV", self.lg_emin, self.lg_emax),
            ));
        }
        Ok(())
    }
}

/// Normalised electron and photon curves plus the characteristic energies.
///
/// Serialises to the flat mapping the plotting front end reads: `xel`, `yel`, `xphot`,
/// `yphot`, `Esynmin`, `Esynb`, `Esynmax`, `Eelvis` and one `Ephvis_{i}` per
/// representative curve. All values are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumResult {
    /// log10 electron energy (eV).
    pub xel: Vec<Scalar>,
    /// log10 of `E² N(E)` normalised to its maximum.
    pub yel: Vec<Scalar>,
    /// log10 photon energy (eV).
    pub xphot: Vec<Scalar>,
    /// log10 of `E_ph² dN/dE_ph` normalised to its maximum.
    pub yphot: Vec<Scalar>,
    /// log10 characteristic photon energy (eV) of electrons at the low cut-off.
    pub esyn_min: Scalar,
    /// Same, at the break.
    pub esyn_break: Scalar,
    /// Same, at the high cut-off.
    pub esyn_max: Scalar,
    /// log10 energies (eV) of the representative electrons.
    pub eel_vis: Vec<Scalar>,
    /// Representative photon curves, normalised to the maximum of the full spectrum.
    pub ephvis: Vec<Vec<Scalar>>,
    /// Raw convolution, including the per-bin contributions.
    pub convolution: Convolution,
}

impl Serialize for SpectrumResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8 + self.ephvis.len()))?;
        map.serialize_entry("xel", &self.xel)?;
        map.serialize_entry("yel", &self.yel)?;
        map.serialize_entry("xphot", &self.xphot)?;
        map.serialize_entry("yphot", &self.yphot)?;
        map.serialize_entry("Esynmin", &self.esyn_min)?;
        map.serialize_entry("Esynb", &self.esyn_break)?;
        map.serialize_entry("Esynmax", &self.esyn_max)?;
        map.serialize_entry("Eelvis", &self.eel_vis)?;
        for (i, curve) in self.ephvis.iter().enumerate() {
            map.serialize_entry(&format!("Ephvis_{i}"), curve)?;
        }
        map.end()
    }
}

/// Synchrotron spectrum of a smoothly broken power-law electron population.
///
/// Uses [`PhysicalConstants::CGS`]; see [`compute_spectrum_with`] to supply a table.
pub fn compute_spectrum(params: &SpectrumParams) -> Result<SpectrumResult> {
    compute_spectrum_with(&PhysicalConstants::CGS, params)
}

/// [`compute_spectrum`] against an explicit constants table.
pub fn compute_spectrum_with(constants: &PhysicalConstants, params: &SpectrumParams) -> Result<SpectrumResult> {
    params.validate()?;

    let ev = |lg: Scalar| constants.ev_to_erg(10f64.powf(lg));
    let lg_ev = |erg: Scalar| constants.erg_to_ev(erg).log10();
    let field = 10f64.powf(params.lg_b);
    let electrons = BrokenPowerLaw {
        e_min: ev(params.lg_emin),
        e_break: ev(params.lg_eb),
        e_max: ev(params.lg_emax),
        p: params.p,
        dp: params.dp,
        s: 10f64.powf(params.lg_s),
        chi: 10f64.powf(params.lg_chi),
    };

    // Electron curve.
    let lg_el_start = (electrons.e_min.log10() - 1.0).max(ev(6.0).log10());
    let energies = logspace(lg_el_start, electrons.e_max.log10() + 1.0, ELECTRON_SAMPLES);
    let sed: Vec<Scalar> = energies.iter().map(|&e| e * e * electrons.density(e)).collect();
    let xel = energies.iter().map(|&e| lg_ev(e)).collect();
    let yel = normalized_log10(&sed, finite_max(&sed).unwrap_or(0.0), ELECTRON_FLOOR);

    // Integration domain and photon grid.
    let rest_energy = constants.electron_rest_energy();
    let lower = (0.1 * electrons.e_min).max(rest_energy);
    let upper = 100.0 * electrons.e_max;
    let grid = LogGrid { lower, upper, points: integration_points(lower, upper, params.lg_integration_resolution)? };

    let esyn_min = characteristic_energy(constants, electrons.e_min, field);
    let esyn_break = characteristic_energy(constants, electrons.e_break, field);
    let esyn_max = characteristic_energy(constants, electrons.e_max, field);
    let lg_ph_start = (esyn_min.log10() - 5.0).max(ev(-9.0).log10());
    let photons = logspace(lg_ph_start, esyn_max.log10() + 3.0, PHOTON_SAMPLES);

    let representative = if params.num_visible_electrons > 1 {
        geomspace(electrons.e_min, electrons.e_max, params.num_visible_electrons)
    } else {
        vec![ev(params.lg_e_delta)]
    };
    debug!(
        "synchrotron: B = {field:.3e} G, {} quadrature nodes on [{lower:.3e}, {upper:.3e}] erg, {} representative electrons",
        grid.points,
        representative.len()
    );

    let kernel = SynchrotronKernel::new(constants);
    let convolution = convolve(&electrons, &kernel, field, &photons, &grid, &representative);

    let photon_sed: Vec<Scalar> = photons.iter().zip(&convolution.integrated).map(|(&e, &n)| e * e * n).collect();
    let norm = finite_max(&photon_sed).unwrap_or(0.0);
    if norm <= 0.0 {
        warn!("synchrotron: photon spectrum vanished on the sampled grid, curves pinned to the floor");
    }
    let yphot = normalized_log10(&photon_sed, norm, PHOTON_FLOOR);
    let ephvis = convolution
        .representative
        .iter()
        .take(params.num_visible_electrons)
        .map(|curve| {
            let sed: Vec<Scalar> = photons.iter().zip(curve).map(|(&e, &n)| e * e * n).collect();
            normalized_log10(&sed, norm, PHOTON_FLOOR)
        })
        .collect();

    Ok(SpectrumResult {
        xel,
        yel,
        xphot: photons.iter().map(|&e| lg_ev(e)).collect(),
        yphot,
        esyn_min: lg_ev(esyn_min),
        esyn_break: lg_ev(esyn_break),
        esyn_max: lg_ev(esyn_max),
        eel_vis: representative.iter().map(|&e| lg_ev(e)).collect(),
        ephvis,
        convolution,
    })
}

/// Node count `⌊log10(upper/lower) · 10^lg_resolution⌋`, clamped below at
/// [`MIN_INTEGRATION_POINTS`].
fn integration_points(lower: Scalar, upper: Scalar, lg_resolution: Scalar) -> Result<usize> {
    let requested = (upper / lower).log10() * 10f64.powf(lg_resolution);
    if !requested.is_finite() || requested > MAX_INTEGRATION_POINTS as Scalar {
        return Err(SimError::invalid(
            "lg_integration_resolution",
            format!("requests {requested:.3e} quadrature nodes, limit is {MAX_INTEGRATION_POINTS}"),
        ));
    }
    // Truncation toward zero; negative requests clamp below.
    let points = requested.max(0.0) as usize;
    if points < MIN_INTEGRATION_POINTS {
        warn!("synchrotron: {points} quadrature nodes requested, using {MIN_INTEGRATION_POINTS}");
        return Ok(MIN_INTEGRATION_POINTS);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> SpectrumParams {
        SpectrumParams { lg_integration_resolution: 1.0, ..SpectrumParams::default() }
    }

    #[test]
    fn default_run_has_documented_shape() {
        let result = compute_spectrum(&quick()).expect("valid parameters");
        assert_eq!(result.xel.len(), ELECTRON_SAMPLES);
        assert_eq!(result.yel.len(), ELECTRON_SAMPLES);
        assert_eq!(result.xphot.len(), PHOTON_SAMPLES);
        assert_eq!(result.yphot.len(), PHOTON_SAMPLES);
        assert_eq!(result.ephvis.len(), 1);
        assert_eq!(result.eel_vis.len(), 1);
        assert!((result.eel_vis[0] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_cutoffs_are_rejected() {
        let params = SpectrumParams { lg_emin: 12.0, lg_emax: 6.0, ..quick() };
        assert!(matches!(compute_spectrum(&params), Err(SimError::InvalidParameter { name: "lg_emin", .. })));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let params = SpectrumParams { p: Scalar::NAN, ..quick() };
        assert!(matches!(compute_spectrum(&params), Err(SimError::InvalidParameter { name: "p", .. })));
    }

    #[test]
    fn absurd_magnitudes_are_rejected() {
        let params = SpectrumParams { lg_emin: -400.0, ..quick() };
        assert!(matches!(compute_spectrum(&params), Err(SimError::InvalidParameter { name: "lg_emin", .. })));
        let params = SpectrumParams { lg_b: 150.0, ..quick() };
        assert!(matches!(compute_spectrum(&params), Err(SimError::InvalidParameter { name: "lg_b", .. })));
    }

    #[test]
    fn visible_electron_count_is_capped() {
        let params = SpectrumParams { num_visible_electrons: usize::MAX, ..quick() };
        assert!(matches!(
            compute_spectrum(&params),
            Err(SimError::InvalidParameter { name: "num_visible_electrons", .. })
        ));
        let params = SpectrumParams { num_visible_electrons: MAX_VISIBLE_ELECTRONS + 1, ..quick() };
        assert!(params.validate().is_err());
        let params = SpectrumParams { num_visible_electrons: MAX_VISIBLE_ELECTRONS, ..quick() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn integration_points_clamp_and_cap() {
        assert!((799..=800).contains(&integration_points(1.0, 1.0e8, 2.0).unwrap()));
        assert_eq!(integration_points(1.0, 10.0, -3.0).unwrap(), MIN_INTEGRATION_POINTS);
        assert!(integration_points(1.0, 1.0e8, 6.0).is_err());
    }

    #[test]
    fn several_visible_electrons_span_the_cutoffs() {
        let params = SpectrumParams { num_visible_electrons: 4, ..quick() };
        let result = compute_spectrum(&params).unwrap();
        assert_eq!(result.eel_vis.len(), 4);
        assert_eq!(result.ephvis.len(), 4);
        assert!((result.eel_vis[0] - 6.0).abs() < 1e-9);
        assert!((result.eel_vis[3] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn zero_visible_electrons_emit_no_curves() {
        let params = SpectrumParams { num_visible_electrons: 0, ..quick() };
        let result = compute_spectrum(&params).unwrap();
        assert!(result.ephvis.is_empty());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("Ephvis_0").is_none());
    }
}
