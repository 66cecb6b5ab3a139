//! Uniform "parameters in, JSON out" entry point over every engine.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::fields::{compute_field_snapshot, FieldParams, FieldSample};
use crate::projectile::{compute_trajectory, ProjectileParams, ProjectileTrajectory};
use crate::synchrotron::{compute_spectrum, SpectrumParams, SpectrumResult};

/// Trait for simulation engines.
///
/// Implemented by each engine's parameter set: running it is a pure function of the
/// parameters, and the output serialises to the flat mapping of named arrays the
/// plotting front end consumes.
pub trait SimulationEngine {
    /// Plot-ready result.
    type Output: Serialize;

    /// Short identifier used in job files and logs.
    fn name(&self) -> &'static str;

    /// Checks the parameters without running the computation.
    fn validate(&self) -> Result<()>;

    /// Validates the parameters and runs the computation.
    fn run(&self) -> Result<Self::Output>;

    /// Runs and converts the output to a JSON value.
    fn run_json(&self) -> Result<serde_json::Value> {
        let output = self.run()?;
        Ok(serde_json::to_value(output)?)
    }
}

impl SimulationEngine for SpectrumParams {
    type Output = SpectrumResult;

    fn name(&self) -> &'static str {
        "spectrum"
    }

    fn validate(&self) -> Result<()> {
        SpectrumParams::validate(self)
    }

    fn run(&self) -> Result<SpectrumResult> {
        compute_spectrum(self)
    }
}

impl SimulationEngine for FieldParams {
    type Output = FieldSample;

    fn name(&self) -> &'static str {
        "field"
    }

    fn validate(&self) -> Result<()> {
        FieldParams::validate(self).map(drop)
    }

    fn run(&self) -> Result<FieldSample> {
        compute_field_snapshot(self)
    }
}

impl SimulationEngine for ProjectileParams {
    type Output = ProjectileTrajectory;

    fn name(&self) -> &'static str {
        "projectile"
    }

    fn validate(&self) -> Result<()> {
        ProjectileParams::validate(self).map(drop)
    }

    fn run(&self) -> Result<ProjectileTrajectory> {
        compute_trajectory(self)
    }
}

/// Any engine with its parameters, tagged by `engine` when (de)serialised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum Simulation {
    /// Synchrotron spectrum of a broken power-law electron population.
    Spectrum(SpectrumParams),
    /// Field magnitude of an oscillating charge.
    Field(FieldParams),
    /// Drag-free projectile trajectory.
    Projectile(ProjectileParams),
}

impl Simulation {
    /// Identifier of the wrapped engine.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spectrum(p) => p.name(),
            Self::Field(p) => p.name(),
            Self::Projectile(p) => p.name(),
        }
    }

    /// Checks the wrapped parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Spectrum(p) => SimulationEngine::validate(p),
            Self::Field(p) => SimulationEngine::validate(p),
            Self::Projectile(p) => SimulationEngine::validate(p),
        }
    }

    /// Runs the wrapped engine and returns its JSON mapping.
    pub fn run(&self) -> Result<serde_json::Value> {
        log::info!("running {} simulation", self.name());
        match self {
            Self::Spectrum(p) => p.run_json(),
            Self::Field(p) => p.run_json(),
            Self::Projectile(p) => p.run_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimError;

    #[test]
    fn tagged_parameters_round_trip() {
        let sim = Simulation::Projectile(ProjectileParams { angle_deg: 30.0, speed: 5.0 });
        let text = serde_json::to_string(&sim).unwrap();
        assert!(text.contains("\"engine\":\"projectile\""));
        let back: Simulation = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sim);
    }

    #[test]
    fn front_end_names_are_accepted() {
        let sim: Simulation =
            serde_json::from_str(r#"{"engine": "field", "ti": 3, "lgbG": 0.5, "frac_Ax_lim": 0.2}"#).unwrap();
        let Simulation::Field(p) = sim else { panic!("expected field parameters") };
        assert_eq!(p.time_index, 3);
        assert_eq!(p.lg_gamma, 0.5);
        assert_eq!(p.frac_amplitude_x, 0.2);
        assert_eq!(p.frac_amplitude_y, FieldParams::default().frac_amplitude_y);
    }

    #[test]
    fn validation_reports_the_offending_field() {
        let sim = Simulation::Spectrum(SpectrumParams { lg_emin: 13.0, ..SpectrumParams::default() });
        assert!(matches!(sim.validate(), Err(SimError::InvalidParameter { name: "lg_emin", .. })));
        assert!(Simulation::Field(FieldParams::default()).validate().is_ok());
    }

    #[test]
    fn projectile_runs_through_the_dispatcher() {
        let value = Simulation::Projectile(ProjectileParams::default()).run().unwrap();
        assert_eq!(value["x"].as_array().map(Vec::len), Some(100));
        assert_eq!(value["y"].as_array().map(Vec::len), Some(100));
    }
}
