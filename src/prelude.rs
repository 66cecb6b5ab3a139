//! Convenience re-exports for running the engines.

pub use crate::constants::*;
pub use crate::errors::{Result, SimError};
pub use crate::fields::{
    compute_field_snapshot, electric_field_at, lienard_wiechert_field, retarded_time, Charge, FieldParams,
    FieldSample, Oscillator, GRID_POINTS, TIME_SAMPLES,
};
pub use crate::math::{R3, Scalar};
pub use crate::projectile::{compute_trajectory, ProjectileParams, ProjectileTrajectory};
pub use crate::roots::{newton_bracketed, RootOptions, RootReport};
pub use crate::simulation::{Simulation, SimulationEngine};
pub use crate::special::{bessel_k, bessel_k_third_pair};
pub use crate::sweep::{geomspace, linspace, logspace};
pub use crate::synchrotron::{
    characteristic_energy, compute_spectrum, BrokenPowerLaw, EnergyDistribution, Kernel, SpectrumParams,
    SpectrumResult, SynchrotronKernel, ELECTRON_FLOOR, PHOTON_FLOOR,
};
