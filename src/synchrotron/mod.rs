//! Synchrotron emission of a relativistic electron population.
//!
//! The photon spectrum is the convolution of an electron energy distribution with the
//! pitch-angle-averaged single-electron kernel, integrated over `u = ln E`.

mod convolution;
mod distribution;
mod kernel;
mod spectrum;

pub use convolution::{convolve, Convolution, LogGrid};
pub use distribution::{smoothly_broken_power_law, BrokenPowerLaw, EnergyDistribution};
pub use kernel::{characteristic_energy, Kernel, SynchrotronKernel};
pub use spectrum::{
    compute_spectrum, compute_spectrum_with, SpectrumParams, SpectrumResult, ELECTRON_FLOOR, ELECTRON_SAMPLES,
    MAX_INTEGRATION_POINTS, MAX_LOG_MAGNITUDE, MAX_VISIBLE_ELECTRONS, MIN_INTEGRATION_POINTS, PHOTON_FLOOR, PHOTON_SAMPLES,
};
