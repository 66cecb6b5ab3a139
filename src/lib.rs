#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants in CGS and SI.
pub mod constants;
/// Shared mathematical utilities (vectors, sanitisation, normalised logs).
pub mod math;
/// Linear and logarithmic sample grids.
pub mod sweep;
/// Composite Simpson and trapezoid quadrature.
pub mod quadrature;
/// Special functions (modified Bessel functions of fractional order).
pub mod special;
/// Safeguarded scalar root finding.
pub mod roots;
/// Synchrotron emission spectra.
pub mod synchrotron;
/// Retarded fields of moving point charges.
pub mod fields;
/// Drag-free projectile trajectories.
pub mod projectile;
/// Engine trait and tagged dispatch over every engine.
pub mod simulation;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
