//! Shared error types used across submodules.

use thiserror::Error;

use crate::math::Scalar;

/// Top-level error type for the crate.
///
/// Only caller mistakes surface here. Numerical trouble inside an engine (Bessel
/// underflow, an unconverged retarded-time solve, a singular grid point) is sanitised
/// locally and logged instead.
#[derive(Debug, Error)]
pub enum SimError {
    /// Raised when a parameter is non-finite or physically meaningless.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the engine's parameter struct.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// Raised when an index parameter falls outside its sample range.
    #[error("`{name}` = {value} is out of range 0..{len}")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: usize,
        /// Exclusive upper bound.
        len: usize,
    },
    /// Wraps JSON encoding failures at the output boundary.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used by every engine.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Builds an [`SimError::InvalidParameter`].
    #[must_use]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

/// Fails with [`SimError::InvalidParameter`] when `value` is NaN or infinite.
pub fn require_finite(name: &'static str, value: Scalar) -> Result<Scalar> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid(name, format!("must be finite, got {value}")))
    }
}
