//! Drag-free projectile motion.

use serde::{Deserialize, Serialize};

use crate::constants::STANDARD_GRAVITY;
use crate::errors::{require_finite, Result, SimError};
use crate::math::Scalar;
use crate::sweep::linspace;

/// Samples along the trajectory.
pub const TRAJECTORY_SAMPLES: usize = 100;

/// Launch conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    /// Elevation above the horizontal in degrees.
    #[serde(alias = "angle")]
    pub angle_deg: Scalar,
    /// Launch speed in m/s.
    pub speed: Scalar,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self { angle_deg: 45.0, speed: 20.0 }
    }
}

impl ProjectileParams {
    /// Checks the launch conditions and returns `(angle in radians, speed)`.
    pub fn validate(&self) -> Result<(Scalar, Scalar)> {
        let angle = require_finite("angle_deg", self.angle_deg)?.to_radians();
        let speed = require_finite("speed", self.speed)?;
        if speed < 0.0 {
            return Err(SimError::invalid("speed", format!("must be non-negative, got {speed}")));
        }
        Ok((angle, speed))
    }
}

/// Positions sampled uniformly in time from launch to landing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileTrajectory {
    /// Horizontal positions (m).
    pub x: Vec<Scalar>,
    /// Heights (m).
    pub y: Vec<Scalar>,
}

/// Trajectory of a projectile launched from the origin over flat ground.
///
/// The time of flight is `2 v sin θ / g`; a downward launch gives a negative time of
/// flight and the samples run backwards in time, as the closed form does.
pub fn compute_trajectory(params: &ProjectileParams) -> Result<ProjectileTrajectory> {
    let (angle, speed) = params.validate()?;
    let g = STANDARD_GRAVITY;
    let (vx, vy) = (speed * angle.cos(), speed * angle.sin());
    let times = linspace(0.0, 2.0 * vy / g, TRAJECTORY_SAMPLES);
    Ok(ProjectileTrajectory {
        x: times.iter().map(|t| vx * t).collect(),
        y: times.iter().map(|t| vy * t - 0.5 * g * t * t).collect(),
    })
}
