use crate::constants::SPEED_OF_LIGHT;
use crate::math::{finite_or, R3, Scalar};

/// A point charge following a prescribed trajectory.
///
/// Implementors supply the kinematics; the field engine only ever reads them through
/// this trait, so new trajectories (uniform drift, circular orbits) plug in without
/// touching the solver.
pub trait Charge {
    /// Charge in coulombs.
    fn charge(&self) -> Scalar;
    /// Position in meters at time `t` (s).
    fn position(&self, t: Scalar) -> R3;
    /// Velocity in m/s at time `t`.
    fn velocity(&self, t: Scalar) -> R3;
    /// Acceleration in m/s² at time `t`.
    fn acceleration(&self, t: Scalar) -> R3;
    /// Repetition period of the motion, if it is periodic.
    fn period(&self) -> Option<Scalar>;
    /// Upper bound on `|position(t) − anchor()|` over all `t`.
    fn excursion(&self) -> Scalar;
    /// Reference point the motion stays within [`Charge::excursion`] of.
    fn anchor(&self) -> R3;

    /// Direction of motion in the x–y plane, `atan2(v_y, v_x)`.
    fn heading(&self, t: Scalar) -> Scalar {
        let v = self.velocity(t);
        v.y.atan2(v.x)
    }

    /// Time derivative of [`Charge::heading`]; zero where the in-plane speed vanishes.
    fn heading_rate(&self, t: Scalar) -> Scalar {
        let v = self.velocity(t);
        let a = self.acceleration(t);
        finite_or((v.x * a.y - v.y * a.x) / (v.x * v.x + v.y * v.y), 0.0)
    }

    /// Residual `|X − r(t_r)| − c (t − t_r)` whose root in `t_r` is the retarded time.
    fn retarded_time_residual(&self, retarded: Scalar, t: Scalar, point: &R3) -> Scalar {
        (point - self.position(retarded)).norm() - SPEED_OF_LIGHT * (t - retarded)
    }
}

/// Charge oscillating sinusoidally in x and y about a fixed centre.
///
/// `x(t) = x₀ + A_x sin(ωt)`, `y(t) = y₀ + A_y sin(ωt + φ)`, `z(t) = z₀`. The angular
/// frequency is chosen so that the peak speed over a period equals `max_speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    charge: Scalar,
    center: R3,
    amplitude: (Scalar, Scalar),
    phase: Scalar,
    omega: Scalar,
}

impl Oscillator {
    /// Builds an oscillator whose peak speed is `max_speed` (m/s).
    ///
    /// The speed is maximal where `d|v|²/dt = 0`, i.e. at
    /// `ωt* = ½ atan2(−A_y² sin 2φ, A_x² + A_y² cos 2φ)`; solving `|v(t*)| = max_speed`
    /// for ω gives the angular frequency. Returns `None` when that equation has no
    /// finite positive solution (both amplitudes zero, non-finite input).
    #[must_use]
    pub fn new(charge: Scalar, center: R3, amplitude: (Scalar, Scalar), max_speed: Scalar, phase: Scalar) -> Option<Self> {
        let (ax, ay) = amplitude;
        let wt_max = 0.5 * (-ay * ay * (2.0 * phase).sin()).atan2(ax * ax + ay * ay * (2.0 * phase).cos());
        let speed_per_omega = (ax * ax * wt_max.cos().powi(2) + ay * ay * (wt_max + phase).cos().powi(2)).sqrt();
        let omega = max_speed / speed_per_omega;
        (omega.is_finite() && omega > 0.0).then_some(Self { charge, center, amplitude, phase, omega })
    }

    /// Angular frequency ω in rad/s.
    #[must_use]
    pub fn angular_frequency(&self) -> Scalar {
        self.omega
    }
}

impl Charge for Oscillator {
    fn charge(&self) -> Scalar {
        self.charge
    }

    fn position(&self, t: Scalar) -> R3 {
        let (ax, ay) = self.amplitude;
        self.center + R3::new(ax * (self.omega * t).sin(), ay * (self.omega * t + self.phase).sin(), 0.0)
    }

    fn velocity(&self, t: Scalar) -> R3 {
        let (ax, ay) = self.amplitude;
        self.omega * R3::new(ax * (self.omega * t).cos(), ay * (self.omega * t + self.phase).cos(), 0.0)
    }

    fn acceleration(&self, t: Scalar) -> R3 {
        let (ax, ay) = self.amplitude;
        -self.omega * self.omega * R3::new(ax * (self.omega * t).sin(), ay * (self.omega * t + self.phase).sin(), 0.0)
    }

    fn period(&self) -> Option<Scalar> {
        Some(2.0 * std::f64::consts::PI / self.omega)
    }

    fn excursion(&self) -> Scalar {
        self.amplitude.0.abs().hypot(self.amplitude.1.abs())
    }

    fn anchor(&self) -> R3 {
        self.center
    }
}
