use std::f64::consts::FRAC_PI_2;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{beta_from_beta_gamma, ELEMENTARY_CHARGE, SPEED_OF_LIGHT};
use crate::errors::{require_finite, Result, SimError};
use crate::math::{finite_or, R3, Scalar};
use crate::roots::RootOptions;
use crate::sweep::linspace;

use super::{electric_field_at, Charge, Oscillator};

/// Half-width of the square observation window in meters.
pub const DOMAIN_HALF_WIDTH: Scalar = 1.0e8;
/// Grid points along each axis of the observation window.
pub const GRID_POINTS: usize = 201;
/// Time samples covering one oscillation period.
pub const TIME_SAMPLES: usize = 100;
/// Retarded-time tolerance as a fraction of the oscillation period.
pub const RETARDED_TIME_TOLERANCE: Scalar = 1.0e-10;
/// Iteration cap of the retarded-time solve at each grid point.
pub const RETARDED_TIME_MAX_ITERATIONS: usize = 100;

/// Inputs of [`compute_field_snapshot`].
///
/// Deserialisation also accepts the slider identifiers of the web front end
/// (`ti`, `lgbG`, `frac_Ax_lim`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Which of the [`TIME_SAMPLES`] instants of the period to render.
    #[serde(alias = "ti")]
    pub time_index: usize,
    /// log10 of βγ at peak speed.
    #[serde(alias = "lgbG")]
    pub lg_gamma: Scalar,
    /// x amplitude as a fraction of a quarter of the window half-width.
    #[serde(alias = "frac_Ax_lim")]
    pub frac_amplitude_x: Scalar,
    /// y amplitude as a fraction of a quarter of the window half-width.
    #[serde(alias = "frac_Ay_lim")]
    pub frac_amplitude_y: Scalar,
    /// Number of field lines the plotter overlays. Not used by the computation.
    #[serde(alias = "Nlines")]
    pub num_trajectory_lines: usize,
    /// log10 of the colour-scale ceiling the plotter applies. Not used by the computation.
    #[serde(alias = "lgfmax")]
    pub lg_field_ceiling: Scalar,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            time_index: 0,
            lg_gamma: 1.0,
            frac_amplitude_x: 0.1,
            frac_amplitude_y: 0.1,
            num_trajectory_lines: 20,
            lg_field_ceiling: -24.0,
        }
    }
}

impl FieldParams {
    /// Checks every input and returns the peak speed fraction β.
    pub fn validate(&self) -> Result<Scalar> {
        if self.time_index >= TIME_SAMPLES {
            return Err(SimError::OutOfRange { name: "time_index", value: self.time_index, len: TIME_SAMPLES });
        }
        require_finite("lg_gamma", self.lg_gamma)?;
        require_finite("lg_field_ceiling", self.lg_field_ceiling)?;
        for (name, frac) in [("frac_amplitude_x", self.frac_amplitude_x), ("frac_amplitude_y", self.frac_amplitude_y)] {
            require_finite(name, frac)?;
            if frac < 0.0 {
                return Err(SimError::invalid(name, format!("must be non-negative, got {frac}")));
            }
        }
        if self.frac_amplitude_x == 0.0 && self.frac_amplitude_y == 0.0 {
            return Err(SimError::invalid("frac_amplitude_x", "at least one amplitude must be non-zero"));
        }
        let beta = beta_from_beta_gamma(10f64.powf(self.lg_gamma));
        if !beta.is_finite() || beta >= 1.0 {
            return Err(SimError::invalid("lg_gamma", format!("peak speed β = {beta} is not subluminal")));
        }
        Ok(beta)
    }
}

/// Field magnitude on the observation grid at one instant, plus the trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSample {
    /// Grid abscissae (m).
    #[serde(rename = "X")]
    pub x: Vec<Scalar>,
    /// Grid ordinates (m).
    #[serde(rename = "Y")]
    pub y: Vec<Scalar>,
    /// `|E|` in the x–y plane (V/m), `z[j][i]` at `(x[i], y[j])`.
    #[serde(rename = "Z")]
    pub z: Vec<Vec<Scalar>>,
    /// Charge x position at the rendered instant (one element).
    pub x_charge: Vec<Scalar>,
    /// Charge y position at the rendered instant (one element).
    pub y_charge: Vec<Scalar>,
    /// Charge x positions over one period.
    pub x_traj: Vec<Scalar>,
    /// Charge y positions over one period.
    pub y_traj: Vec<Scalar>,
    /// Grid points whose retarded-time solve missed its tolerance.
    #[serde(skip)]
    pub unconverged_points: usize,
    /// Grid points whose field was non-finite and replaced by zero.
    #[serde(skip)]
    pub sanitized_points: usize,
}

/// The oscillating charge rendered by [`compute_field_snapshot`] for `params`.
pub fn oscillator_for(params: &FieldParams) -> Result<Oscillator> {
    let beta = params.validate()?;
    let quarter = DOMAIN_HALF_WIDTH / 4.0;
    Oscillator::new(
        ELEMENTARY_CHARGE,
        R3::new(-0.75 * DOMAIN_HALF_WIDTH, 0.0, 0.0),
        (params.frac_amplitude_x * quarter, params.frac_amplitude_y * quarter),
        beta * SPEED_OF_LIGHT,
        FRAC_PI_2,
    )
    .ok_or_else(|| SimError::invalid("frac_amplitude_x", "amplitudes admit no finite oscillation frequency"))
}

/// Electric-field magnitude of an oscillating point charge on a fixed grid.
pub fn compute_field_snapshot(params: &FieldParams) -> Result<FieldSample> {
    let charge = oscillator_for(params)?;
    debug!(
        "field: ω = {:.6e} rad/s, overlay of {} lines with ceiling 1e{} V/m",
        charge.angular_frequency(),
        params.num_trajectory_lines,
        params.lg_field_ceiling
    );
    snapshot_of(&charge, params.time_index)
}

/// Renders any periodic [`Charge`] at sample `time_index` of its period.
pub fn snapshot_of<C>(charge: &C, time_index: usize) -> Result<FieldSample>
where
    C: Charge + ?Sized,
{
    if time_index >= TIME_SAMPLES {
        return Err(SimError::OutOfRange { name: "time_index", value: time_index, len: TIME_SAMPLES });
    }
    let period = charge
        .period()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| SimError::invalid("charge", "motion must have a finite positive period"))?;
    let times = linspace(0.0, period, TIME_SAMPLES);
    let t = times[time_index];
    let options = RootOptions { tolerance: RETARDED_TIME_TOLERANCE * period, max_iterations: RETARDED_TIME_MAX_ITERATIONS };

    let xs = linspace(-DOMAIN_HALF_WIDTH, DOMAIN_HALF_WIDTH, GRID_POINTS);
    let ys = xs.clone();
    let mut unconverged_points = 0;
    let mut sanitized_points = 0;
    let z: Vec<Vec<Scalar>> = ys
        .iter()
        .map(|&y| {
            xs.iter()
                .map(|&x| {
                    let eval = electric_field_at(charge, &R3::new(x, y, 0.0), t, options);
                    if !eval.converged {
                        unconverged_points += 1;
                    }
                    let magnitude = eval.field.x.hypot(eval.field.y);
                    if !magnitude.is_finite() {
                        sanitized_points += 1;
                    }
                    finite_or(magnitude, 0.0)
                })
                .collect::<Vec<Scalar>>()
        })
        .collect();
    debug!("field: t = {t:.6e} s of period {period:.6e} s on a {GRID_POINTS}x{GRID_POINTS} grid");
    if unconverged_points > 0 {
        warn!("field: retarded-time solve missed tolerance at {unconverged_points} grid points");
    }
    if sanitized_points > 0 {
        debug!("field: {sanitized_points} singular grid points set to zero");
    }

    let now = charge.position(t);
    let trajectory: Vec<R3> = times.iter().map(|&ts| charge.position(ts)).collect();
    Ok(FieldSample {
        x: xs,
        y: ys,
        z,
        x_charge: vec![now.x],
        y_charge: vec![now.y],
        x_traj: trajectory.iter().map(|p| p.x).collect(),
        y_traj: trajectory.iter().map(|p| p.y).collect(),
        unconverged_points,
        sanitized_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_past_last_sample_is_rejected() {
        let params = FieldParams { time_index: TIME_SAMPLES, ..FieldParams::default() };
        assert!(matches!(
            compute_field_snapshot(&params),
            Err(SimError::OutOfRange { name: "time_index", value: 100, len: 100 })
        ));
    }

    #[test]
    fn superluminal_speed_is_rejected() {
        let params = FieldParams { lg_gamma: 20.0, ..FieldParams::default() };
        assert!(matches!(compute_field_snapshot(&params), Err(SimError::InvalidParameter { name: "lg_gamma", .. })));
    }

    #[test]
    fn resting_charge_is_rejected() {
        let params = FieldParams { frac_amplitude_x: 0.0, frac_amplitude_y: 0.0, ..FieldParams::default() };
        assert!(compute_field_snapshot(&params).is_err());
        let params = FieldParams { frac_amplitude_y: -0.1, ..FieldParams::default() };
        assert!(compute_field_snapshot(&params).is_err());
    }

    #[test]
    fn oscillator_is_centred_left_of_the_window() {
        let osc = oscillator_for(&FieldParams::default()).unwrap();
        assert_eq!(osc.anchor(), R3::new(-0.75 * DOMAIN_HALF_WIDTH, 0.0, 0.0));
        assert!(osc.excursion() < DOMAIN_HALF_WIDTH / 4.0);
    }

    #[test]
    fn grid_node_on_the_charge_is_zeroed() {
        // Ax = lim/4 and t = 0 put the charge exactly on the node (X[25], Y[100]).
        let params = FieldParams { time_index: 0, frac_amplitude_x: 1.0, frac_amplitude_y: 0.0, ..FieldParams::default() };
        let sample = compute_field_snapshot(&params).unwrap();
        assert_eq!((sample.x_charge[0], sample.y_charge[0]), (sample.x[25], sample.y[100]));
        assert_eq!(sample.sanitized_points, 1);
        assert_eq!(sample.z[100][25], 0.0);
        for (j, row) in sample.z.iter().enumerate() {
            for (i, &m) in row.iter().enumerate() {
                if (j, i) != (100, 25) {
                    assert!(m.is_finite() && m > 0.0, "z[{j}][{i}] = {m}");
                }
            }
        }
    }

    #[test]
    fn last_sample_closes_the_period() {
        let params = FieldParams { time_index: TIME_SAMPLES - 1, ..FieldParams::default() };
        let sample = compute_field_snapshot(&params).unwrap();
        assert!((sample.x_charge[0] - sample.x_traj[0]).abs() < 1e-6 * DOMAIN_HALF_WIDTH);
        assert_eq!(sample.unconverged_points, 0);
    }
}
