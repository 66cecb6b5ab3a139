use crate::constants::{SPEED_OF_LIGHT, VACUUM_PERMITTIVITY};
use crate::math::{R3, Scalar};
use crate::roots::{newton_bracketed, RootOptions, RootReport};

use super::Charge;

/// Solves `|X − r(t_r)| = c (t − t_r)` for the retarded time `t_r ≤ t`.
///
/// For a charge slower than light the residual is strictly increasing in `t_r`
/// (its derivative is `c − R̂·v > 0`), so the root is unique. It is bracketed by
/// `t` itself, where the residual is `|X − r(t)| ≥ 0`, and by twice the time light
/// needs to cross the farthest distance the charge can be from `X`, where it is
/// strictly negative. The search runs independently for every observation point.
pub fn retarded_time<C>(charge: &C, point: &R3, t: Scalar, options: RootOptions) -> RootReport
where
    C: Charge + ?Sized,
{
    let farthest = (point - charge.anchor()).norm() + charge.excursion();
    let earliest = t - 2.0 * farthest / SPEED_OF_LIGHT;
    let guess = t - (point - charge.position(t)).norm() / SPEED_OF_LIGHT;
    let residual = |tr: Scalar| {
        let separation = point - charge.position(tr);
        let distance = separation.norm();
        let value = distance - SPEED_OF_LIGHT * (t - tr);
        let slope = if distance > 0.0 {
            SPEED_OF_LIGHT - separation.dot(&charge.velocity(tr)) / distance
        } else {
            SPEED_OF_LIGHT
        };
        (value, slope)
    };
    newton_bracketed(residual, earliest, t, guess, options)
}

/// Liénard–Wiechert electric field at `point` from a charge with kinematics evaluated at
/// the retarded time `retarded`:
///
/// ```text
/// E = q/(4πε₀) · R / (R·u)³ · [(c² − v²) u + R × (u × a)],   u = c R̂ − v
/// ```
///
/// The first term is the velocity (Coulomb-like) field, the second the radiation field.
/// The result is non-finite when `point` coincides with the retarded position.
#[must_use]
pub fn lienard_wiechert_field<C>(charge: &C, point: &R3, retarded: Scalar) -> R3
where
    C: Charge + ?Sized,
{
    let c = SPEED_OF_LIGHT;
    let separation = point - charge.position(retarded);
    let distance = separation.norm();
    let v = charge.velocity(retarded);
    let a = charge.acceleration(retarded);
    let u = separation * (c / distance) - v;
    let coeff = charge.charge() / (4.0 * std::f64::consts::PI * VACUUM_PERMITTIVITY);
    let scale = coeff * distance / separation.dot(&u).powi(3);
    (u * (c * c - v.norm_squared()) + separation.cross(&u.cross(&a))) * scale
}

/// Field and solver diagnostics at one observation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEvaluation {
    /// Electric field in V/m (may be non-finite at the charge itself).
    pub field: R3,
    /// Retarded time used.
    pub retarded_time: Scalar,
    /// Whether the retarded-time solve met its tolerance.
    pub converged: bool,
}

/// Solves for the retarded time at `point` and evaluates the Liénard–Wiechert field there.
#[must_use]
pub fn electric_field_at<C>(charge: &C, point: &R3, t: Scalar, options: RootOptions) -> FieldEvaluation
where
    C: Charge + ?Sized,
{
    let report = retarded_time(charge, point, t, options);
    FieldEvaluation {
        field: lienard_wiechert_field(charge, point, report.root),
        retarded_time: report.root,
        converged: report.converged,
    }
}
