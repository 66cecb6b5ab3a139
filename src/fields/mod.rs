//! Electric fields of moving point charges.

mod charge;
mod retarded;
mod snapshot;

pub use charge::{Charge, Oscillator};
pub use retarded::{electric_field_at, lienard_wiechert_field, retarded_time, FieldEvaluation};
pub use snapshot::{
    compute_field_snapshot, oscillator_for, snapshot_of, FieldParams, FieldSample, DOMAIN_HALF_WIDTH, GRID_POINTS,
    RETARDED_TIME_MAX_ITERATIONS, RETARDED_TIME_TOLERANCE, TIME_SAMPLES,
};
