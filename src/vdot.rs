//! VDOT fitness model
//!
//! Forward model: a race performance (distance + time) becomes a VDOT value
//! using the Daniels-Gilbert oxygen cost and %VO2max curves.
//!
//! Inverse model: there is no closed-form inverse, so the predicted time for a
//! distance at a given VDOT is found by bisection over running velocity.
//!
//! The bisection bracket [`VELOCITY_BRACKET`] covers human running speeds
//! (100-500 m/min). The VDOT values it can represent depend on the distance
//! (at 5000 m the slow edge already implies VDOT ~16.3); outside them the
//! solver converges to a bracket edge instead of a true root. Use
//! [`try_project_time`] to reject such inputs up front.

use crate::error::PaceError;
use std::ops::RangeInclusive;
use tracing::debug;

/// Velocity search bracket for the inverse solver, in meters per minute
pub const VELOCITY_BRACKET: (f64, f64) = (100.0, 500.0);

/// Bisection rounds; 400 m/min / 2^30 keeps velocity error far below 0.001%
pub const BISECTION_ITERATIONS: usize = 30;

/// VDOT values seen in human runners, from untrained walkers to world class
pub const PLAUSIBLE_VDOT: RangeInclusive<f64> = 4.0..=85.0;

/// Fraction of VO2max sustainable for a race lasting `time_minutes`
pub fn percent_vo2max(time_minutes: f64) -> f64 {
    0.8 + 0.189439 * (-0.012778 * time_minutes).exp()
        + 0.2989558 * (-0.1932605 * time_minutes).exp()
}

/// Oxygen cost (ml/kg/min) of running at `velocity` meters per minute
pub fn vo2_at_velocity(velocity: f64) -> f64 {
    -4.60 + 0.182258 * velocity + 0.000104 * velocity.powi(2)
}

/// Estimate VDOT from a race performance.
///
/// Returns `0.0` when `time_seconds` is not positive: no fitness data yet.
pub fn estimate_vdot(distance_meters: f64, time_seconds: f64) -> f64 {
    if !(time_seconds > 0.0) {
        return 0.0;
    }

    let time_minutes = time_seconds / 60.0;
    let velocity = distance_meters / time_minutes;

    vo2_at_velocity(velocity) / percent_vo2max(time_minutes)
}

/// VDOT implied by covering `distance_meters` at `velocity` meters per minute
fn implied_vdot(velocity: f64, distance_meters: f64) -> f64 {
    vo2_at_velocity(velocity) / percent_vo2max(distance_meters / velocity)
}

/// VDOT range [`VELOCITY_BRACKET`] can represent for `distance_meters`
pub fn projectable_range(distance_meters: f64) -> RangeInclusive<f64> {
    let (slow, fast) = VELOCITY_BRACKET;
    implied_vdot(slow, distance_meters)..=implied_vdot(fast, distance_meters)
}

/// Predict the race time in seconds for `distance_meters` at `vdot`.
///
/// Bisects velocity inside [`VELOCITY_BRACKET`] for [`BISECTION_ITERATIONS`]
/// rounds. The implied VDOT `vo2 / %VO2max` is monotonically increasing in
/// velocity over the bracket, so each round keeps the root bracketed.
pub fn project_time(vdot: f64, distance_meters: f64) -> f64 {
    if !PLAUSIBLE_VDOT.contains(&vdot) {
        debug!(
            vdot,
            distance_meters,
            "VDOT outside plausible range, projection will clamp to bracket edge"
        );
    }

    let (mut min_velocity, mut max_velocity) = VELOCITY_BRACKET;

    for _ in 0..BISECTION_ITERATIONS {
        let velocity = (min_velocity + max_velocity) / 2.0;

        if implied_vdot(velocity, distance_meters) < vdot {
            min_velocity = velocity;
        } else {
            max_velocity = velocity;
        }
    }

    let velocity = (min_velocity + max_velocity) / 2.0;
    (distance_meters / velocity) * 60.0
}

/// Strict variant of [`project_time`].
///
/// Rejects VDOT outside [`PLAUSIBLE_VDOT`], and VDOT whose root for this
/// distance lies outside [`VELOCITY_BRACKET`] (see [`projectable_range`]),
/// instead of returning a bracket-edge time.
pub fn try_project_time(vdot: f64, distance_meters: f64) -> Result<f64, PaceError> {
    if !(distance_meters > 0.0) || !distance_meters.is_finite() {
        return Err(PaceError::InvalidDistance {
            meters: distance_meters,
        });
    }

    if !PLAUSIBLE_VDOT.contains(&vdot) {
        return Err(PaceError::VdotOutOfRange {
            vdot,
            min: *PLAUSIBLE_VDOT.start(),
            max: *PLAUSIBLE_VDOT.end(),
        });
    }

    // Implied VDOT is monotonic in velocity, so the edges bound every root
    let projectable = projectable_range(distance_meters);
    if !projectable.contains(&vdot) {
        return Err(PaceError::VdotOutOfRange {
            vdot,
            min: *projectable.start(),
            max: *projectable.end(),
        });
    }

    Ok(project_time(vdot, distance_meters))
}
