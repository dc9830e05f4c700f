//! Stepwise-linear price schedules
//!
//! The value changes from `v0` at `t0` to `v1` at `t1` stepwise linearly
//! in time, updating once per `step` seconds:
//!
//! ```text
//!                       t - t0
//!                  step ______
//!                         step
//! v = v0 + (v1 - v0) ___________
//!                      t1 - t0
//! ```
//!
//! A partial step does not move the value, so the result is a staircase
//! approximation of the linear ramp. Division truncates.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Value at moment `t`, given the initial value `v0` at `t0`, the final
/// value `v1` at `t1` and the step size `step` (seconds).
///
/// Pure: no side effects, safe to evaluate concurrently. For `t <= t0`
/// the result is exactly `v0`. Beyond `t1` the formula extrapolates;
/// callers that want the schedule to settle at `v1` clamp explicitly
/// (see [`PriceSchedule::value_at`]).
pub fn linear_stepwise(t0: u64, v0: u128, t1: u64, v1: u128, step: u64, t: u64) -> Result<u128> {
    if t1 <= t0 {
        return Err(PricingError::EmptyInterval { t0, t1 });
    }
    if step == 0 {
        return Err(PricingError::ZeroStep);
    }
    if t <= t0 {
        return Ok(v0);
    }

    // whole steps elapsed since t0
    let stepped = (t - t0) / step * step;
    let span = (t1 - t0) as u128;

    if v1 >= v0 {
        let delta = (v1 - v0)
            .checked_mul(stepped as u128)
            .ok_or(PricingError::ValueOverflow)?
            / span;
        v0.checked_add(delta).ok_or(PricingError::ValueOverflow)
    } else {
        let delta = (v0 - v1)
            .checked_mul(stepped as u128)
            .ok_or(PricingError::ValueOverflow)?
            / span;
        Ok(v0.saturating_sub(delta))
    }
}

/// An immutable interpolation schedule between two calibration points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSchedule {
    pub t0: u64,
    pub v0: u128,
    pub t1: u64,
    pub v1: u128,
    pub step: u64,
}

impl PriceSchedule {
    pub fn new(t0: u64, v0: u128, t1: u64, v1: u128, step: u64) -> Result<Self> {
        if t1 <= t0 {
            return Err(PricingError::EmptyInterval { t0, t1 });
        }
        if step == 0 {
            return Err(PricingError::ZeroStep);
        }
        Ok(Self { t0, v0, t1, v1, step })
    }

    /// Value at `t`, clamped to `v0` before the schedule starts and to
    /// `v1` once it ends — the clamp both market components apply.
    pub fn value_at(&self, t: u64) -> Result<u128> {
        if t <= self.t0 {
            return Ok(self.v0);
        }
        if t >= self.t1 {
            return Ok(self.v1);
        }
        linear_stepwise(self.t0, self.v0, self.t1, self.v1, self.step, t)
    }

    /// True when the schedule falls over time (Dutch direction)
    pub fn is_falling(&self) -> bool {
        self.v1 < self.v0
    }
}
