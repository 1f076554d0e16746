use std::sync::atomic::{AtomicU64, Ordering};

use crate::base::state::State;
use crate::error::CallbackError;

pub mod discrete_motion_validator;

#[derive(Debug, Default)]
pub struct MotionCheckStats {
    valid: AtomicU64,
    invalid: AtomicU64,
}

impl MotionCheckStats {
    pub fn valid_motion_count(&self) -> u64 {
        self.valid.load(Ordering::Relaxed)
    }

    pub fn invalid_motion_count(&self) -> u64 {
        self.invalid.load(Ordering::Relaxed)
    }

    pub fn checked_motion_count(&self) -> u64 {
        self.valid_motion_count() + self.invalid_motion_count()
    }

    pub fn valid_motion_fraction(&self) -> f64 {
        let total = self.checked_motion_count();
        if total == 0 {
            0.0
        } else {
            self.valid_motion_count() as f64 / total as f64
        }
    }

    pub(crate) fn record(&self, valid: bool) {
        if valid {
            self.valid.fetch_add(1, Ordering::Relaxed);
        } else {
            self.invalid.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn reset(&self) {
        self.valid.store(0, Ordering::Relaxed);
        self.invalid.store(0, Ordering::Relaxed);
    }
}

/// Feasibility check for an entire segment between two states, not just the endpoints. `s1` is
/// assumed already valid.
pub trait MotionValidator: Send + Sync {
    fn check_motion(&self, s1: &State, s2: &State) -> Result<bool, CallbackError>;

    /// As `check_motion`, but also reports the furthest point along `[s1, s2]` (parametrized by
    /// `t` in `[0, 1]`) that is still known valid — used by RRT to advance the tree as far as
    /// possible along a blocked extension instead of discarding the whole step.
    fn check_motion_with_last_valid(
        &self,
        s1: &State,
        s2: &State,
    ) -> Result<(bool, State, f64), CallbackError>;

    fn stats(&self) -> &MotionCheckStats;
}
