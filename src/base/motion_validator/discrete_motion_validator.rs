use std::sync::Arc;

use crate::base::motion_validator::{MotionCheckStats, MotionValidator};
use crate::base::state::State;
use crate::base::state_validity_checker::ValidityChecker;
use crate::base::statespace::StateSpace;
use crate::error::CallbackError;

/// Walks the interpolated path from `s1` to `s2` at a fixed step size `rho`, checking each
/// intermediate state in order. Simpler and more cache-friendly than a bisection search; since
/// every step must be checked for `check_motion_with_last_valid` to report a meaningful `t`
/// anyway, a sequential walk does no more validity-checker calls than a bisecting one in the
/// common case of a fully valid or early-blocked motion.
pub struct DiscreteMotionValidator {
    state_space: Arc<dyn StateSpace>,
    checker: Arc<dyn ValidityChecker>,
    resolution: f64,
    stats: MotionCheckStats,
}

impl DiscreteMotionValidator {
    pub fn new(
        state_space: Arc<dyn StateSpace>,
        checker: Arc<dyn ValidityChecker>,
        resolution: f64,
    ) -> Self {
        Self {
            state_space,
            checker,
            resolution,
            stats: MotionCheckStats::default(),
        }
    }

    fn segment_count(&self, s1: &State, s2: &State) -> u32 {
        let distance = self.state_space.distance(s1, s2);
        (distance / self.resolution).ceil().max(1.0) as u32
    }
}

impl MotionValidator for DiscreteMotionValidator {
    fn check_motion(&self, s1: &State, s2: &State) -> Result<bool, CallbackError> {
        let (valid, _, _) = self.check_motion_with_last_valid(s1, s2)?;
        Ok(valid)
    }

    fn check_motion_with_last_valid(
        &self,
        s1: &State,
        s2: &State,
    ) -> Result<(bool, State, f64), CallbackError> {
        let segment_count = self.segment_count(s1, s2);

        let mut last_valid_state = s1.clone();
        let mut last_valid_t = 0.0;

        for step in 1..segment_count {
            let t = step as f64 / segment_count as f64;
            let candidate = self.state_space.interpolate(s1, s2, t);
            if !self.checker.is_valid(&candidate)? {
                self.stats.record(false);
                return Ok((false, last_valid_state, last_valid_t));
            }
            last_valid_state = candidate;
            last_valid_t = t;
        }

        if !self.checker.is_valid(s2)? {
            self.stats.record(false);
            return Ok((false, last_valid_state, last_valid_t));
        }

        self.stats.record(true);
        Ok((true, s2.clone(), 1.0))
    }

    fn stats(&self) -> &MotionCheckStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::{RealVectorBounds, RealVectorStateSpace};
    use crate::base::state_validity_checker::FunctionalValidityChecker;

    fn unbounded_space() -> Arc<dyn StateSpace> {
        let mut bounds = RealVectorBounds::new(1);
        bounds.set_low(-100.0);
        bounds.set_high(100.0);
        Arc::new(RealVectorStateSpace::new(bounds).unwrap())
    }

    #[test]
    fn fully_valid_motion_reaches_t_one() {
        let space = unbounded_space();
        let checker: Arc<dyn ValidityChecker> = Arc::new(FunctionalValidityChecker::new(|_: &State| true));
        let validator = DiscreteMotionValidator::new(space, checker, 0.1);
        let (valid, _, t) = validator
            .check_motion_with_last_valid(&State::real_vector([0.0]), &State::real_vector([1.0]))
            .unwrap();
        assert!(valid);
        assert!((t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn motion_blocked_midway_reports_last_valid_t() {
        let space = unbounded_space();
        let checker: Arc<dyn ValidityChecker> =
            Arc::new(FunctionalValidityChecker::new(|s: &State| s.as_real_vector()[0] < 0.5));
        let validator = DiscreteMotionValidator::new(space, checker, 0.1);
        let (valid, last_valid, t) = validator
            .check_motion_with_last_valid(&State::real_vector([0.0]), &State::real_vector([1.0]))
            .unwrap();
        assert!(!valid);
        assert!(t < 0.5 + 1e-9);
        assert!(last_valid.as_real_vector()[0] < 0.5 + 1e-9);
    }
}
