use std::sync::Arc;

use crate::base::state::State;
use crate::base::state_validity_checker::ValidityChecker;
use crate::base::statespace::StateSpace;
use crate::error::CallbackError;
use crate::randomness::Rng;
use crate::tools::config::magic;

/// The set of acceptable solution endpoints. Planners query it two ways: "is this state good
/// enough" (`is_satisfied`, cheap, called on every tree/roadmap vertex) and "give me a state in
/// the goal" (`sample_goal`, used to seed or extend the search toward the goal).
pub trait GoalRegion: Send + Sync {
    fn is_satisfied(&self, state: &State) -> Result<bool, CallbackError>;

    /// Draw a state from the goal region. Implementations that can't guarantee the first draw
    /// satisfies their own `is_satisfied` (e.g. rejection samplers) may be called repeatedly by
    /// the planner; `Ok(None)` signals "try again", distinct from a hard `Err`.
    fn sample_goal(&mut self, rng: &mut Rng) -> Result<Option<State>, CallbackError>;
}

/// A goal region around a single representative state, with a per-space-kind neighborhood:
/// a disk of the given radius for `RealVector`, an angular interval for `SO2`, and an angular
/// cap (geodesic distance threshold) for `SO3`. This mirrors the three concrete goal classes
/// planning problems in this crate are built against.
pub struct GoalState {
    state_space: Arc<dyn StateSpace>,
    representative: State,
    threshold: f64,
}

impl GoalState {
    pub fn new(state_space: Arc<dyn StateSpace>, representative: State, threshold: f64) -> Self {
        Self {
            state_space,
            representative,
            threshold,
        }
    }

    fn sample_real_vector(&self, rng: &mut Rng) -> State {
        let center = self.representative.as_real_vector();
        let dim = center.len();
        if dim == 2 {
            let (dx, dy) = rng.uniform_in_disk(self.threshold);
            return State::real_vector([center[0] + dx, center[1] + dy]);
        }
        // Higher-dimensional goal regions: rejection-sample inside the bounding box implied by
        // the threshold along each axis, then clip to the L2 ball.
        loop {
            let mut candidate = center.clone();
            for x in candidate.iter_mut() {
                *x += rng.uniform_real(-self.threshold, self.threshold);
            }
            if (candidate.clone() - center).norm() <= self.threshold {
                return State::RealVector(candidate);
            }
        }
    }

    fn sample_so2(&self, rng: &mut Rng) -> State {
        let center = self.representative.as_so2();
        State::so2(rng.uniform_real(center - self.threshold, center + self.threshold))
    }

    fn sample_so3(&self, rng: &mut Rng) -> Option<State> {
        let candidate = self.state_space.sample_uniform(rng);
        if self.state_space.distance(&candidate, &self.representative) <= self.threshold {
            Some(candidate)
        } else {
            None
        }
    }
}

impl GoalRegion for GoalState {
    fn is_satisfied(&self, state: &State) -> Result<bool, CallbackError> {
        Ok(self.state_space.distance(state, &self.representative) <= self.threshold)
    }

    fn sample_goal(&mut self, rng: &mut Rng) -> Result<Option<State>, CallbackError> {
        let sample = match &self.representative {
            State::RealVector(_) => Some(self.sample_real_vector(rng)),
            State::SO2(_) => Some(self.sample_so2(rng)),
            State::SO3(_) => self.sample_so3(rng),
        };
        Ok(sample)
    }
}

/// Repeatedly ask a `GoalRegion` for a sample until it produces one or the per-call attempt
/// budget is exhausted, for goal regions whose `sample_goal` may return `Ok(None)`.
pub fn sample_goal_with_retry(
    goal: &mut dyn GoalRegion,
    rng: &mut Rng,
) -> Result<Option<State>, CallbackError> {
    for _ in 0..magic::MAX_GOAL_SAMPLE_ATTEMPTS_PER_CALL {
        if let Some(state) = goal.sample_goal(rng)? {
            return Ok(Some(state));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::{RealVectorBounds, RealVectorStateSpace, SO2StateSpace};

    #[test]
    fn real_vector_goal_samples_within_radius() {
        let mut bounds = RealVectorBounds::new(2);
        bounds.set_low(-10.0);
        bounds.set_high(10.0);
        let space: Arc<dyn StateSpace> =
            Arc::new(RealVectorStateSpace::new(bounds).unwrap());
        let center = State::real_vector([1.0, 1.0]);
        let mut goal = GoalState::new(space.clone(), center.clone(), 0.5);
        let mut rng = Rng::with_seed(9);
        for _ in 0..32 {
            let sample = goal.sample_goal(&mut rng).unwrap().unwrap();
            assert!(space.distance(&sample, &center) <= 0.5 + 1e-9);
            assert!(goal.is_satisfied(&sample).unwrap());
        }
    }

    #[test]
    fn so2_goal_samples_within_arc() {
        let space: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
        let center = State::so2(0.0);
        let mut goal = GoalState::new(space.clone(), center.clone(), 0.2);
        let mut rng = Rng::with_seed(9);
        for _ in 0..32 {
            let sample = goal.sample_goal(&mut rng).unwrap().unwrap();
            assert!(space.distance(&sample, &center) <= 0.2 + 1e-9);
        }
    }
}
