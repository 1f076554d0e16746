use std::sync::Arc;

use anyhow::{ensure, Result};

use crate::base::goal_region::GoalRegion;
use crate::base::spaces::{RealVectorBounds, RealVectorStateSpace, SO2StateSpace, SO3StateSpace};
use crate::base::state::State;
use crate::base::state_validity_checker::ValidityChecker;
use crate::base::statespace::StateSpace;

/// Everything a planner needs to know about *what* to solve: the space to search, where to
/// start, and what counts as reaching the goal.
pub struct ProblemDefinition {
    state_space: Arc<dyn StateSpace>,
    start: State,
    goal: Arc<std::sync::Mutex<dyn GoalRegion>>,
}

impl ProblemDefinition {
    pub fn new(
        state_space: Arc<dyn StateSpace>,
        start: State,
        goal: Arc<std::sync::Mutex<dyn GoalRegion>>,
    ) -> Result<Self> {
        ensure!(
            state_space.satisfies_bounds(&start),
            "start state does not satisfy the state space's bounds"
        );
        Ok(Self {
            state_space,
            start,
            goal,
        })
    }

    pub fn from_real_vector(
        bounds: RealVectorBounds,
        start: impl Into<Vec<f64>>,
        goal: Arc<std::sync::Mutex<dyn GoalRegion>>,
    ) -> Result<Self> {
        let space: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::new(bounds)?);
        Self::new(space, State::real_vector(start), goal)
    }

    pub fn from_so2(start_angle: f64, goal: Arc<std::sync::Mutex<dyn GoalRegion>>) -> Result<Self> {
        let space: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
        Self::new(space, State::so2(start_angle), goal)
    }

    pub fn from_so3(
        start: (f64, f64, f64, f64),
        goal: Arc<std::sync::Mutex<dyn GoalRegion>>,
    ) -> Result<Self> {
        let space: Arc<dyn StateSpace> = Arc::new(SO3StateSpace::new());
        let (x, y, z, w) = start;
        Self::new(space, State::so3(x, y, z, w), goal)
    }

    pub fn state_space(&self) -> Arc<dyn StateSpace> {
        self.state_space.clone()
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn goal(&self) -> Arc<std::sync::Mutex<dyn GoalRegion>> {
        self.goal.clone()
    }

    pub fn start_is_valid(&self, checker: &dyn ValidityChecker) -> Result<bool> {
        Ok(checker.is_valid(&self.start)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::goal_region::GoalState;
    use std::sync::Mutex;

    #[test]
    fn rejects_out_of_bounds_start() {
        let mut bounds = RealVectorBounds::new(1);
        bounds.set_low(0.0);
        bounds.set_high(1.0);
        let space: Arc<dyn StateSpace> =
            Arc::new(RealVectorStateSpace::new(bounds.clone()).unwrap());
        let goal = Arc::new(Mutex::new(GoalState::new(
            space.clone(),
            State::real_vector([0.5]),
            0.1,
        )));
        let result = ProblemDefinition::from_real_vector(bounds, [5.0], goal);
        assert!(result.is_err());
    }
}
