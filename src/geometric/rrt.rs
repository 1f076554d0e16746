use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::base::goal_region::sample_goal_with_retry;
use crate::base::motion_validator::discrete_motion_validator::DiscreteMotionValidator;
use crate::base::motion_validator::MotionValidator;
use crate::base::path::Path;
use crate::base::planner::Planner;
use crate::base::problem_definition::ProblemDefinition;
use crate::base::state_validity_checker::ValidityChecker;
use crate::error::PlannerError;
use crate::geometric::tree::Tree;
use crate::randomness::{Rng, DEFAULT_RNG_SEED};
use crate::tools::config::magic;

/// Rapidly-exploring Random Tree: grow a single tree from the start, biasing a fraction of
/// samples toward the goal, steering each sample toward the tree by at most `max_distance`.
pub struct Rrt {
    problem: Arc<ProblemDefinition>,
    max_distance: f64,
    goal_bias: f64,
    rng: Rng,
    checker: Option<Arc<dyn ValidityChecker>>,
    motion_validator: Option<DiscreteMotionValidator>,
    tree: Option<Tree>,
}

impl Rrt {
    pub fn new(problem: Arc<ProblemDefinition>) -> Self {
        let max_distance = problem.state_space().maximum_extent() * 0.1;
        Self {
            problem,
            max_distance,
            goal_bias: 0.05,
            rng: Rng::with_seed(DEFAULT_RNG_SEED),
            checker: None,
            motion_validator: None,
            tree: None,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_goal_bias(mut self, goal_bias: f64) -> Self {
        self.goal_bias = goal_bias;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }
}

/// Move `from` toward `to` by at most `max_distance`.
fn steer(
    space: &Arc<dyn crate::base::statespace::StateSpace>,
    from: &crate::base::state::State,
    to: &crate::base::state::State,
    max_distance: f64,
) -> crate::base::state::State {
    let distance = space.distance(from, to);
    if distance <= max_distance {
        to.clone()
    } else {
        space.interpolate(from, to, max_distance / distance)
    }
}

impl Planner for Rrt {
    fn setup(&mut self, checker: Arc<dyn ValidityChecker>) {
        let space = self.problem.state_space();
        let resolution = magic::motion_validator_resolution(self.max_distance);
        self.motion_validator = Some(DiscreteMotionValidator::new(
            space,
            checker.clone(),
            resolution,
        ));
        self.checker = Some(checker);
        self.tree = Some(Tree::with_root(
            &self.problem.state_space(),
            self.problem.start().clone(),
        ));
        info!(max_distance = self.max_distance, goal_bias = self.goal_bias, "rrt setup complete");
    }

    fn solve(&mut self, timeout: Duration) -> Result<Path, PlannerError> {
        let checker = self.checker.clone().ok_or(PlannerError::NotConfigured)?;
        let motion_validator = self
            .motion_validator
            .as_ref()
            .ok_or(PlannerError::NotConfigured)?;
        let tree = self.tree.as_mut().ok_or(PlannerError::NotConfigured)?;

        if !checker.is_valid(self.problem.start())? {
            return Err(PlannerError::InvalidStart);
        }

        let space = self.problem.state_space();
        let goal = self.problem.goal();
        let deadline = Instant::now() + timeout;
        let mut total_goal_attempts: u32 = 0;

        while Instant::now() < deadline {
            let sample = if self.rng.bernoulli(self.goal_bias) {
                let mut goal_guard = goal.lock().unwrap();
                match sample_goal_with_retry(&mut *goal_guard, &mut self.rng)? {
                    Some(state) => state,
                    None => {
                        total_goal_attempts += magic::MAX_GOAL_SAMPLE_ATTEMPTS_PER_CALL;
                        if total_goal_attempts >= magic::MAX_GOAL_SAMPLE_ATTEMPTS_TOTAL {
                            return Err(PlannerError::InvalidGoalSample);
                        }
                        continue;
                    }
                }
            } else {
                space.sample_uniform(&mut self.rng)
            };

            let nearest_id = tree.nearest(&sample);
            let nearest_state = tree.node(nearest_id).state.clone();

            let mut new_state = steer(&space, &nearest_state, &sample, self.max_distance);
            space.enforce_bounds(&mut new_state);

            if !checker.is_valid(&new_state)? {
                continue;
            }
            if !motion_validator.check_motion(&nearest_state, &new_state)? {
                continue;
            }

            let edge_cost = space.distance(&nearest_state, &new_state);
            let new_id = tree.add_node(new_state.clone(), nearest_id, edge_cost);

            if goal.lock().unwrap().is_satisfied(&new_state)? {
                debug!(tree_size = tree.len(), "rrt found a solution");
                return Ok(Path::new(tree.path_to_root(new_id)));
            }
        }

        Err(PlannerError::Timeout)
    }

    fn name(&self) -> &'static str {
        "RRT"
    }
}
