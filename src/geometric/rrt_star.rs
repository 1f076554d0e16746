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

/// RRT with asymptotic optimality: every new node chooses the lowest-cost parent among its
/// spatial neighbors rather than just the nearest node, then rewires any neighbor that would
/// become cheaper by routing through the new node. Keeps searching for the full time budget,
/// returning the best solution found rather than the first.
pub struct RrtStar {
    problem: Arc<ProblemDefinition>,
    max_distance: f64,
    rewire_radius: f64,
    goal_bias: f64,
    rng: Rng,
    checker: Option<Arc<dyn ValidityChecker>>,
    motion_validator: Option<DiscreteMotionValidator>,
    tree: Option<Tree>,
    best_goal_id: Option<usize>,
}

impl RrtStar {
    pub fn new(problem: Arc<ProblemDefinition>, search_radius: f64) -> Self {
        let max_distance = problem.state_space().maximum_extent() * 0.1;
        Self {
            problem,
            max_distance,
            rewire_radius: search_radius,
            goal_bias: 0.05,
            rng: Rng::with_seed(DEFAULT_RNG_SEED),
            checker: None,
            motion_validator: None,
            tree: None,
            best_goal_id: None,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_rewire_radius(mut self, rewire_radius: f64) -> Self {
        self.rewire_radius = rewire_radius;
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

impl Planner for RrtStar {
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
        self.best_goal_id = None;
        info!(
            max_distance = self.max_distance,
            rewire_radius = self.rewire_radius,
            "rrt* setup complete"
        );
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
            let distance_to_sample = space.distance(&nearest_state, &sample);
            let mut new_state = if distance_to_sample <= self.max_distance {
                sample.clone()
            } else {
                space.interpolate(&nearest_state, &sample, self.max_distance / distance_to_sample)
            };
            space.enforce_bounds(&mut new_state);

            if !checker.is_valid(&new_state)? {
                continue;
            }
            if !motion_validator.check_motion(&nearest_state, &new_state)? {
                continue;
            }

            let near_ids = tree.within_radius(&new_state, self.rewire_radius);

            let mut best_parent = nearest_id;
            let mut best_cost =
                tree.node(nearest_id).cost + space.distance(&nearest_state, &new_state);
            for &candidate_id in &near_ids {
                if candidate_id == nearest_id {
                    continue;
                }
                let candidate_state = tree.node(candidate_id).state.clone();
                let candidate_cost =
                    tree.node(candidate_id).cost + space.distance(&candidate_state, &new_state);
                if candidate_cost < best_cost
                    && motion_validator.check_motion(&candidate_state, &new_state)?
                {
                    best_parent = candidate_id;
                    best_cost = candidate_cost;
                }
            }

            let new_id = tree.add_node(new_state.clone(), best_parent, best_cost);

            for &near_id in &near_ids {
                if near_id == best_parent {
                    continue;
                }
                let near_state = tree.node(near_id).state.clone();
                let via_new_cost = best_cost + space.distance(&new_state, &near_state);
                if via_new_cost < tree.node(near_id).cost
                    && motion_validator.check_motion(&new_state, &near_state)?
                {
                    tree.reparent(near_id, new_id, via_new_cost);
                }
            }

            if goal.lock().unwrap().is_satisfied(&new_state)? {
                let currently_best_cost = self
                    .best_goal_id
                    .map(|id| tree.node(id).cost)
                    .unwrap_or(f64::INFINITY);
                if best_cost < currently_best_cost {
                    self.best_goal_id = Some(new_id);
                    debug!(cost = best_cost, tree_size = tree.len(), "rrt* improved solution");
                }
            }
        }

        match self.best_goal_id {
            Some(goal_id) => Ok(Path::new(
                self.tree.as_ref().unwrap().path_to_root(goal_id),
            )),
            None => Err(PlannerError::Timeout),
        }
    }

    fn name(&self) -> &'static str {
        "RRTStar"
    }
}
