use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::base::goal_region::sample_goal_with_retry;
use crate::base::motion_validator::discrete_motion_validator::DiscreteMotionValidator;
use crate::base::motion_validator::MotionValidator;
use crate::base::path::Path;
use crate::base::planner::Planner;
use crate::base::problem_definition::ProblemDefinition;
use crate::base::state::State;
use crate::base::state_validity_checker::ValidityChecker;
use crate::base::statespace::StateSpace;
use crate::error::PlannerError;
use crate::geometric::tree::Tree;
use crate::randomness::{Rng, DEFAULT_RNG_SEED};
use crate::tools::config::magic;

enum Extend {
    Trapped,
    Advanced(usize),
    Reached(usize),
}

/// Grows a tree from both the start and a single goal sample, alternating which tree takes the
/// random sample and which tries to `connect` all the way to the other's newest node. A single
/// goal sample is taken once at `setup`, rather than re-sampled per iteration: the goal tree is
/// just another RRT tree and benefits from the same `connect` greediness as the start tree.
pub struct RrtConnect {
    problem: Arc<ProblemDefinition>,
    max_distance: f64,
    rng: Rng,
    checker: Option<Arc<dyn ValidityChecker>>,
    motion_validator: Option<DiscreteMotionValidator>,
    start_tree: Option<Tree>,
    goal_tree: Option<Tree>,
}

impl RrtConnect {
    pub fn new(problem: Arc<ProblemDefinition>) -> Self {
        let max_distance = problem.state_space().maximum_extent() * 0.1;
        Self {
            problem,
            max_distance,
            rng: Rng::with_seed(DEFAULT_RNG_SEED),
            checker: None,
            motion_validator: None,
            start_tree: None,
            goal_tree: None,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }
}

fn extend(
    tree: &mut Tree,
    target: &State,
    space: &Arc<dyn StateSpace>,
    checker: &Arc<dyn ValidityChecker>,
    motion_validator: &DiscreteMotionValidator,
    max_distance: f64,
) -> Result<Extend, PlannerError> {
    let nearest_id = tree.nearest(target);
    let nearest_state = tree.node(nearest_id).state.clone();

    let distance = space.distance(&nearest_state, target);
    let mut new_state = if distance <= max_distance {
        target.clone()
    } else {
        space.interpolate(&nearest_state, target, max_distance / distance)
    };
    space.enforce_bounds(&mut new_state);

    if !checker.is_valid(&new_state)? {
        return Ok(Extend::Trapped);
    }
    if !motion_validator.check_motion(&nearest_state, &new_state)? {
        return Ok(Extend::Trapped);
    }

    let cost = space.distance(&nearest_state, &new_state);
    let new_id = tree.add_node(new_state.clone(), nearest_id, cost);

    if space.equal_states(&new_state, target, 1e-9) {
        Ok(Extend::Reached(new_id))
    } else {
        Ok(Extend::Advanced(new_id))
    }
}

fn connect(
    tree: &mut Tree,
    target: &State,
    space: &Arc<dyn StateSpace>,
    checker: &Arc<dyn ValidityChecker>,
    motion_validator: &DiscreteMotionValidator,
    max_distance: f64,
) -> Result<Extend, PlannerError> {
    loop {
        match extend(tree, target, space, checker, motion_validator, max_distance)? {
            Extend::Advanced(_) => continue,
            other => return Ok(other),
        }
    }
}

impl Planner for RrtConnect {
    fn setup(&mut self, checker: Arc<dyn ValidityChecker>) {
        let space = self.problem.state_space();
        let resolution = magic::motion_validator_resolution(self.max_distance);
        self.motion_validator = Some(DiscreteMotionValidator::new(
            space.clone(),
            checker.clone(),
            resolution,
        ));
        self.checker = Some(checker);
        self.start_tree = Some(Tree::with_root(&space, self.problem.start().clone()));

        let mut goal_guard = self.problem.goal().lock().unwrap();
        let goal_sample = sample_goal_with_retry(&mut *goal_guard, &mut self.rng)
            .ok()
            .flatten()
            .unwrap_or_else(|| self.problem.start().clone());
        drop(goal_guard);
        self.goal_tree = Some(Tree::with_root(&space, goal_sample));

        info!(max_distance = self.max_distance, "rrt-connect setup complete");
    }

    fn solve(&mut self, timeout: Duration) -> Result<Path, PlannerError> {
        let checker = self.checker.clone().ok_or(PlannerError::NotConfigured)?;
        let motion_validator = self
            .motion_validator
            .as_ref()
            .ok_or(PlannerError::NotConfigured)?;

        if !checker.is_valid(self.problem.start())? {
            return Err(PlannerError::InvalidStart);
        }

        let space = self.problem.state_space();
        let deadline = Instant::now() + timeout;
        let mut swapped = false;

        while Instant::now() < deadline {
            let sample = space.sample_uniform(&mut self.rng);

            let grown = {
                let active = if !swapped {
                    self.start_tree.as_mut().unwrap()
                } else {
                    self.goal_tree.as_mut().unwrap()
                };
                extend(
                    active,
                    &sample,
                    &space,
                    &checker,
                    motion_validator,
                    self.max_distance,
                )?
            };

            if let Extend::Advanced(new_id) | Extend::Reached(new_id) = grown {
                let (new_state, active_path) = {
                    let active = if !swapped {
                        self.start_tree.as_ref().unwrap()
                    } else {
                        self.goal_tree.as_ref().unwrap()
                    };
                    (active.node(new_id).state.clone(), active.path_to_root(new_id))
                };

                let other = if !swapped {
                    self.goal_tree.as_mut().unwrap()
                } else {
                    self.start_tree.as_mut().unwrap()
                };
                let connect_result = connect(
                    other,
                    &new_state,
                    &space,
                    &checker,
                    motion_validator,
                    self.max_distance,
                )?;

                if let Extend::Reached(other_id) = connect_result {
                    // `active_path` runs root-of-active..new_state; `other_path` runs
                    // root-of-other..new_state. Whichever tree is rooted at the problem's
                    // start state goes first, in order; the other is reversed and appended,
                    // dropping its first element (`new_state`, already the last of the first
                    // half) to avoid duplicating the junction state.
                    let other_path = other.path_to_root(other_id);
                    let (start_side, goal_side) = if !swapped {
                        (active_path, other_path)
                    } else {
                        (other_path, active_path)
                    };
                    let mut full_path = start_side;
                    full_path.extend(goal_side.into_iter().rev().skip(1));

                    debug!(
                        start_tree_size = self.start_tree.as_ref().unwrap().len(),
                        goal_tree_size = self.goal_tree.as_ref().unwrap().len(),
                        "rrt-connect found a solution"
                    );
                    return Ok(Path::new(full_path));
                }
            }

            swapped = !swapped;
        }

        Err(PlannerError::Timeout)
    }

    fn name(&self) -> &'static str {
        "RRTConnect"
    }
}
