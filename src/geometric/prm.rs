use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::base::motion_validator::discrete_motion_validator::DiscreteMotionValidator;
use crate::base::motion_validator::MotionValidator;
use crate::base::path::Path;
use crate::base::planner::Planner;
use crate::base::problem_definition::ProblemDefinition;
use crate::base::state_validity_checker::ValidityChecker;
use crate::error::PlannerError;
use crate::geometric::roadmap::Roadmap;
use crate::randomness::{Rng, DEFAULT_RNG_SEED};
use crate::tools::config::magic;

/// Probabilistic Roadmap: build a graph of validated samples connected by validated local
/// motions once, then answer shortest-path queries against it. The roadmap persists across
/// `solve` calls so repeated queries in the same space amortize construction cost.
pub struct Prm {
    problem: Arc<ProblemDefinition>,
    timeout: Duration,
    connection_radius: f64,
    goal_samples: usize,
    max_roadmap_samples: usize,
    rng: Rng,
    checker: Option<Arc<dyn ValidityChecker>>,
    motion_validator: Option<DiscreteMotionValidator>,
    roadmap: Option<Roadmap>,
}

impl Prm {
    pub fn new(problem: Arc<ProblemDefinition>, timeout: Duration, connection_radius: f64) -> Self {
        Self {
            problem,
            timeout,
            connection_radius,
            goal_samples: magic::PRM_DEFAULT_GOAL_SAMPLES,
            max_roadmap_samples: magic::PRM_DEFAULT_ROADMAP_SAMPLES,
            rng: Rng::with_seed(DEFAULT_RNG_SEED),
            checker: None,
            motion_validator: None,
            roadmap: None,
        }
    }

    pub fn with_goal_samples(mut self, goal_samples: usize) -> Self {
        self.goal_samples = goal_samples;
        self
    }

    /// Override `M`, the cap on how many vertices a single `construct_roadmap` pass will add
    /// (construction also stops early once the constructor's `timeout` elapses).
    pub fn with_max_roadmap_samples(mut self, max_roadmap_samples: usize) -> Self {
        self.max_roadmap_samples = max_roadmap_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    pub fn roadmap_size(&self) -> usize {
        self.roadmap.as_ref().map_or(0, Roadmap::len)
    }

    /// Add validated random states to the roadmap, connecting each to every existing vertex
    /// within `connection_radius` that a valid motion reaches. Stops once `max_roadmap_samples`
    /// vertices have been added or the constructor's `timeout` elapses, whichever comes first.
    /// Safe to call more than once; later calls grow the same roadmap.
    pub fn construct_roadmap(&mut self) -> Result<(), PlannerError> {
        let checker = self.checker.clone().ok_or(PlannerError::NotConfigured)?;
        let motion_validator = self
            .motion_validator
            .as_ref()
            .ok_or(PlannerError::NotConfigured)?;
        let roadmap = self.roadmap.as_mut().ok_or(PlannerError::NotConfigured)?;
        let space = self.problem.state_space();
        let deadline = Instant::now() + self.timeout;

        let mut added = 0;
        while added < self.max_roadmap_samples && Instant::now() < deadline {
            let candidate = space.sample_uniform(&mut self.rng);
            if !checker.is_valid(&candidate)? {
                continue;
            }

            let neighbors = roadmap.neighbors_within(&candidate, self.connection_radius);
            let new_id = roadmap.add_vertex(candidate.clone());
            for neighbor_id in neighbors {
                let neighbor_state = roadmap.vertex(neighbor_id).clone();
                if motion_validator.check_motion(&candidate, &neighbor_state)? {
                    let weight = space.distance(&candidate, &neighbor_state);
                    roadmap.add_edge(new_id, neighbor_id, weight);
                }
            }
            added += 1;
        }

        debug!(
            roadmap_size = roadmap.len(),
            max_roadmap_samples = self.max_roadmap_samples,
            added,
            "prm roadmap construction pass complete"
        );
        Ok(())
    }
}

impl Planner for Prm {
    fn setup(&mut self, checker: Arc<dyn ValidityChecker>) {
        let space = self.problem.state_space();
        let resolution = magic::motion_validator_resolution(self.connection_radius);
        self.motion_validator = Some(DiscreteMotionValidator::new(
            space.clone(),
            checker.clone(),
            resolution,
        ));
        self.checker = Some(checker);
        if self.roadmap.is_none() {
            self.roadmap = Some(Roadmap::new(&space));
        }
        info!(connection_radius = self.connection_radius, "prm setup complete");
    }

    fn solve(&mut self, timeout: Duration) -> Result<Path, PlannerError> {
        let checker = self.checker.clone().ok_or(PlannerError::NotConfigured)?;

        if !checker.is_valid(self.problem.start())? {
            return Err(PlannerError::InvalidStart);
        }

        if self.roadmap_size() == 0 {
            self.construct_roadmap()?;
        }

        let motion_validator = self
            .motion_validator
            .as_ref()
            .ok_or(PlannerError::NotConfigured)?;
        let roadmap = self.roadmap.as_mut().ok_or(PlannerError::NotConfigured)?;
        let space = self.problem.state_space();
        let goal = self.problem.goal();
        let deadline = Instant::now() + timeout;

        let start_state = self.problem.start().clone();
        let start_neighbors = roadmap.neighbors_within(&start_state, self.connection_radius);
        let start_id = roadmap.add_vertex(start_state.clone());
        for neighbor_id in start_neighbors {
            let neighbor_state = roadmap.vertex(neighbor_id).clone();
            if motion_validator.check_motion(&start_state, &neighbor_state)? {
                let weight = space.distance(&start_state, &neighbor_state);
                roadmap.add_edge(start_id, neighbor_id, weight);
            }
        }

        let mut goal_ids = Vec::new();
        let mut attempts = 0;
        while goal_ids.len() < self.goal_samples && Instant::now() < deadline {
            attempts += 1;
            if attempts > magic::MAX_GOAL_SAMPLE_ATTEMPTS_TOTAL {
                break;
            }
            let candidate = {
                let mut goal_guard = goal.lock().unwrap();
                match crate::base::goal_region::sample_goal_with_retry(&mut *goal_guard, &mut self.rng)? {
                    Some(state) => state,
                    None => continue,
                }
            };
            if !checker.is_valid(&candidate)? {
                continue;
            }
            let neighbors = roadmap.neighbors_within(&candidate, self.connection_radius);
            let goal_id = roadmap.add_vertex(candidate.clone());
            for neighbor_id in neighbors {
                let neighbor_state = roadmap.vertex(neighbor_id).clone();
                if motion_validator.check_motion(&candidate, &neighbor_state)? {
                    let weight = space.distance(&candidate, &neighbor_state);
                    roadmap.add_edge(goal_id, neighbor_id, weight);
                }
            }
            goal_ids.push(goal_id);
        }

        if goal_ids.is_empty() {
            return Err(PlannerError::InvalidGoalSample);
        }

        let best = goal_ids
            .iter()
            .filter_map(|&goal_id| roadmap.shortest_path(start_id, goal_id))
            .min_by(|(_, cost_a), (_, cost_b)| cost_a.partial_cmp(cost_b).unwrap());

        match best {
            Some((vertex_path, cost)) => {
                debug!(cost, roadmap_size = roadmap.len(), "prm found a solution");
                let states = vertex_path
                    .into_iter()
                    .map(|id| roadmap.vertex(id).clone())
                    .collect();
                Ok(Path::new(states))
            }
            None => Err(PlannerError::NoSolution),
        }
    }

    fn name(&self) -> &'static str {
        "PRM"
    }
}
