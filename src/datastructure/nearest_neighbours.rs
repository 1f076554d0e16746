use std::sync::Arc;

use crate::base::state::State;
use crate::base::statespace::StateSpace;

/// Nearest-neighbor index over planner tree/roadmap vertices. Each entry is a `State` paired
/// with a caller-chosen `usize` id (the vertex's index in the planner's own node storage) so
/// the index itself never needs to know anything about tree/graph structure.
pub trait NearestNeighbours: Send + Sync {
    fn add(&mut self, state: State, id: usize);

    fn nearest(&self, state: &State) -> Option<usize>;

    fn nearest_k(&self, state: &State, k: usize) -> Vec<usize>;

    fn within_radius(&self, state: &State, radius: f64) -> Vec<usize>;

    fn clear(&mut self);

    fn size(&self) -> usize;
}

/// Always-correct fallback: scans every stored state on each query. The default (and only)
/// index for `SO2`/`SO3` spaces, and for `RealVector` spaces above the KD-tree's dimension
/// ceiling.
pub struct LinearNearestNeighbours {
    state_space: Arc<dyn StateSpace>,
    entries: Vec<(State, usize)>,
}

impl LinearNearestNeighbours {
    pub fn new(state_space: Arc<dyn StateSpace>) -> Self {
        Self {
            state_space,
            entries: Vec::new(),
        }
    }

    fn sorted_by_distance(&self, state: &State) -> Vec<(f64, usize)> {
        let mut distances: Vec<(f64, usize)> = self
            .entries
            .iter()
            .map(|(s, id)| (self.state_space.distance(state, s), *id))
            .collect();
        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        distances
    }
}

impl NearestNeighbours for LinearNearestNeighbours {
    fn add(&mut self, state: State, id: usize) {
        self.entries.push((state, id));
    }

    fn nearest(&self, state: &State) -> Option<usize> {
        self.sorted_by_distance(state).into_iter().next().map(|(_, id)| id)
    }

    fn nearest_k(&self, state: &State, k: usize) -> Vec<usize> {
        self.sorted_by_distance(state)
            .into_iter()
            .take(k)
            .map(|(_, id)| id)
            .collect()
    }

    fn within_radius(&self, state: &State, radius: f64) -> Vec<usize> {
        self.sorted_by_distance(state)
            .into_iter()
            .take_while(|(d, _)| *d <= radius)
            .map(|(_, id)| id)
            .collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn size(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::{RealVectorBounds, RealVectorStateSpace};

    fn space() -> Arc<dyn StateSpace> {
        let mut bounds = RealVectorBounds::new(1);
        bounds.set_low(-10.0);
        bounds.set_high(10.0);
        Arc::new(RealVectorStateSpace::new(bounds).unwrap())
    }

    #[test]
    fn nearest_returns_the_closest_id() {
        let mut nn = LinearNearestNeighbours::new(space());
        nn.add(State::real_vector([0.0]), 0);
        nn.add(State::real_vector([5.0]), 1);
        nn.add(State::real_vector([1.0]), 2);
        assert_eq!(nn.nearest(&State::real_vector([0.9])), Some(2));
    }

    #[test]
    fn within_radius_excludes_far_entries() {
        let mut nn = LinearNearestNeighbours::new(space());
        nn.add(State::real_vector([0.0]), 0);
        nn.add(State::real_vector([5.0]), 1);
        let found = nn.within_radius(&State::real_vector([0.0]), 1.0);
        assert_eq!(found, vec![0]);
    }
}
