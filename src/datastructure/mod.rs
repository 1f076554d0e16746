pub mod kd_tree;
pub mod nearest_neighbours;

use std::sync::Arc;

pub use kd_tree::RealVectorKdTree;
pub use nearest_neighbours::{LinearNearestNeighbours, NearestNeighbours};

use crate::base::spaces::RealVectorStateSpace;
use crate::base::statespace::StateSpace;
use crate::tools::config::magic::KD_TREE_MAX_DIMENSION;

/// Pick the always-correct linear scan, except for a real-vector space whose dimension is low
/// enough that a KD-tree pays for itself.
pub fn build_index(state_space: &Arc<dyn StateSpace>) -> Box<dyn NearestNeighbours> {
    if let Some(real_vector) = state_space.as_any().downcast_ref::<RealVectorStateSpace>() {
        if real_vector.dimension() <= KD_TREE_MAX_DIMENSION {
            return Box::new(RealVectorKdTree::new(real_vector.dimension()));
        }
    }
    Box::new(LinearNearestNeighbours::new(state_space.clone()))
}
