use std::sync::Arc;

use crate::base::state::State;
use crate::base::statespace::StateSpace;
use crate::datastructure::{build_index, NearestNeighbours};

pub struct TreeNode {
    pub state: State,
    pub parent: Option<usize>,
    /// Accumulated cost from the root. Only `RrtStar` maintains this meaningfully; `Rrt` and
    /// `RrtConnect` leave it at the per-edge distance and never read it back.
    pub cost: f64,
}

/// A rooted tree of states plus the nearest-neighbor index over it, shared by every tree-based
/// planner (`Rrt`, `RrtConnect`, `RrtStar`) so the extend/rewire logic only has to be written
/// once.
pub struct Tree {
    nodes: Vec<TreeNode>,
    index: Box<dyn NearestNeighbours>,
}

impl Tree {
    pub fn with_root(state_space: &Arc<dyn StateSpace>, root: State) -> Self {
        let mut index = build_index(state_space);
        index.add(root.clone(), 0);
        Self {
            nodes: vec![TreeNode {
                state: root,
                parent: None,
                cost: 0.0,
            }],
            index,
        }
    }

    pub fn add_node(&mut self, state: State, parent: usize, cost: f64) -> usize {
        let id = self.nodes.len();
        self.index.add(state.clone(), id);
        self.nodes.push(TreeNode {
            state,
            parent: Some(parent),
            cost,
        });
        id
    }

    pub fn node(&self, id: usize) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: usize) -> &mut TreeNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nearest(&self, state: &State) -> usize {
        self.index
            .nearest(state)
            .expect("tree always has at least a root node")
    }

    pub fn within_radius(&self, state: &State, radius: f64) -> Vec<usize> {
        self.index.within_radius(state, radius)
    }

    /// Rewire `id` onto `new_parent` at `new_cost`, then walk its subtree depth-first updating
    /// every descendant's accumulated cost by the resulting delta. Children are found by linear
    /// scan rather than maintained incrementally, trading rewire-time cost for a tree structure
    /// simple enough that `add_node`/`path_to_root` never have to touch a child list.
    pub fn reparent(&mut self, id: usize, new_parent: usize, new_cost: f64) {
        let delta = new_cost - self.nodes[id].cost;
        self.nodes[id].parent = Some(new_parent);
        self.nodes[id].cost = new_cost;
        if delta != 0.0 {
            self.propagate_cost_delta(id, delta);
        }
    }

    fn propagate_cost_delta(&mut self, root_id: usize, delta: f64) {
        let mut stack = vec![root_id];
        while let Some(current) = stack.pop() {
            for i in 0..self.nodes.len() {
                if self.nodes[i].parent == Some(current) {
                    self.nodes[i].cost += delta;
                    stack.push(i);
                }
            }
        }
    }

    /// States from the root down to `node_id`, inclusive, in root-to-leaf order.
    pub fn path_to_root(&self, node_id: usize) -> Vec<State> {
        let mut states = Vec::new();
        let mut current = Some(node_id);
        while let Some(id) = current {
            states.push(self.nodes[id].state.clone());
            current = self.nodes[id].parent;
        }
        states.reverse();
        states
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
    fn path_to_root_walks_parent_chain() {
        let space = space();
        let mut tree = Tree::with_root(&space, State::real_vector([0.0]));
        let a = tree.add_node(State::real_vector([1.0]), 0, 1.0);
        let b = tree.add_node(State::real_vector([2.0]), a, 2.0);
        let path = tree.path_to_root(b);
        assert_eq!(
            path,
            vec![
                State::real_vector([0.0]),
                State::real_vector([1.0]),
                State::real_vector([2.0]),
            ]
        );
    }
}
