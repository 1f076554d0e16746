use crate::base::state::State;
use crate::datastructure::nearest_neighbours::NearestNeighbours;

struct Node {
    point: Vec<f64>,
    id: usize,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

/// Incremental axis-aligned KD-tree, specialized to `RealVector` states. Splits alternate over
/// dimensions in round-robin order by tree depth; rebalancing is not attempted, which is the
/// standard tradeoff for planner-sized point sets that are built once and queried many times per
/// insertion.
pub struct RealVectorKdTree {
    dimension: usize,
    root: Option<Box<Node>>,
    size: usize,
}

impl RealVectorKdTree {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            root: None,
            size: 0,
        }
    }

    fn point_of(state: &State) -> Vec<f64> {
        state.as_real_vector().iter().copied().collect()
    }

    fn insert(node: &mut Option<Box<Node>>, point: Vec<f64>, id: usize, depth: usize, dim: usize) {
        match node {
            None => {
                *node = Some(Box::new(Node {
                    point,
                    id,
                    left: None,
                    right: None,
                }));
            }
            Some(n) => {
                let axis = depth % dim;
                if point[axis] < n.point[axis] {
                    Self::insert(&mut n.left, point, id, depth + 1, dim);
                } else {
                    Self::insert(&mut n.right, point, id, depth + 1, dim);
                }
            }
        }
    }

    fn collect_within_bound(
        node: &Option<Box<Node>>,
        target: &[f64],
        depth: usize,
        dim: usize,
        best: &mut Vec<(f64, usize)>,
        k: Option<usize>,
        radius: Option<f64>,
    ) {
        let Some(n) = node else { return };

        let dist = squared_distance(target, &n.point).sqrt();
        if radius.map_or(true, |r| dist <= r) {
            best.push((dist, n.id));
        }

        let axis = depth % dim;
        let diff = target[axis] - n.point[axis];
        let (near, far) = if diff < 0.0 {
            (&n.left, &n.right)
        } else {
            (&n.right, &n.left)
        };

        Self::collect_within_bound(near, target, depth + 1, dim, best, k, radius);

        let should_search_far = match (k, radius) {
            (Some(k), _) => best.len() < k || diff.abs() <= worst_distance(best, k),
            (None, Some(r)) => diff.abs() <= r,
            (None, None) => true,
        };
        if should_search_far {
            Self::collect_within_bound(far, target, depth + 1, dim, best, k, radius);
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn worst_distance(best: &[(f64, usize)], k: usize) -> f64 {
    if best.len() < k {
        f64::INFINITY
    } else {
        best.iter().map(|(d, _)| *d).fold(0.0, f64::max)
    }
}

impl NearestNeighbours for RealVectorKdTree {
    fn add(&mut self, state: State, id: usize) {
        let point = Self::point_of(&state);
        Self::insert(&mut self.root, point, id, 0, self.dimension);
        self.size += 1;
    }

    fn nearest(&self, state: &State) -> Option<usize> {
        self.nearest_k(state, 1).into_iter().next()
    }

    fn nearest_k(&self, state: &State, k: usize) -> Vec<usize> {
        let target = Self::point_of(state);
        let mut found = Vec::new();
        Self::collect_within_bound(
            &self.root,
            &target,
            0,
            self.dimension,
            &mut found,
            Some(k),
            None,
        );
        found.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        found.truncate(k);
        found.into_iter().map(|(_, id)| id).collect()
    }

    fn within_radius(&self, state: &State, radius: f64) -> Vec<usize> {
        let target = Self::point_of(state);
        let mut found = Vec::new();
        Self::collect_within_bound(
            &self.root,
            &target,
            0,
            self.dimension,
            &mut found,
            None,
            Some(radius),
        );
        found.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        found.into_iter().map(|(_, id)| id).collect()
    }

    fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_matches_linear_scan() {
        let mut tree = RealVectorKdTree::new(2);
        let points = [
            [0.0, 0.0],
            [5.0, 5.0],
            [1.0, 1.0],
            [-3.0, 2.0],
            [8.0, -1.0],
        ];
        for (id, p) in points.iter().enumerate() {
            tree.add(State::real_vector(*p), id);
        }
        let query = State::real_vector([1.2, 0.9]);
        assert_eq!(tree.nearest(&query), Some(2));
    }

    #[test]
    fn nearest_k_returns_k_closest_in_order() {
        let mut tree = RealVectorKdTree::new(2);
        for (id, p) in [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]
            .iter()
            .enumerate()
        {
            tree.add(State::real_vector(*p), id);
        }
        let result = tree.nearest_k(&State::real_vector([0.1, 0.0]), 2);
        assert_eq!(result, vec![0, 1]);
    }

    #[test]
    fn within_radius_matches_brute_force() {
        let mut tree = RealVectorKdTree::new(2);
        for (id, p) in [[0.0, 0.0], [1.0, 0.0], [5.0, 5.0]].iter().enumerate() {
            tree.add(State::real_vector(*p), id);
        }
        let mut found = tree.within_radius(&State::real_vector([0.0, 0.0]), 1.5);
        found.sort();
        assert_eq!(found, vec![0, 1]);
    }
}
