use std::any::Any;
use std::fmt::Debug;

use crate::base::state::State;
use crate::randomness::Rng;

/// Capability set shared by every concrete state-space variant. Planners are written once
/// against `Arc<dyn StateSpace>` and never need to know which variant they're holding.
pub trait StateSpace: Debug + Send + Sync + Any {
    /// Supports picking a specialized nearest-neighbor index (e.g. a KD-tree for real-vector
    /// spaces) without the index needing its own matching enum of space kinds.
    fn as_any(&self) -> &dyn Any;

    /// Non-negative, symmetric distance; zero iff `a` and `b` are equal up to the space's
    /// equivalence relation (e.g. antipodal quaternions on SO(3)).
    fn distance(&self, a: &State, b: &State) -> f64;

    /// Continuous parameterization of the path from `a` to `b`, geodesic where the manifold
    /// calls for it. `interpolate(a, b, 0) == a`, `interpolate(a, b, 1) == b`.
    fn interpolate(&self, a: &State, b: &State, t: f64) -> State;

    /// Draw a state uniformly over the space's natural measure.
    fn sample_uniform(&self, rng: &mut Rng) -> State;

    /// Clamp or wrap a state back onto the legal manifold.
    fn enforce_bounds(&self, state: &mut State);

    /// Whether a state already lies on the manifold (in-bounds real-vector components, a unit
    /// quaternion, ...). Used to validate the start state and goal samples.
    fn satisfies_bounds(&self, state: &State) -> bool;

    /// Metric-based equality, used to recognize "we reached exactly this state" (RRT-Connect)
    /// and to check a path starts at the problem's start state.
    fn equal_states(&self, a: &State, b: &State, eps: f64) -> bool {
        self.distance(a, b) < eps
    }

    /// A characteristic length of the space, used only to pick sensible planner defaults; not
    /// part of any planning invariant.
    fn maximum_extent(&self) -> f64;
}

#[cfg(test)]
pub(crate) mod algebra_laws {
    //! Shared property checks run against every concrete `StateSpace` impl's own test module,
    //! rather than duplicated per variant.
    use super::*;

    pub(crate) fn assert_distance_is_a_pseudometric(space: &dyn StateSpace, a: &State, b: &State) {
        assert!(space.distance(a, a) < 1e-9, "distance(a, a) should be ~0");
        assert!(
            (space.distance(a, b) - space.distance(b, a)).abs() < 1e-9,
            "distance must be symmetric"
        );
    }

    pub(crate) fn assert_interpolate_endpoints(space: &dyn StateSpace, a: &State, b: &State) {
        let at_zero = space.interpolate(a, b, 0.0);
        let at_one = space.interpolate(a, b, 1.0);
        assert!(space.equal_states(&at_zero, a, 1e-6));
        assert!(space.equal_states(&at_one, b, 1e-6));
    }
}
