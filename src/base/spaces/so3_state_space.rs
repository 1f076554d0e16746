use nalgebra::UnitQuaternion;

use crate::base::state::State;
use crate::base::statespace::StateSpace;
use crate::randomness::Rng;

/// Below this angle between quaternions, SLERP's `sin(theta)` denominator gets numerically
/// unreliable; fall back to linear blending of components, which is accurate in the limit.
const SLERP_LINEAR_FALLBACK_THRESHOLD: f64 = 1e-6;

/// The group of 3D rotations, represented by unit quaternions. `q` and `-q` represent the same
/// rotation, so distance and interpolation both account for the antipodal pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct SO3StateSpace;

impl SO3StateSpace {
    pub fn new() -> Self {
        Self
    }
}

impl StateSpace for SO3StateSpace {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn distance(&self, a: &State, b: &State) -> f64 {
        let a = a.as_so3();
        let b = b.as_so3();
        let dot = a.coords.dot(&b.coords).abs().min(1.0);
        2.0 * dot.acos()
    }

    fn interpolate(&self, a: &State, b: &State, t: f64) -> State {
        let a = a.as_so3();
        let b = b.as_so3();

        let mut dot = a.coords.dot(&b.coords);
        let b_coords = if dot < 0.0 {
            dot = -dot;
            -b.coords
        } else {
            b.coords
        };

        let theta = dot.min(1.0).acos();
        let blended = if theta.abs() < SLERP_LINEAR_FALLBACK_THRESHOLD {
            a.coords.lerp(&b_coords, t)
        } else {
            let sin_theta = theta.sin();
            let w_a = ((1.0 - t) * theta).sin() / sin_theta;
            let w_b = (t * theta).sin() / sin_theta;
            a.coords.scale(w_a) + b_coords.scale(w_b)
        };

        let q = nalgebra::Quaternion::new(blended.w, blended.x, blended.y, blended.z);
        State::SO3(UnitQuaternion::from_quaternion(q))
    }

    fn sample_uniform(&self, rng: &mut Rng) -> State {
        let (x, y, z, w) = rng.uniform_unit_quaternion();
        State::so3(x, y, z, w)
    }

    fn enforce_bounds(&self, state: &mut State) {
        if let State::SO3(q) = state {
            *q = UnitQuaternion::new_normalize(q.into_inner());
        }
    }

    fn satisfies_bounds(&self, state: &State) -> bool {
        let q = state.as_so3();
        (q.norm() - 1.0).abs() < 1e-6
    }

    fn maximum_extent(&self) -> f64 {
        std::f64::consts::PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::statespace::algebra_laws::{
        assert_distance_is_a_pseudometric, assert_interpolate_endpoints,
    };

    #[test]
    fn satisfies_algebra_laws() {
        let space = SO3StateSpace::new();
        let a = State::so3_identity();
        let b = State::so3(0.0, 0.0, 0.7071, 0.7071);
        assert_distance_is_a_pseudometric(&space, &a, &b);
        assert_interpolate_endpoints(&space, &a, &b);
    }

    #[test]
    fn antipodal_quaternions_are_the_same_rotation() {
        let space = SO3StateSpace::new();
        let a = State::so3_identity();
        let State::SO3(q) = State::so3_identity() else {
            unreachable!()
        };
        let negated = State::SO3(UnitQuaternion::new_unchecked(nalgebra::Quaternion::new(
            -q.w, -q.i, -q.j, -q.k,
        )));
        assert!(space.distance(&a, &negated) < 1e-9);
    }

    #[test]
    fn sample_uniform_is_unit_norm() {
        let space = SO3StateSpace::new();
        let mut rng = Rng::with_seed(5);
        for _ in 0..64 {
            let sample = space.sample_uniform(&mut rng);
            assert!(space.satisfies_bounds(&sample));
        }
    }
}
