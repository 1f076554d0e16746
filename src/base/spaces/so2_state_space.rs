use crate::base::state::{wrap_angle, State};
use crate::base::statespace::StateSpace;
use crate::randomness::Rng;

/// The circle: angles in `(-pi, pi]`, distance along the shorter arc.
#[derive(Debug, Clone, Copy, Default)]
pub struct SO2StateSpace;

impl SO2StateSpace {
    pub fn new() -> Self {
        Self
    }
}

impl StateSpace for SO2StateSpace {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn distance(&self, a: &State, b: &State) -> f64 {
        wrap_angle(b.as_so2() - a.as_so2()).abs()
    }

    fn interpolate(&self, a: &State, b: &State, t: f64) -> State {
        let a = a.as_so2();
        let b = b.as_so2();
        let diff = wrap_angle(b - a);
        State::so2(a + diff * t)
    }

    fn sample_uniform(&self, rng: &mut Rng) -> State {
        State::so2(rng.uniform_real(-std::f64::consts::PI, std::f64::consts::PI))
    }

    fn enforce_bounds(&self, state: &mut State) {
        if let State::SO2(theta) = state {
            *theta = wrap_angle(*theta);
        }
    }

    fn satisfies_bounds(&self, state: &State) -> bool {
        let theta = state.as_so2();
        theta > -std::f64::consts::PI && theta <= std::f64::consts::PI
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
        let space = SO2StateSpace::new();
        let a = State::so2(0.1);
        let b = State::so2(3.0);
        assert_distance_is_a_pseudometric(&space, &a, &b);
        assert_interpolate_endpoints(&space, &a, &b);
    }

    #[test]
    fn distance_takes_the_short_way_around() {
        let space = SO2StateSpace::new();
        let a = State::so2(std::f64::consts::PI - 0.1);
        let b = State::so2(-std::f64::consts::PI + 0.1);
        assert!(space.distance(&a, &b) < 0.3);
    }

    #[test]
    fn sample_uniform_is_in_canonical_range() {
        let space = SO2StateSpace::new();
        let mut rng = Rng::with_seed(11);
        for _ in 0..64 {
            let sample = space.sample_uniform(&mut rng);
            assert!(space.satisfies_bounds(&sample));
        }
    }
}
