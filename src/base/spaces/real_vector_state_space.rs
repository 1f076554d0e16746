use nalgebra::DVector;

use crate::base::spaces::real_vector_bounds::RealVectorBounds;
use crate::base::state::State;
use crate::base::statespace::StateSpace;
use crate::randomness::Rng;

/// Euclidean `R^n` with axis-aligned box bounds.
#[derive(Debug, Clone)]
pub struct RealVectorStateSpace {
    bounds: RealVectorBounds,
}

impl RealVectorStateSpace {
    pub fn new(bounds: RealVectorBounds) -> anyhow::Result<Self> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    pub fn dimension(&self) -> usize {
        self.bounds.dimension()
    }

    pub fn bounds(&self) -> &RealVectorBounds {
        &self.bounds
    }
}

impl StateSpace for RealVectorStateSpace {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn distance(&self, a: &State, b: &State) -> f64 {
        (a.as_real_vector() - b.as_real_vector()).norm()
    }

    fn interpolate(&self, a: &State, b: &State, t: f64) -> State {
        let a = a.as_real_vector();
        let b = b.as_real_vector();
        State::RealVector(a + (b - a) * t)
    }

    fn sample_uniform(&self, rng: &mut Rng) -> State {
        let values: Vec<f64> = self
            .bounds
            .low()
            .iter()
            .zip(self.bounds.high())
            .map(|(&low, &high)| rng.uniform_real(low, high))
            .collect();
        State::RealVector(DVector::from_vec(values))
    }

    fn enforce_bounds(&self, state: &mut State) {
        if let State::RealVector(v) = state {
            for (x, (&low, &high)) in v
                .iter_mut()
                .zip(self.bounds.low().iter().zip(self.bounds.high()))
            {
                *x = x.clamp(low, high);
            }
        }
    }

    fn satisfies_bounds(&self, state: &State) -> bool {
        let v = state.as_real_vector();
        if v.len() != self.bounds.dimension() {
            return false;
        }
        v.iter()
            .zip(self.bounds.low().iter().zip(self.bounds.high()))
            .all(|(&x, (&low, &high))| x >= low && x <= high)
    }

    fn maximum_extent(&self) -> f64 {
        self.bounds
            .low()
            .iter()
            .zip(self.bounds.high())
            .map(|(l, h)| (h - l).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::statespace::algebra_laws::{
        assert_distance_is_a_pseudometric, assert_interpolate_endpoints,
    };

    fn unit_square() -> RealVectorStateSpace {
        let mut bounds = RealVectorBounds::new(2);
        bounds.set_low(0.0);
        bounds.set_high(1.0);
        RealVectorStateSpace::new(bounds).unwrap()
    }

    #[test]
    fn rejects_malformed_bounds() {
        let mut bounds = RealVectorBounds::new(2);
        bounds.set_low_at(0, 1.0);
        bounds.set_high_at(0, 0.0);
        assert!(RealVectorStateSpace::new(bounds).is_err());
    }

    #[test]
    fn satisfies_algebra_laws() {
        let space = unit_square();
        let a = State::real_vector([0.1, 0.2]);
        let b = State::real_vector([0.9, 0.3]);
        assert_distance_is_a_pseudometric(&space, &a, &b);
        assert_interpolate_endpoints(&space, &a, &b);
    }

    #[test]
    fn enforce_bounds_clamps() {
        let space = unit_square();
        let mut state = State::real_vector([-1.0, 2.0]);
        space.enforce_bounds(&mut state);
        assert_eq!(state, State::real_vector([0.0, 1.0]));
    }

    #[test]
    fn sample_uniform_is_in_bounds() {
        let space = unit_square();
        let mut rng = Rng::with_seed(3);
        for _ in 0..64 {
            let sample = space.sample_uniform(&mut rng);
            assert!(space.satisfies_bounds(&sample));
        }
    }
}
