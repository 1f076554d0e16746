use nalgebra::{DVector, UnitQuaternion};

/// One configuration. A closed set of three variants — this crate has no compound or
/// hierarchical state spaces, so a tagged union is the simplest faithful representation, rather
/// than a trait object with runtime downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    RealVector(DVector<f64>),
    /// Canonical representative in `(-pi, pi]`.
    SO2(f64),
    SO3(UnitQuaternion<f64>),
}

/// Wrap an angle into the canonical `(-pi, pi]` range.
pub fn wrap_angle(theta: f64) -> f64 {
    use std::f64::consts::PI;
    let mut wrapped = (theta + PI) % (2.0 * PI);
    if wrapped <= 0.0 {
        wrapped += 2.0 * PI;
    }
    wrapped - PI
}

impl State {
    pub fn real_vector(values: impl Into<Vec<f64>>) -> Self {
        State::RealVector(DVector::from_vec(values.into()))
    }

    pub fn so2(angle: f64) -> Self {
        State::SO2(wrap_angle(angle))
    }

    pub fn so3(x: f64, y: f64, z: f64, w: f64) -> Self {
        State::SO3(UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
            w, x, y, z,
        )))
    }

    pub fn so3_identity() -> Self {
        State::SO3(UnitQuaternion::identity())
    }

    pub fn as_real_vector(&self) -> &DVector<f64> {
        match self {
            State::RealVector(v) => v,
            other => panic!("expected a RealVector state, found {other:?}"),
        }
    }

    pub fn as_so2(&self) -> f64 {
        match self {
            State::SO2(theta) => *theta,
            other => panic!("expected an SO(2) state, found {other:?}"),
        }
    }

    pub fn as_so3(&self) -> &UnitQuaternion<f64> {
        match self {
            State::SO3(q) => q,
            other => panic!("expected an SO(3) state, found {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_canonical_range() {
        assert!((wrap_angle(0.0) - 0.0).abs() < 1e-12);
        assert!((wrap_angle(std::f64::consts::PI) - std::f64::consts::PI).abs() < 1e-12);
        let wrapped = wrap_angle(3.0 * std::f64::consts::PI);
        assert!(wrapped > -std::f64::consts::PI && wrapped <= std::f64::consts::PI);
    }

    #[test]
    fn so3_identity_is_unit_norm() {
        let State::SO3(q) = State::so3_identity() else {
            panic!("expected SO3")
        };
        assert!((q.norm() - 1.0).abs() < 1e-9);
    }
}
