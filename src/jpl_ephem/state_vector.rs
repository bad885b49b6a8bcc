use nalgebra::Vector3;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Position (km) and velocity (km/s) of a body relative to some center, in the
/// J2000 equatorial frame of the ephemeris.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    pub fn zeros() -> Self {
        StateVector::new(Vector3::zeros(), Vector3::zeros())
    }
}

impl Add for StateVector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        StateVector {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl AddAssign for StateVector {
    fn add_assign(&mut self, other: Self) {
        self.position += other.position;
        self.velocity += other.velocity;
    }
}

impl Sub for StateVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        StateVector {
            position: self.position - other.position,
            velocity: self.velocity - other.velocity,
        }
    }
}

impl Neg for StateVector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        StateVector {
            position: -self.position,
            velocity: -self.velocity,
        }
    }
}

#[cfg(test)]
mod test_state_vector {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn assert_state_eq(left: StateVector, right: StateVector) {
        assert_abs_diff_eq!(left.position, right.position, epsilon = 1e-12);
        assert_abs_diff_eq!(left.velocity, right.velocity, epsilon = 1e-12);
    }

    #[test]
    fn test_state_arithmetic() {
        let a = StateVector::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.1, 0.2, 0.3));
        let b = StateVector::new(Vector3::new(-1.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 1.0));

        let mut acc = StateVector::zeros();
        acc += a;
        acc += b;
        assert_state_eq(acc, a + b);
        assert_state_eq(acc - b, a);
        assert_state_eq(-a + a, StateVector::zeros());

        // 0.3 + 1.0 - 1.0 is not 0.3 in binary.
        let round_trip = (a + b) - b;
        assert_ne!(round_trip.velocity.z, 0.3);
        assert_state_eq(round_trip, a);
    }
}
