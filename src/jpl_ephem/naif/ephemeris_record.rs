//! Chebyshev records of a type 2 SPK segment.
//!
//! Each record stores, as little-endian `f64` words:
//! 1. `mid`: record midpoint (ET seconds past J2000),
//! 2. `radius`: half-length of the record interval (seconds),
//! 3. `ncoeff` coefficients for X, then Y, then Z (km).
//!
//! With the normalized time `t = (et - mid) / radius` the position is
//! `Σ c_n T_n(t)` and the velocity `Σ c_n T'_n(t) / radius`.
use std::fmt;

use hifitime::{Duration, Epoch};
use nalgebra::Vector3;
use nom::{multi::count, number::complete::le_f64, IResult, Parser};

use crate::jpl_ephem::state_vector::StateVector;

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRecord {
    pub mid: f64,
    pub radius: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// `T_n(t)` and `T'_n(t)` for `n` in `0..n_coeff`.
fn chebyshev_basis(t: f64, n_coeff: usize) -> (Vec<f64>, Vec<f64>) {
    let mut poly = vec![0.0; n_coeff];
    let mut deriv = vec![0.0; n_coeff];
    if n_coeff == 0 {
        return (poly, deriv);
    }

    poly[0] = 1.0;
    if n_coeff > 1 {
        poly[1] = t;
        deriv[1] = 1.0;
    }
    for n in 2..n_coeff {
        poly[n] = 2.0 * t * poly[n - 1] - poly[n - 2];
        deriv[n] = 2.0 * poly[n - 1] + 2.0 * t * deriv[n - 1] - deriv[n - 2];
    }
    (poly, deriv)
}

fn dot(coefficients: &[f64], basis: &[f64]) -> f64 {
    coefficients.iter().zip(basis).map(|(c, b)| c * b).sum()
}

impl EphemerisRecord {
    /// Decode one record holding `ncoeff` coefficients per axis.
    pub fn parse(input: &[u8], ncoeff: usize) -> IResult<&[u8], Self> {
        let (input, mid) = le_f64(input)?;
        let (input, radius) = le_f64(input)?;
        let (input, (x, y, z)) = (
            count(le_f64, ncoeff),
            count(le_f64, ncoeff),
            count(le_f64, ncoeff),
        )
            .parse(input)?;

        Ok((input, EphemerisRecord { mid, radius, x, y, z }))
    }

    /// Evaluate position (km) and velocity (km/s) at `et_seconds`.
    ///
    /// The normalized time is clamped to `[-1, 1]`, so epochs slightly outside the
    /// record interval are served by its edge value.
    pub fn interpolate(&self, et_seconds: f64) -> StateVector {
        let t = ((et_seconds - self.mid) / self.radius).clamp(-1.0, 1.0);
        let (poly, deriv) = chebyshev_basis(t, self.x.len());

        let position = Vector3::new(
            dot(&self.x, &poly),
            dot(&self.y, &poly),
            dot(&self.z, &poly),
        );
        let velocity = Vector3::new(
            dot(&self.x, &deriv),
            dot(&self.y, &deriv),
            dot(&self.z, &deriv),
        ) / self.radius;

        StateVector::new(position, velocity)
    }
}

impl fmt::Display for EphemerisRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL: usize = 16;
        const VALUE: usize = 55;
        let border = format!("+{:-<l$}+{:-<v$}+", "", "", l = LABEL + 2, v = VALUE + 2);

        writeln!(f, "{border}")?;
        writeln!(f, "| {:<LABEL$} | {:<VALUE$} |", "Midpoint", Epoch::from_et_seconds(self.mid).to_string())?;
        writeln!(f, "| {:<LABEL$} | {:<VALUE$} |", "Radius", Duration::from_seconds(self.radius).to_string())?;
        writeln!(f, "{border}")?;

        for (axis, coeffs) in [("X", &self.x), ("Y", &self.y), ("Z", &self.z)] {
            for (i, chunk) in coeffs.chunks(4).enumerate() {
                let line = chunk
                    .iter()
                    .map(|c| format!("{c:>12.4e}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let label = if i == 0 { axis } else { "" };
                writeln!(f, "| {label:<LABEL$} | {line:<VALUE$} |")?;
            }
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod test_ephemeris_record {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// x(t) = 3 + 2 t + 0.5 (2t² - 1), y(t) = -1 + 4 (4t³ - 3t), z(t) = 7
    fn analytic_record() -> EphemerisRecord {
        EphemerisRecord {
            mid: 1000.0,
            radius: 100.0,
            x: vec![3.0, 2.0, 0.5, 0.0],
            y: vec![-1.0, 0.0, 0.0, 4.0],
            z: vec![7.0, 0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_parse_record() {
        let expected = analytic_record();
        let mut bytes = Vec::new();
        for w in [expected.mid, expected.radius]
            .iter()
            .chain(&expected.x)
            .chain(&expected.y)
            .chain(&expected.z)
        {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        let (rest, record) = EphemerisRecord::parse(&bytes, 4).unwrap();
        assert!(rest.is_empty());
        assert_eq!(record, expected);

        assert!(EphemerisRecord::parse(&bytes[..40], 4).is_err());
    }

    #[test]
    fn test_interpolation_matches_polynomials() {
        let record = analytic_record();

        for et in [900.0, 950.0, 1000.0, 1037.5, 1100.0] {
            let t: f64 = (et - 1000.0) / 100.0;
            let state = record.interpolate(et);

            assert_abs_diff_eq!(state.position.x, 3.0 + 2.0 * t + 0.5 * (2.0 * t * t - 1.0), epsilon = 1e-12);
            assert_abs_diff_eq!(state.position.y, -1.0 + 4.0 * (4.0 * t.powi(3) - 3.0 * t), epsilon = 1e-12);
            assert_abs_diff_eq!(state.position.z, 7.0, epsilon = 1e-12);

            assert_abs_diff_eq!(state.velocity.x, (2.0 + 2.0 * t) / 100.0, epsilon = 1e-12);
            assert_abs_diff_eq!(state.velocity.y, 4.0 * (12.0 * t * t - 3.0) / 100.0, epsilon = 1e-12);
            assert_abs_diff_eq!(state.velocity.z, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_velocity_is_position_derivative() {
        let record = analytic_record();
        let h = 1e-3;
        let et = 1023.0;
        let numeric = (record.interpolate(et + h).position - record.interpolate(et - h).position) / (2.0 * h);
        assert_abs_diff_eq!(numeric, record.interpolate(et).velocity, epsilon = 1e-8);
    }

    #[test]
    fn test_interpolation_clamps_outside_record() {
        let record = analytic_record();
        assert_eq!(record.interpolate(2000.0).position, record.interpolate(1100.0).position);
    }
}
