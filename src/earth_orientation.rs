//! Earth orientation: obliquity, precession, nutation and sidereal rotation.
//!
//! All rotation matrices built here are **active** rotations acting on column
//! vectors, composed right to left. The chain used by the position pipeline is
//!
//! ```text
//! Earth-fixed --(GAST about z)--> true equator of date --(N^T)--> mean equator of date --(P^T)--> J2000
//! ```
//!
//! with `P` the IAU 1976 precession and `N` the IAU 1980 nutation. The nutation series
//! keeps the terms of the IAU 1980 theory above 0.001″, which is well below the
//! accuracy needed for minute-level event times.
use hifitime::Epoch;
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{ArcSec, Radian, DAYS_PER_JULIAN_CENTURY, DPI, MJD, OBLIQUITY_J2000_ARCSEC, RADEG, RADSEC, T2000},
    time::gmst,
};

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Active rotation of `alpha` radians about `axis`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, alpha).into()
}

fn julian_centuries(tjm: MJD) -> f64 {
    (tjm - T2000) / DAYS_PER_JULIAN_CENTURY
}

/// Mean obliquity of the ecliptic (IAU 1976), in radians.
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date in the TT scale.
pub fn obleq(tjm: MJD) -> Radian {
    let ob0 = OBLIQUITY_J2000_ARCSEC * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = julian_centuries(tjm);
    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// One periodic term of the IAU 1980 nutation series.
///
/// Multipliers of the Delaunay arguments `(D, M, M', F, Ω)` followed by the
/// longitude coefficients `(A, B)` and obliquity coefficients `(C, D)` in units of
/// 0.0001″: `Δψ += (A + B·T)·sin(arg)`, `Δε += (C + D·T)·cos(arg)`.
struct NutationTerm {
    args: [i8; 5],
    psi: (f64, f64),
    eps: (f64, f64),
}

const fn term(args: [i8; 5], psi: (f64, f64), eps: (f64, f64)) -> NutationTerm {
    NutationTerm { args, psi, eps }
}

#[rustfmt::skip]
const NUTATION_TERMS: [NutationTerm; 34] = [
    term([ 0,  0,  0,  0, 1], (-171996.0, -174.2), (92025.0,  8.9)),
    term([-2,  0,  0,  2, 2], ( -13187.0,   -1.6), ( 5736.0, -3.1)),
    term([ 0,  0,  0,  2, 2], (  -2274.0,   -0.2), (  977.0, -0.5)),
    term([ 0,  0,  0,  0, 2], (   2062.0,    0.2), ( -895.0,  0.5)),
    term([ 0,  1,  0,  0, 0], (   1426.0,   -3.4), (   54.0, -0.1)),
    term([ 0,  0,  1,  0, 0], (    712.0,    0.1), (   -7.0,  0.0)),
    term([-2,  1,  0,  2, 2], (   -517.0,    1.2), (  224.0, -0.6)),
    term([ 0,  0,  0,  2, 1], (   -386.0,   -0.4), (  200.0,  0.0)),
    term([ 0,  0,  1,  2, 2], (   -301.0,    0.0), (  129.0, -0.1)),
    term([-2, -1,  0,  2, 2], (    217.0,   -0.5), (  -95.0,  0.3)),
    term([-2,  0,  1,  0, 0], (   -158.0,    0.0), (    0.0,  0.0)),
    term([-2,  0,  0,  2, 1], (    129.0,    0.1), (  -70.0,  0.0)),
    term([ 0,  0, -1,  2, 2], (    123.0,    0.0), (  -53.0,  0.0)),
    term([ 2,  0,  0,  0, 0], (     63.0,    0.0), (    0.0,  0.0)),
    term([ 0,  0,  1,  0, 1], (     63.0,    0.1), (  -33.0,  0.0)),
    term([ 2,  0, -1,  2, 2], (    -59.0,    0.0), (   26.0,  0.0)),
    term([ 0,  0, -1,  0, 1], (    -58.0,   -0.1), (   32.0,  0.0)),
    term([ 0,  0,  1,  2, 1], (    -51.0,    0.0), (   27.0,  0.0)),
    term([-2,  0,  2,  0, 0], (     48.0,    0.0), (    0.0,  0.0)),
    term([ 0,  0, -2,  2, 1], (     46.0,    0.0), (  -24.0,  0.0)),
    term([ 2,  0,  0,  2, 2], (    -38.0,    0.0), (   16.0,  0.0)),
    term([ 0,  0,  2,  2, 2], (    -31.0,    0.0), (   13.0,  0.0)),
    term([ 0,  0,  2,  0, 0], (     29.0,    0.0), (    0.0,  0.0)),
    term([-2,  0,  1,  2, 2], (     29.0,    0.0), (  -12.0,  0.0)),
    term([ 0,  0,  0,  2, 0], (     26.0,    0.0), (    0.0,  0.0)),
    term([-2,  0,  0,  2, 0], (    -22.0,    0.0), (    0.0,  0.0)),
    term([ 0,  0, -1,  2, 1], (     21.0,    0.0), (  -10.0,  0.0)),
    term([ 0,  2,  0,  0, 0], (     17.0,   -0.1), (    0.0,  0.0)),
    term([ 2,  0, -1,  0, 1], (     16.0,    0.0), (   -8.0,  0.0)),
    term([-2,  2,  0,  2, 2], (    -16.0,    0.1), (    7.0,  0.0)),
    term([ 0,  1,  0,  0, 1], (    -15.0,    0.0), (    9.0,  0.0)),
    term([-2,  0,  1,  0, 1], (    -13.0,    0.0), (    7.0,  0.0)),
    term([ 0, -1,  0,  0, 1], (    -12.0,    0.0), (    6.0,  0.0)),
    term([ 0,  0,  2, -2, 0], (     11.0,    0.0), (    0.0,  0.0)),
];

/// Delaunay arguments `(D, M, M', F, Ω)` in radians.
fn delaunay_arguments(t: f64) -> [Radian; 5] {
    let t2 = t * t;
    let t3 = t2 * t;

    let l = (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let p = (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let f = (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let d = (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let n = (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC;

    [d % DPI, p % DPI, l % DPI, f % DPI, n % DPI]
}

/// Nutation in longitude and obliquity `(Δψ, Δε)`, in arcseconds (IAU 1980).
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date in the TT scale.
pub fn nutation(tjm: MJD) -> (ArcSec, ArcSec) {
    let t = julian_centuries(tjm);
    let fundamental = delaunay_arguments(t);

    let (dpsi, deps) = NUTATION_TERMS.iter().fold((0.0, 0.0), |(dpsi, deps), nt| {
        let arg: f64 = nt
            .args
            .iter()
            .zip(fundamental.iter())
            .map(|(&k, &a)| k as f64 * a)
            .sum();
        (
            dpsi + (nt.psi.0 + nt.psi.1 * t) * arg.sin(),
            deps + (nt.eps.0 + nt.eps.1 * t) * arg.cos(),
        )
    });

    (dpsi * 1e-4, deps * 1e-4)
}

/// Equation of the equinoxes `Δψ·cos(ε)`, in radians.
pub fn equequ(tjm: MJD) -> Radian {
    let (dpsi, _) = nutation(tjm);
    RADSEC * dpsi * obleq(tjm).cos()
}

/// Precession matrix (IAU 1976) from the J2000 mean equator to the mean equator of date.
pub fn prec(tjm: MJD) -> Matrix3<f64> {
    // Lieske (1977) angle rates, in degrees per century
    let (zed, zedd, zeddd) = (0.6406161 * RADEG, 0.0000839 * RADEG, 0.0000050 * RADEG);
    let (zd, zdd, zddd) = (0.6406161 * RADEG, 0.0003041 * RADEG, 0.0000051 * RADEG);
    let (thd, thdd, thddd) = (0.5567530 * RADEG, -0.0001185 * RADEG, -0.0000116 * RADEG);

    let t = julian_centuries(tjm);

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    rotmt(z, Axis::Z) * rotmt(-theta, Axis::Y) * rotmt(zeta, Axis::Z)
}

/// Nutation matrix from the mean equator of date to the true equator of date.
pub fn rnut80(tjm: MJD) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi, deps) = nutation(tjm);
    let epst = epsm + deps * RADSEC;

    rotmt(epst, Axis::X) * rotmt(dpsi * RADSEC, Axis::Z) * rotmt(-epsm, Axis::X)
}

/// Combined precession-nutation matrix, J2000 mean equator → true equator of date.
pub fn precession_nutation(tjm: MJD) -> Matrix3<f64> {
    rnut80(tjm) * prec(tjm)
}

/// Rotation from the J2000 mean equator to the J2000 mean ecliptic.
pub fn equatorial_to_ecliptic_j2000() -> Matrix3<f64> {
    rotmt(-OBLIQUITY_J2000_ARCSEC * RADSEC, Axis::X)
}

/// Greenwich apparent sidereal time at `epoch`, in radians within `[0, 2π)`.
///
/// UT1 is approximated by UTC; the difference stays below 0.9 s.
pub fn gast(epoch: &Epoch) -> Radian {
    (gmst(epoch.to_mjd_utc_days()) + equequ(epoch.to_mjd_tt_days())).rem_euclid(DPI)
}
