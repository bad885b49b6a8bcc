//! # Observer site geometry
//!
//! This module provides the [`Observer`](crate::observers::Observer) type, the single fixed
//! site from which topocentric positions and Sun altitudes are evaluated. It covers:
//!
//! - Parsing of **signed-hemisphere coordinate strings** such as `"34.9011 S"` or
//!   `"56.1645 W"` into signed decimal degrees ([`parse_latitude`], [`parse_longitude`]).
//! - Conversion of geodetic latitude/elevation to normalized **geocentric parallax
//!   coordinates** (ρ·cosφ, ρ·sinφ) on the WGS84 ellipsoid ([`geodetic_to_parallax`]).
//! - The site's **geocentric position and velocity** in the J2000 equatorial frame at a
//!   given epoch ([`Observer::geocentric_state`]).
//! - **Altitude/azimuth** of a direction seen from the site ([`Observer::altaz`]).
//!
//! ## Frames & conventions
//!
//! ```text
//! Body-fixed  --(GAST)-->  true equator of date  --(precession+nutation)^T-->  J2000 equatorial
//! ```
//!
//! - Longitudes: **degrees**, east positive. Latitudes: geodetic **degrees**, north positive.
//! - Elevation: **meters** above the ellipsoid.
//! - Positions: **km**, velocities: **km/s**.
//! - Azimuth is measured from north through east. Altitudes are geometric (no refraction).
//! - Polar motion is neglected and UT1 is approximated by UTC.
use std::fmt;

use hifitime::Epoch;
use nalgebra::Vector3;
use nom::{
    character::complete::{one_of, space0},
    combinator::opt,
    number::complete::double,
    IResult, Parser,
};
use ordered_float::NotNan;

use crate::{
    almanac_errors::AlmanacError,
    constants::{Degree, Meter, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, EARTH_RADIUS_KM, EARTH_ROTATION_RATE},
    earth_orientation::{gast, precession_nutation, rotmt, Axis},
};

/// Parse `"<value> <hemisphere>"` into its numeric value and optional hemisphere letter.
fn hemisphere_coord(input: &str) -> IResult<&str, (f64, Option<char>)> {
    let (input, _) = space0(input)?;
    let (input, value) = double(input)?;
    let (input, _) = space0(input)?;
    let (input, hemisphere) = opt(one_of("NSEWnsew")).parse(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (value, hemisphere)))
}

fn parse_signed_coord(
    coord: &str,
    positive: char,
    negative: char,
    limit: f64,
) -> Result<Degree, AlmanacError> {
    let invalid = || AlmanacError::InvalidCoordinate(coord.to_string());

    let (rest, (value, hemisphere)) = hemisphere_coord(coord).map_err(|_| invalid())?;
    if !rest.is_empty() || !value.is_finite() {
        return Err(invalid());
    }

    let signed = match hemisphere.map(|c| c.to_ascii_uppercase()) {
        None => value,
        Some(_) if value < 0.0 => return Err(invalid()),
        Some(h) if h == positive => value,
        Some(h) if h == negative => -value,
        Some(_) => return Err(invalid()),
    };

    if signed.abs() > limit {
        return Err(invalid());
    }
    Ok(signed)
}

/// Parse a latitude such as `"34.9011 S"` (→ `-34.9011`) or a signed decimal `"-34.9011"`.
///
/// Only the `N`/`S` hemisphere letters are accepted, case-insensitively. A negative
/// value combined with a hemisphere letter is rejected.
pub fn parse_latitude(coord: &str) -> Result<Degree, AlmanacError> {
    parse_signed_coord(coord, 'N', 'S', 90.0)
}

/// Parse a longitude such as `"56.1645 W"` (→ `-56.1645`) or a signed decimal `"-56.1645"`.
pub fn parse_longitude(coord: &str) -> Result<Degree, AlmanacError> {
    parse_signed_coord(coord, 'E', 'W', 180.0)
}

/// Normalized geocentric parallax coordinates `(ρ·cosφ, ρ·sinφ)` of a geodetic site.
///
/// Arguments
/// -----------------
/// * `lat`: Geodetic latitude in **degrees**.
/// * `height`: Elevation above the ellipsoid in **meters**.
///
/// Return
/// ----------
/// * `(ρ·cosφ, ρ·sinφ)` in units of the Earth equatorial radius, φ being the geocentric
///   latitude.
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    let lat = lat.to_radians();
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // Parametric latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// A fixed observing site on the Earth's surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    /// Geodetic longitude in **degrees** east of Greenwich.
    pub longitude: NotNan<f64>,

    /// Geodetic latitude in **degrees**, north positive.
    pub latitude: NotNan<f64>,

    /// Elevation above the ellipsoid in **meters**.
    pub elevation: NotNan<f64>,

    /// ρ·cosφ (geocentric latitude φ), in **Earth radii**.
    pub rho_cos_phi: NotNan<f64>,

    /// ρ·sinφ (geocentric latitude φ), in **Earth radii**.
    pub rho_sin_phi: NotNan<f64>,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Geodetic longitude in degrees, east positive.
    /// * `latitude`: Geodetic latitude in degrees, north positive.
    /// * `elevation`: Height above the ellipsoid in meters.
    /// * `name`: Optional label used in logs.
    ///
    /// Return
    /// ----------
    /// * The observer, or [`AlmanacError::InvalidCoordinate`] when a coordinate is out of
    ///   range, or [`AlmanacError::NanSiteGeometry`] when any input is NaN.
    pub fn new(
        longitude: Degree,
        latitude: Degree,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Observer, AlmanacError> {
        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);

        let observer = Observer {
            longitude: NotNan::new(longitude)?,
            latitude: NotNan::new(latitude)?,
            elevation: NotNan::new(elevation)?,
            rho_cos_phi: NotNan::new(rho_cos_phi)?,
            rho_sin_phi: NotNan::new(rho_sin_phi)?,
            name,
        };

        if latitude.abs() > 90.0 {
            return Err(AlmanacError::InvalidCoordinate(format!("latitude {latitude}")));
        }
        if longitude.abs() > 180.0 {
            return Err(AlmanacError::InvalidCoordinate(format!("longitude {longitude}")));
        }
        Ok(observer)
    }

    /// Create an observer from signed-hemisphere strings, e.g. `("34.9011 S", "56.1645 W")`.
    pub fn from_hemisphere_strings(
        latitude: &str,
        longitude: &str,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Observer, AlmanacError> {
        Observer::new(
            parse_longitude(longitude)?,
            parse_latitude(latitude)?,
            elevation,
            name,
        )
    }

    /// Earth-fixed position of the site, in km.
    pub fn body_fixed_coord(&self) -> Vector3<f64> {
        let lon = self.longitude.into_inner().to_radians();
        let rho_cos_phi = self.rho_cos_phi.into_inner();
        Vector3::new(
            EARTH_RADIUS_KM * rho_cos_phi * lon.cos(),
            EARTH_RADIUS_KM * rho_cos_phi * lon.sin(),
            EARTH_RADIUS_KM * self.rho_sin_phi.into_inner(),
        )
    }

    /// Geocentric position (km) and velocity (km/s) of the site in the J2000 equatorial frame.
    ///
    /// The velocity only accounts for the Earth rotation.
    pub fn geocentric_state(&self, epoch: &Epoch) -> (Vector3<f64>, Vector3<f64>) {
        let omega = Vector3::new(0.0, 0.0, EARTH_ROTATION_RATE);

        let pos_tod = rotmt(gast(epoch), Axis::Z) * self.body_fixed_coord();
        let vel_tod = omega.cross(&pos_tod);

        let to_j2000 = precession_nutation(epoch.to_mjd_tt_days()).transpose();
        (to_j2000 * pos_tod, to_j2000 * vel_tod)
    }

    /// Local `(east, north, up)` unit vectors in the Earth-fixed frame.
    ///
    /// `up` is the ellipsoid normal, so altitudes are relative to the geodetic horizon.
    pub fn horizon_basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let (sin_lon, cos_lon) = self.longitude.into_inner().to_radians().sin_cos();
        let (sin_lat, cos_lat) = self.latitude.into_inner().to_radians().sin_cos();

        let east = Vector3::new(-sin_lon, cos_lon, 0.0);
        let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
        let up = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
        (east, north, up)
    }

    /// Altitude and azimuth, in degrees, of a direction given in the J2000 equatorial frame.
    ///
    /// Arguments
    /// -----------------
    /// * `epoch`: Instant of the observation, used for the Earth orientation.
    /// * `direction`: Topocentric vector toward the target (any length, non-zero).
    ///
    /// Return
    /// ----------
    /// * `(altitude, azimuth)` with azimuth in `[0, 360)` measured from north through east.
    pub fn altaz(&self, epoch: &Epoch, direction: &Vector3<f64>) -> (Degree, Degree) {
        let to_tod = precession_nutation(epoch.to_mjd_tt_days());
        let body_fixed = rotmt(-gast(epoch), Axis::Z) * (to_tod * direction.normalize());

        let (east, north, up) = self.horizon_basis();
        let altitude = body_fixed.dot(&up).clamp(-1.0, 1.0).asin().to_degrees();
        let azimuth = body_fixed
            .dot(&east)
            .atan2(body_fixed.dot(&north))
            .to_degrees()
            .rem_euclid(360.0);

        (altitude, azimuth)
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, lon) = (self.latitude.into_inner(), self.longitude.into_inner());
        let lat_h = if lat < 0.0 { 'S' } else { 'N' };
        let lon_h = if lon < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{} ({:.4} {lat_h}, {:.4} {lon_h}, {:.0} m)",
            self.name.as_deref().unwrap_or("Observer"),
            lat.abs(),
            lon.abs(),
            self.elevation.into_inner()
        )
    }
}
