//! Apparent positions computed from a JPL planetary kernel.
//!
//! For an observation at instant `t` from a frame:
//!
//! 1. the observer barycentric state is the Earth state (EMB + Earth wrt EMB), plus the
//!    site geocentric state in a topocentric frame;
//! 2. the astrometric vector is the body position at `t - τ` minus the observer
//!    position at `t`, the light time `τ` being iterated a few times;
//! 3. the apparent direction adds the first-order annual (and diurnal) aberration
//!    `u' = u + β - (u·β) u` with `β = v_obs / c`;
//! 4. the direction is rotated to the J2000 mean ecliptic, or to the local horizon
//!    through precession, nutation and sidereal time.
//!
//! Gravitational deflection and polar motion are neglected.
use hifitime::{Duration, Epoch};
use nalgebra::Vector3;

use crate::{
    almanac_errors::AlmanacError,
    constants::{Degree, VLIGHT},
    earth_orientation::equatorial_to_ecliptic_j2000,
    jpl_ephem::{state_vector::StateVector, JPLEphem},
};

use super::{ApparentPosition, CelestialBody, PositionProvider, ReferenceFrame};

/// Light-time passes; three bring the Moon and planets well below a millisecond.
const LIGHT_TIME_ITERATIONS: usize = 3;

/// Apply the first-order aberration of an observer moving at `velocity` (km/s).
pub fn aberrate(direction: &Vector3<f64>, velocity: &Vector3<f64>) -> Vector3<f64> {
    let u = direction.normalize();
    let beta = velocity / VLIGHT;
    (u + beta - u * u.dot(&beta)).normalize()
}

/// Ecliptic `(longitude, latitude)` in degrees of a J2000 equatorial vector.
pub fn ecliptic_lon_lat(equatorial: &Vector3<f64>) -> (Degree, Degree) {
    let v = equatorial_to_ecliptic_j2000() * equatorial;
    let longitude = v.y.atan2(v.x).to_degrees().rem_euclid(360.0);
    let latitude = v.z.atan2(v.x.hypot(v.y)).to_degrees();
    (longitude, latitude)
}

/// Angle between two vectors in degrees, stable for small and large angles.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Degree {
    a.cross(b).norm().atan2(a.dot(b)).to_degrees()
}

/// [`PositionProvider`] backed by a loaded ephemeris.
#[derive(Debug, Clone, Copy)]
pub struct EphemerisPositions<'a> {
    ephem: &'a JPLEphem,
}

impl<'a> EphemerisPositions<'a> {
    pub fn new(ephem: &'a JPLEphem) -> Self {
        EphemerisPositions { ephem }
    }

    /// Barycentric state of the observer of `frame`.
    pub fn observer_state(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
    ) -> Result<StateVector, AlmanacError> {
        let earth = self.ephem.earth_ssb_state(epoch)?;
        Ok(match frame {
            ReferenceFrame::Geocentric => earth,
            ReferenceFrame::Topocentric(site) => {
                let (position, velocity) = site.geocentric_state(epoch);
                earth + StateVector::new(position, velocity)
            }
        })
    }

    /// Light-time corrected vector from the observer to `body`, in km.
    pub fn astrometric(
        &self,
        epoch: &Epoch,
        observer: &StateVector,
        body: CelestialBody,
    ) -> Result<Vector3<f64>, AlmanacError> {
        let body_id = body.naif_id();
        let mut relative =
            self.ephem.ssb_state_or_barycenter(body_id, epoch)?.position - observer.position;

        for _ in 0..LIGHT_TIME_ITERATIONS {
            let light_time = Duration::from_seconds(relative.norm() / VLIGHT);
            let emission = *epoch - light_time;
            relative = self.ephem.ssb_state_or_barycenter(body_id, &emission)?.position
                - observer.position;
        }

        if relative.norm() < f64::EPSILON {
            return Err(AlmanacError::DegenerateGeometry(format!(
                "the observer coincides with {body}"
            )));
        }
        Ok(relative)
    }

    fn position_from(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        observer: &StateVector,
        body: CelestialBody,
    ) -> Result<ApparentPosition, AlmanacError> {
        let astrometric = self.astrometric(epoch, observer, body)?;
        let apparent = aberrate(&astrometric, &observer.velocity);
        let (longitude, latitude) = ecliptic_lon_lat(&apparent);

        Ok(ApparentPosition {
            body,
            longitude,
            latitude,
            distance: astrometric.norm(),
            altaz: frame.site().map(|site| site.altaz(epoch, &apparent)),
        })
    }

    /// Full apparent place of `body`.
    pub fn apparent_position(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<ApparentPosition, AlmanacError> {
        let observer = self.observer_state(epoch, frame)?;
        self.position_from(epoch, frame, &observer, body)
    }
}

impl PositionProvider for EphemerisPositions<'_> {
    fn apparent_longitude_latitude(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<(Degree, Degree), AlmanacError> {
        let position = self.apparent_position(epoch, frame, body)?;
        Ok((position.longitude, position.latitude))
    }

    fn apparent_altaz(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<(Degree, Degree), AlmanacError> {
        if frame.site().is_none() {
            return Err(AlmanacError::AltAzRequiresSite);
        }
        self.apparent_position(epoch, frame, body)?
            .altaz
            .ok_or(AlmanacError::AltAzRequiresSite)
    }

    fn separation(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body_a: CelestialBody,
        body_b: CelestialBody,
    ) -> Result<Degree, AlmanacError> {
        let observer = self.observer_state(epoch, frame)?;
        let a = self.astrometric(epoch, &observer, body_a)?;
        let b = self.astrometric(epoch, &observer, body_b)?;
        Ok(angle_between(&a, &b))
    }

    fn apparent_longitudes(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        bodies: &[CelestialBody],
    ) -> Result<Vec<Degree>, AlmanacError> {
        let observer = self.observer_state(epoch, frame)?;
        bodies
            .iter()
            .map(|body| {
                self.position_from(epoch, frame, &observer, *body)
                    .map(|p| p.longitude)
            })
            .collect()
    }
}
