//! # Apparent positions of solar system bodies
//!
//! This module defines the vocabulary shared by the event searches:
//!
//! * [`CelestialBody`]: the bodies the almanac observes, resolvable to NAIF ids.
//! * [`ReferenceFrame`]: the vantage point, either the Earth center or a site on its surface.
//! * [`ApparentPosition`]: ecliptic coordinates (and horizontal ones for a site) of a body.
//! * [`PositionProvider`]: the seam between the searches and the ephemeris. The
//!   ephemeris-backed implementation is [`apparent::EphemerisPositions`]; tests plug in
//!   synthetic providers with known geometry.
//!
//! ## Conventions
//!
//! * Ecliptic coordinates refer to the mean ecliptic and equinox of J2000, in **degrees**,
//!   longitude in `[0, 360)`.
//! * Altitude/azimuth are geometric (no refraction), azimuth from north through east.
//! * Separations are angles between light-time corrected (astrometric) directions.
pub mod apparent;

use std::fmt;

use hifitime::Epoch;

use crate::{
    almanac_errors::AlmanacError,
    constants::{Degree, Kilometer},
    jpl_ephem::naif::naif_ids::{NaifIds, Planet},
    observers::Observer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Sun,
    Moon,
    Earth,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl CelestialBody {
    /// Planets searched for Moon alignments, in output order.
    pub const ALIGNMENT_PLANETS: [CelestialBody; 5] = [
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Earth => "Earth",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
        }
    }

    /// NAIF id used for the ephemeris lookup.
    ///
    /// DE kernels carry mass center segments for Mercury, Venus, the Earth and the Moon
    /// only; the outer planets are observed through their system barycenter.
    pub fn naif_id(&self) -> NaifIds {
        match self {
            CelestialBody::Sun => NaifIds::Sun,
            CelestialBody::Moon => NaifIds::Moon,
            CelestialBody::Earth => NaifIds::PlanetMassCenter(Planet::Earth),
            CelestialBody::Mercury => NaifIds::PlanetMassCenter(Planet::Mercury),
            CelestialBody::Venus => NaifIds::PlanetMassCenter(Planet::Venus),
            CelestialBody::Mars => NaifIds::PlanetaryBary(Planet::Mars),
            CelestialBody::Jupiter => NaifIds::PlanetaryBary(Planet::Jupiter),
            CelestialBody::Saturn => NaifIds::PlanetaryBary(Planet::Saturn),
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vantage point of an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceFrame {
    Geocentric,
    Topocentric(Observer),
}

impl ReferenceFrame {
    pub fn site(&self) -> Option<&Observer> {
        match self {
            ReferenceFrame::Geocentric => None,
            ReferenceFrame::Topocentric(site) => Some(site),
        }
    }

    /// Short lowercase label, also used as the JSON key of the frame.
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceFrame::Geocentric => "geocentric",
            ReferenceFrame::Topocentric(_) => "topocentric",
        }
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFrame::Geocentric => write!(f, "geocentric"),
            ReferenceFrame::Topocentric(site) => write!(f, "topocentric from {site}"),
        }
    }
}

/// Apparent place of a body at one instant, seen from one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ApparentPosition {
    pub body: CelestialBody,
    /// Ecliptic longitude in `[0, 360)`.
    pub longitude: Degree,
    pub latitude: Degree,
    /// Light-time corrected distance from the observer.
    pub distance: Kilometer,
    /// `(altitude, azimuth)`, only for a topocentric frame.
    pub altaz: Option<(Degree, Degree)>,
}

pub trait PositionProvider {
    /// Apparent ecliptic `(longitude, latitude)` of `body`.
    fn apparent_longitude_latitude(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<(Degree, Degree), AlmanacError>;

    /// Apparent `(altitude, azimuth)` of `body`.
    ///
    /// Fails with [`AlmanacError::AltAzRequiresSite`] in the geocentric frame.
    fn apparent_altaz(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<(Degree, Degree), AlmanacError>;

    /// Angle between two bodies, in degrees within `[0, 180]`.
    fn separation(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body_a: CelestialBody,
        body_b: CelestialBody,
    ) -> Result<Degree, AlmanacError>;

    /// Apparent ecliptic longitudes of several bodies at the same instant.
    ///
    /// Implementations may override this to share the observer state between bodies.
    fn apparent_longitudes(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        bodies: &[CelestialBody],
    ) -> Result<Vec<Degree>, AlmanacError> {
        bodies
            .iter()
            .map(|body| {
                self.apparent_longitude_latitude(epoch, frame, *body)
                    .map(|(lon, _)| lon)
            })
            .collect()
    }
}
