//! NAIF integer codes of the bodies stored in JPL planetary kernels.
//!
//! * `0` is the solar system barycenter, `10` the Sun.
//! * `1..=9` are planetary system barycenters (`3` is the Earth-Moon barycenter).
//! * `N99` is the mass center of planet `N` (`399` the Earth).
//! * `301` is the Moon.
pub mod naif_type;

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Error)]
pub enum ErrorId {
    #[error("Invalid Planetary Barycenter ID: {0}")]
    InvalidPlanetBaryId(i32),

    #[error("Invalid Planet Mass Center ID: {0}")]
    InvalidPlanetMassCenterId(i32),

    #[error("Invalid NAIF ID: {0}")]
    InvalidNaifId(i32),
}

/// The eight planets and Pluto, indexed by their NAIF system number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury = 1,
    Venus = 2,
    Earth = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
}

impl Planet {
    const ALL: [Planet; 9] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    fn from_system_number(n: i32) -> Option<Planet> {
        Planet::ALL.iter().copied().find(|p| *p as i32 == n)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaifIds {
    /// Solar system barycenter (0)
    SSB,
    /// Sun (10)
    Sun,
    /// Barycenter of a planetary system (1..=9)
    PlanetaryBary(Planet),
    /// Mass center of a planet (199..=999)
    PlanetMassCenter(Planet),
    /// Moon (301)
    Moon,
}

impl NaifIds {
    pub fn from_id(id: i32) -> Result<Self, ErrorId> {
        match id {
            0 => Ok(NaifIds::SSB),
            10 => Ok(NaifIds::Sun),
            301 => Ok(NaifIds::Moon),
            1..=9 => Planet::from_system_number(id)
                .map(NaifIds::PlanetaryBary)
                .ok_or(ErrorId::InvalidPlanetBaryId(id)),
            199..=999 if id % 100 == 99 => Planet::from_system_number(id / 100)
                .map(NaifIds::PlanetMassCenter)
                .ok_or(ErrorId::InvalidPlanetMassCenterId(id)),
            _ => Err(ErrorId::InvalidNaifId(id)),
        }
    }

    pub fn to_id(&self) -> i32 {
        match self {
            NaifIds::SSB => 0,
            NaifIds::Sun => 10,
            NaifIds::PlanetaryBary(planet) => *planet as i32,
            NaifIds::PlanetMassCenter(planet) => *planet as i32 * 100 + 99,
            NaifIds::Moon => 301,
        }
    }
}

impl From<NaifIds> for i32 {
    fn from(naif_id: NaifIds) -> Self {
        naif_id.to_id()
    }
}

impl TryFrom<i32> for NaifIds {
    type Error = ErrorId;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        NaifIds::from_id(id)
    }
}

impl fmt::Display for NaifIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaifIds::SSB => write!(f, "Solar System Barycenter"),
            NaifIds::Sun => write!(f, "Sun"),
            NaifIds::PlanetaryBary(Planet::Earth) => write!(f, "Earth-Moon Barycenter"),
            NaifIds::PlanetaryBary(planet) => write!(f, "{} Barycenter", planet.name()),
            NaifIds::PlanetMassCenter(planet) => write!(f, "{}", planet.name()),
            NaifIds::Moon => write!(f, "Moon"),
        }
    }
}

#[cfg(test)]
mod test_naif_id {
    use super::*;

    #[test]
    fn test_naif_ids() {
        assert_eq!(NaifIds::from_id(0).unwrap(), NaifIds::SSB);
        assert_eq!(NaifIds::from_id(10).unwrap(), NaifIds::Sun);
        assert_eq!(
            NaifIds::from_id(1).unwrap(),
            NaifIds::PlanetaryBary(Planet::Mercury)
        );
        assert_eq!(
            NaifIds::from_id(199).unwrap(),
            NaifIds::PlanetMassCenter(Planet::Mercury)
        );
        assert_eq!(
            NaifIds::from_id(399).unwrap(),
            NaifIds::PlanetMassCenter(Planet::Earth)
        );
        assert_eq!(NaifIds::from_id(301).unwrap(), NaifIds::Moon);
        assert!(NaifIds::from_id(1000).is_err());
        assert!(NaifIds::from_id(11).is_err());
        assert!(NaifIds::from_id(401).is_err());
    }

    #[test]
    fn test_naif_ids_round_trip() {
        for id in [0, 10, 1, 3, 5, 6, 199, 299, 399, 499, 301] {
            assert_eq!(NaifIds::from_id(id).unwrap().to_id(), id);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(NaifIds::PlanetaryBary(Planet::Earth).to_string(), "Earth-Moon Barycenter");
        assert_eq!(NaifIds::PlanetaryBary(Planet::Jupiter).to_string(), "Jupiter Barycenter");
        assert_eq!(NaifIds::PlanetMassCenter(Planet::Venus).to_string(), "Venus");
        assert_eq!(NaifIds::SSB.to_string(), "Solar System Barycenter");
    }
}
