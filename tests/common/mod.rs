#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use moon_almanac::{
    almanac::{Almanac, AlmanacConfig},
    almanac_errors::AlmanacError,
    constants::Degree,
    dataset::{AlignmentEvent, ChronologicalKey},
    jpl_ephem::{download_jpl_file::EphemFileSource, JPLEphem},
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
    time::days_between,
};

/// Longitude of the synthetic Jupiter, in degrees.
pub const JUPITER_LON: Degree = 120.0;

/// Exact synthetic Moon-Jupiter alignment: 2026-01-31T03:18 UTC (00:18 in Montevideo).
pub fn crossing_epoch() -> Epoch {
    Epoch::from_gregorian_utc_hms(2026, 1, 31, 3, 18, 0)
}

/// How the Moon moves relative to Jupiter around [`crossing_epoch`].
#[derive(Debug, Clone, Copy)]
pub enum JupiterTrack {
    /// `diff = rate * (t - t0)`: an exact alignment every `360 / rate` days.
    Crossing { rate: f64 },
    /// `diff = closest + curvature * (t - t0)^2`: the Moon turns back before meeting
    /// Jupiter. Only meaningful within a few days of `t0`.
    NearMiss { closest: Degree, curvature: f64 },
    /// Jupiter stays 90° behind the Moon.
    Parallel,
}

#[derive(Debug, Clone, Copy)]
pub enum SunPolicy {
    /// Same altitude all year long.
    Always(Degree),
    /// `night` within half a day of [`crossing_epoch`], `day` elsewhere.
    AroundCrossing { night: Degree, day: Degree },
}

/// Analytic sky with a single controllable Moon-Jupiter geometry.
///
/// All bodies lie on the ecliptic and both frames see the same sky. Planets other than
/// Jupiter either stay 90° behind the Moon or sit at fixed longitudes.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSky {
    pub jupiter: JupiterTrack,
    pub sun: SunPolicy,
    pub fixed_planets: bool,
}

impl SyntheticSky {
    pub fn night_crossing() -> Self {
        SyntheticSky {
            jupiter: JupiterTrack::Crossing { rate: 13.2 },
            sun: SunPolicy::AroundCrossing {
                night: -20.0,
                day: -2.0,
            },
            fixed_planets: false,
        }
    }

    fn elapsed(&self, epoch: &Epoch) -> f64 {
        days_between(&crossing_epoch(), epoch)
    }

    fn moon_longitude(&self, epoch: &Epoch) -> Degree {
        let dt = self.elapsed(epoch);
        let lon = match self.jupiter {
            JupiterTrack::Crossing { rate } => JUPITER_LON + rate * dt,
            JupiterTrack::NearMiss { closest, curvature } => {
                JUPITER_LON + closest + curvature * dt * dt
            }
            JupiterTrack::Parallel => JUPITER_LON + 13.2 * dt,
        };
        lon.rem_euclid(360.0)
    }

    fn longitude(&self, epoch: &Epoch, body: CelestialBody) -> Degree {
        let moon = self.moon_longitude(epoch);
        let behind_moon = (moon - 90.0).rem_euclid(360.0);
        match body {
            CelestialBody::Moon => moon,
            CelestialBody::Sun => (311.0 + 0.9856 * self.elapsed(epoch)).rem_euclid(360.0),
            CelestialBody::Earth => 0.0,
            CelestialBody::Jupiter => match self.jupiter {
                JupiterTrack::Parallel => behind_moon,
                _ => JUPITER_LON,
            },
            planet if self.fixed_planets => match planet {
                CelestialBody::Mercury => 10.0,
                CelestialBody::Venus => 60.0,
                CelestialBody::Mars => 200.0,
                _ => 300.0,
            },
            _ => behind_moon,
        }
    }
}

impl PositionProvider for SyntheticSky {
    fn apparent_longitude_latitude(
        &self,
        epoch: &Epoch,
        _frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<(Degree, Degree), AlmanacError> {
        Ok((self.longitude(epoch, body), 0.0))
    }

    fn apparent_altaz(
        &self,
        epoch: &Epoch,
        frame: &ReferenceFrame,
        body: CelestialBody,
    ) -> Result<(Degree, Degree), AlmanacError> {
        frame.site().ok_or(AlmanacError::AltAzRequiresSite)?;
        if body != CelestialBody::Sun {
            return Ok((30.0, 180.0));
        }
        let altitude = match self.sun {
            SunPolicy::Always(altitude) => altitude,
            SunPolicy::AroundCrossing { night, day } => {
                if self.elapsed(epoch).abs() < 0.5 {
                    night
                } else {
                    day
                }
            }
        };
        Ok((altitude, 250.0))
    }

    fn separation(
        &self,
        epoch: &Epoch,
        _frame: &ReferenceFrame,
        body_a: CelestialBody,
        body_b: CelestialBody,
    ) -> Result<Degree, AlmanacError> {
        let raw = (self.longitude(epoch, body_a) - self.longitude(epoch, body_b)).rem_euclid(360.0);
        Ok(raw.min(360.0 - raw))
    }
}

/// Default Montevideo almanac writing `year` into `output_dir`.
pub fn almanac_for(year: i32, output_dir: &Utf8Path) -> Almanac {
    let config = AlmanacConfig {
        years: year..=year,
        output_dir: output_dir.to_path_buf(),
        ..AlmanacConfig::default()
    };
    Almanac::new(config).unwrap()
}

pub fn utf8_tempdir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8Path::from_path(dir.path()).unwrap().to_path_buf()
}

pub fn assert_chronological<E: ChronologicalKey>(events: &[E]) {
    for pair in events.windows(2) {
        assert!(
            pair[0].sort_key() <= pair[1].sort_key(),
            "{} comes after {}",
            pair[0].sort_key(),
            pair[1].sort_key()
        );
    }
}

pub fn events_for<'a>(events: &'a [AlignmentEvent], planet: &str) -> Vec<&'a AlignmentEvent> {
    events.iter().filter(|e| e.planet == planet).collect()
}

/// DE421 from `tests/data`, or `None` when the kernel has not been downloaded.
pub fn de421() -> Option<JPLEphem> {
    let path = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/de421.bsp");
    if !path.exists() {
        eprintln!("{path} not found, skipping");
        return None;
    }
    Some(JPLEphem::new(&EphemFileSource::File(path)).unwrap())
}
