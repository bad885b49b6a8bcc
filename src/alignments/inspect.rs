//! Hour-by-hour view of one Moon-planet pair around a given instant.
//!
//! Used to check a reported alignment by eye: for every hour of the window and for
//! both frames, the sample carries the two longitudes, their wrapped difference, the
//! angular separation and the Sun altitude at the site.
use hifitime::{Duration, Epoch};
use tracing::debug;

use crate::{
    almanac_errors::AlmanacError,
    constants::Degree,
    observers::Observer,
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
};

use super::{angular_difference::wrap_longitude_difference, night_gate::is_below_twilight};

/// Default half width of the scan, in hours.
pub const INSPECTION_HALF_WIDTH_HOURS: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionSample {
    pub epoch: Epoch,
    /// Whole hours from the scan center.
    pub offset_hours: i64,
    /// `"geocentric"` or `"topocentric"`.
    pub frame: &'static str,
    pub moon_longitude: Degree,
    pub planet_longitude: Degree,
    /// Moon minus planet, in `(-180, 180]`.
    pub longitude_diff: Degree,
    pub separation: Degree,
    /// Sun altitude at the site, identical for both frames of an instant.
    pub sun_altitude: Degree,
    pub night: bool,
}

/// Scan `planet` against the Moon every hour within `center ± half_width_hours`.
///
/// Samples are ordered by time, the geocentric one first at each instant. Any
/// provider failure aborts the scan.
pub fn inspect_alignment<P>(
    provider: &P,
    site: &Observer,
    center: &Epoch,
    planet: CelestialBody,
    half_width_hours: i64,
) -> Result<Vec<InspectionSample>, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    if half_width_hours < 0 {
        return Err(AlmanacError::InvalidSearchConfig(format!(
            "negative inspection half width: {half_width_hours} h"
        )));
    }

    let frames = [
        ReferenceFrame::Geocentric,
        ReferenceFrame::Topocentric(site.clone()),
    ];
    let mut samples = Vec::with_capacity(2 * (2 * half_width_hours as usize + 1));

    for offset_hours in -half_width_hours..=half_width_hours {
        let epoch = *center + Duration::from_hours(offset_hours as f64);
        let (sun_altitude, _) = provider.apparent_altaz(&epoch, &frames[1], CelestialBody::Sun)?;

        for frame in &frames {
            let longitudes =
                provider.apparent_longitudes(&epoch, frame, &[CelestialBody::Moon, planet])?;
            let &[moon_longitude, planet_longitude] = longitudes.as_slice() else {
                return Err(AlmanacError::DegenerateGeometry(format!(
                    "expected 2 longitudes, got {}",
                    longitudes.len()
                )));
            };
            let separation = provider.separation(&epoch, frame, CelestialBody::Moon, planet)?;

            let sample = InspectionSample {
                epoch,
                offset_hours,
                frame: frame.label(),
                moon_longitude,
                planet_longitude,
                longitude_diff: wrap_longitude_difference(moon_longitude, planet_longitude),
                separation,
                sun_altitude,
                night: is_below_twilight(sun_altitude),
            };
            debug!(?sample, "inspection sample");
            samples.push(sample);
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod test_inspect {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::time::days_between;

    /// Moon gaining 0.5°/h on a planet fixed at 100°, 2° of parallax in longitude at
    /// the site, Sun 1°/h lower every hour after the center.
    struct LinearSky {
        center: Epoch,
    }

    impl LinearSky {
        fn hours(&self, epoch: &Epoch) -> f64 {
            days_between(&self.center, epoch) * 24.0
        }
    }

    impl PositionProvider for LinearSky {
        fn apparent_longitude_latitude(
            &self,
            epoch: &Epoch,
            frame: &ReferenceFrame,
            body: CelestialBody,
        ) -> Result<(Degree, Degree), AlmanacError> {
            let parallax = if frame.site().is_some() { 2.0 } else { 0.0 };
            match body {
                CelestialBody::Moon => Ok((100.0 + 0.5 * self.hours(epoch) + parallax, 0.0)),
                _ => Ok((100.0, 0.0)),
            }
        }

        fn apparent_altaz(
            &self,
            epoch: &Epoch,
            frame: &ReferenceFrame,
            _body: CelestialBody,
        ) -> Result<(Degree, Degree), AlmanacError> {
            frame.site().ok_or(AlmanacError::AltAzRequiresSite)?;
            Ok((-6.0 - self.hours(epoch), 180.0))
        }

        fn separation(
            &self,
            epoch: &Epoch,
            frame: &ReferenceFrame,
            body_a: CelestialBody,
            body_b: CelestialBody,
        ) -> Result<Degree, AlmanacError> {
            let (a, _) = self.apparent_longitude_latitude(epoch, frame, body_a)?;
            let (b, _) = self.apparent_longitude_latitude(epoch, frame, body_b)?;
            Ok(wrap_longitude_difference(a, b).abs())
        }
    }

    fn montevideo() -> Observer {
        Observer::from_hemisphere_strings("34.9011 S", "56.1645 W", 43.0, None).unwrap()
    }

    #[test]
    fn test_hourly_scan_covers_both_frames() {
        let center = Epoch::from_gregorian_utc_hms(2026, 1, 31, 3, 18, 0);
        let sky = LinearSky { center };
        let samples =
            inspect_alignment(&sky, &montevideo(), &center, CelestialBody::Jupiter, 5).unwrap();

        assert_eq!(samples.len(), 22);
        assert_eq!(samples[0].offset_hours, -5);
        assert_eq!(samples[21].offset_hours, 5);
        for pair in samples.chunks(2) {
            assert_eq!(pair[0].frame, "geocentric");
            assert_eq!(pair[1].frame, "topocentric");
            assert_eq!(pair[0].epoch, pair[1].epoch);
            assert_eq!(pair[0].sun_altitude, pair[1].sun_altitude);
        }

        let at_center = &samples[10];
        assert_eq!(at_center.epoch, center);
        assert_abs_diff_eq!(at_center.longitude_diff, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(samples[11].longitude_diff, 2.0, epsilon = 1e-9);

        let last = &samples[20];
        assert_abs_diff_eq!(last.longitude_diff, 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(last.separation, 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(last.planet_longitude, 100.0, epsilon = 1e-12);

        // -6° at the center is still twilight
        assert!(!at_center.night);
        assert!(samples[12].night);
        assert!(!samples[8].night);
    }

    #[test]
    fn test_zero_width_scan_and_bad_width() {
        let center = Epoch::from_gregorian_utc_hms(2026, 1, 31, 3, 18, 0);
        let sky = LinearSky { center };
        let site = montevideo();

        let samples = inspect_alignment(&sky, &site, &center, CelestialBody::Saturn, 0).unwrap();
        assert_eq!(samples.len(), 2);

        assert!(matches!(
            inspect_alignment(&sky, &site, &center, CelestialBody::Saturn, -1),
            Err(AlmanacError::InvalidSearchConfig(_))
        ));
    }
}
