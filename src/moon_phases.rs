//! Principal Moon phases.
//!
//! The phase is read from the geocentric elongation of the Moon in ecliptic
//! longitude: `floor(((lon_moon - lon_sun) mod 360) / 90)` gives a quarter code in
//! `0..=3`, and every change of code is a principal phase.
use chrono_tz::Tz;
use hifitime::Epoch;
use tracing::info;

use crate::{
    almanac_errors::AlmanacError,
    constants::Degree,
    dataset::{sort_chronologically, MoonPhaseEvent},
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
    search::{discrete::find_discrete, SearchConfig},
    time::{format_local, year_bounds},
};

/// Phase names, indexed by quarter code.
pub const PHASE_NAMES: [&str; 4] = ["New Moon", "First Quarter", "Full Moon", "Last Quarter"];

/// Quarter code of a Moon-Sun elongation in degrees.
pub fn quarter_code(elongation: Degree) -> u8 {
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    ((elongation.rem_euclid(360.0) / 90.0).floor() as u8).min(3)
}

/// Geocentric quarter code at `epoch`.
pub fn moon_phase_at<P>(provider: &P, epoch: &Epoch) -> Result<u8, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    let longitudes = provider.apparent_longitudes(
        epoch,
        &ReferenceFrame::Geocentric,
        &[CelestialBody::Moon, CelestialBody::Sun],
    )?;
    match longitudes.as_slice() {
        [moon, sun] => Ok(quarter_code(moon - sun)),
        _ => Err(AlmanacError::DegenerateGeometry(format!(
            "expected 2 longitudes, got {}",
            longitudes.len()
        ))),
    }
}

/// Phase name of a quarter code.
pub fn phase_name(code: u8) -> Result<&'static str, AlmanacError> {
    PHASE_NAMES
        .get(code as usize)
        .copied()
        .ok_or(AlmanacError::InvalidPhaseCode(code))
}

/// Instants and quarter codes of the principal phases within `[start, end)`.
pub fn find_moon_phases<P>(
    provider: &P,
    start: &Epoch,
    end: &Epoch,
    config: &SearchConfig,
) -> Result<(Vec<Epoch>, Vec<u8>), AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    find_discrete(start, end, |t| moon_phase_at(provider, t), config)
}

/// Principal phases of calendar year `year`, in local civil time, sorted.
pub fn collect_moon_phases<P>(
    provider: &P,
    year: i32,
    tz: &Tz,
    config: &SearchConfig,
) -> Result<Vec<MoonPhaseEvent>, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    let (start, end) = year_bounds(year);
    let (instants, codes) = find_moon_phases(provider, &start, &end, config)?;

    let mut events = instants
        .iter()
        .zip(codes)
        .map(|(instant, code)| -> Result<MoonPhaseEvent, AlmanacError> {
            let (date, time) = format_local(instant, tz)?;
            Ok(MoonPhaseEvent {
                date,
                time,
                phase: phase_name(code)?.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    sort_chronologically(&mut events);

    info!(year, moon_phases = events.len(), "moon phases computed");
    Ok(events)
}

#[cfg(test)]
mod test_moon_phases {
    use super::*;
    use crate::time::{days_between, parse_timezone};

    const SYNODIC_MONTH: f64 = 29.530_588;

    /// Sun fixed at 0°, Moon moving at the synodic rate, new at `new_moon`.
    struct SynodicSky {
        new_moon: Epoch,
    }

    impl PositionProvider for SynodicSky {
        fn apparent_longitude_latitude(
            &self,
            epoch: &Epoch,
            _frame: &ReferenceFrame,
            body: CelestialBody,
        ) -> Result<(Degree, Degree), AlmanacError> {
            match body {
                CelestialBody::Moon => {
                    let elapsed = days_between(&self.new_moon, epoch);
                    Ok(((elapsed / SYNODIC_MONTH * 360.0).rem_euclid(360.0), 0.0))
                }
                _ => Ok((0.0, 0.0)),
            }
        }

        fn apparent_altaz(
            &self,
            _epoch: &Epoch,
            _frame: &ReferenceFrame,
            _body: CelestialBody,
        ) -> Result<(Degree, Degree), AlmanacError> {
            Err(AlmanacError::AltAzRequiresSite)
        }

        fn separation(
            &self,
            _epoch: &Epoch,
            _frame: &ReferenceFrame,
            _body_a: CelestialBody,
            _body_b: CelestialBody,
        ) -> Result<Degree, AlmanacError> {
            Ok(0.0)
        }
    }

    #[test]
    fn test_quarter_code() {
        assert_eq!(quarter_code(0.0), 0);
        assert_eq!(quarter_code(89.999), 0);
        assert_eq!(quarter_code(90.0), 1);
        assert_eq!(quarter_code(180.0), 2);
        assert_eq!(quarter_code(359.9), 3);
        assert_eq!(quarter_code(-1.0), 3);
        assert_eq!(quarter_code(-1e-20), 3);
        assert_eq!(quarter_code(450.0), 1);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(phase_name(0).unwrap(), "New Moon");
        assert_eq!(phase_name(2).unwrap(), "Full Moon");
        assert_eq!(phase_name(3).unwrap(), "Last Quarter");
        assert_eq!(phase_name(4), Err(AlmanacError::InvalidPhaseCode(4)));
        assert_eq!(
            AlmanacError::InvalidPhaseCode(7).to_string(),
            "Invalid Moon quarter code: 7, expected 0 to 3"
        );
    }

    #[test]
    fn test_phases_cycle_in_order() {
        let sky = SynodicSky {
            new_moon: Epoch::from_gregorian_utc_hms(2026, 1, 18, 19, 52, 0),
        };
        let tz = parse_timezone("America/Montevideo").unwrap();
        let events = collect_moon_phases(&sky, 2026, &tz, &SearchConfig::moon_phase()).unwrap();

        // 365 / (29.53 / 4) quarters fit in a year.
        assert!(events.len() == 49 || events.len() == 50, "{}", events.len());
        for pair in events.windows(2) {
            let current = PHASE_NAMES.iter().position(|p| *p == pair[0].phase).unwrap();
            let next = PHASE_NAMES.iter().position(|p| *p == pair[1].phase).unwrap();
            assert_eq!(next, (current + 1) % 4);
        }

        let new_moon = events
            .iter()
            .find(|e| e.date == "2026-01-18")
            .expect("new moon of 2026-01-18");
        assert_eq!(new_moon.phase, "New Moon");
        assert!(new_moon.time == "16:51" || new_moon.time == "16:52", "{}", new_moon.time);
    }
}
