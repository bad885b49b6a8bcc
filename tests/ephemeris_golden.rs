mod common;

use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use moon_almanac::{
    alignments::{angular_difference::neg_abs_diff, validator::validate},
    jpl_ephem::naif::naif_ids::{NaifIds, Planet},
    moon_phases::{find_moon_phases, PHASE_NAMES},
    positions::{apparent::EphemerisPositions, CelestialBody, PositionProvider, ReferenceFrame},
    search::{extremum::find_maxima, SearchConfig},
    time::days_between,
};

#[test]
fn test_de421_coverage() {
    let Some(ephem) = common::de421() else {
        return;
    };
    let data = ephem.naif_data();
    assert!(data.has_target(NaifIds::Moon));
    assert!(data.has_target(NaifIds::PlanetMassCenter(Planet::Earth)));
    assert!(data.has_target(NaifIds::PlanetaryBary(Planet::Jupiter)));

    // Earth-Moon distance stays within the lunar perigee/apogee range.
    let epoch = Epoch::from_gregorian_utc_at_midnight(2026, 6, 1);
    let moon = ephem.ssb_state(NaifIds::Moon, &epoch).unwrap();
    let earth = ephem.earth_ssb_state(&epoch).unwrap();
    let distance = (moon.position - earth.position).norm();
    assert!(distance > 356_000.0 && distance < 407_000.0, "{distance}");

    // About 1 km/s of lunar orbital speed.
    let speed = (moon.velocity - earth.velocity).norm();
    assert_abs_diff_eq!(speed, 1.02, epsilon = 0.1);
}

#[test]
fn test_january_2024_moon_phases() {
    let Some(ephem) = common::de421() else {
        return;
    };
    let positions = EphemerisPositions::new(&ephem);
    let start = Epoch::from_gregorian_utc_at_midnight(2024, 1, 1);
    let end = Epoch::from_gregorian_utc_at_midnight(2024, 2, 1);
    let (instants, codes) =
        find_moon_phases(&positions, &start, &end, &SearchConfig::moon_phase()).unwrap();

    let expected = [
        (Epoch::from_gregorian_utc_hms(2024, 1, 11, 11, 57, 0), "New Moon"),
        (Epoch::from_gregorian_utc_hms(2024, 1, 25, 17, 54, 0), "Full Moon"),
    ];
    for (reference, name) in expected {
        let found = instants
            .iter()
            .zip(&codes)
            .find(|(_, code)| PHASE_NAMES[**code as usize] == name)
            .map(|(instant, _)| *instant)
            .unwrap_or_else(|| panic!("no {name} in January 2024"));
        let hours = days_between(&reference, &found).abs() * 24.0;
        assert!(hours < 2.0, "{name} off by {hours} h");
    }
}

#[test]
fn test_moon_jupiter_conjunction_january_2026() {
    let Some(ephem) = common::de421() else {
        return;
    };
    let positions = EphemerisPositions::new(&ephem);
    let frame = ReferenceFrame::Geocentric;
    let start = Epoch::from_gregorian_utc_at_midnight(2026, 1, 27);
    let end = Epoch::from_gregorian_utc_at_midnight(2026, 2, 4);

    let candidates = find_maxima(
        &start,
        &end,
        |t| neg_abs_diff(&positions, t, &frame, CelestialBody::Jupiter),
        &SearchConfig::alignment(),
    )
    .unwrap();

    let conjunctions: Vec<_> = candidates
        .iter()
        .filter_map(|t| {
            validate(&positions, t, &frame, CelestialBody::Jupiter)
                .unwrap()
                .map(|check| (*t, check))
        })
        .collect();
    assert_eq!(conjunctions.len(), 1, "{conjunctions:?}");

    let (instant, check) = conjunctions[0];
    let window_start = Epoch::from_gregorian_utc_at_midnight(2026, 1, 30);
    let offset = days_between(&window_start, &instant);
    assert!((0.0..2.0).contains(&offset), "{instant}");
    assert!(check.longitude_diff_degrees.abs() < 0.01);
    assert!(check.separation_degrees < 6.0);

    let separation = positions
        .separation(&instant, &frame, CelestialBody::Moon, CelestialBody::Jupiter)
        .unwrap();
    assert_abs_diff_eq!(separation, check.separation_degrees, epsilon = 1e-9);
}
