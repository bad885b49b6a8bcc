//! Yearly alignment lists.
//!
//! For each planet of [`CelestialBody::ALIGNMENT_PLANETS`], the collector searches the
//! maxima of `-|diff|` over the year, keeps the candidates that pass the
//! [`validate`](super::validator::validate) check and the [`is_night`] gate, and turns
//! them into [`AlignmentEvent`]s in the site's civil time zone.
use chrono_tz::Tz;
use hifitime::Epoch;
use tracing::{debug, info};

use crate::{
    almanac_errors::AlmanacError,
    constants::Degree,
    dataset::{sort_chronologically, AlignmentEvent, Alignments},
    observers::Observer,
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
    search::{extremum::find_maxima, SearchConfig},
    time::{format_local, year_bounds},
};

use super::{angular_difference::neg_abs_diff, night_gate::is_night, validator::validate};

/// Round `value` to `decimals` decimal places.
///
/// Ties on `value * 10^decimals` go away from zero (`f64::round`), so an exact
/// `0.125` becomes `0.13` where a correctly rounded half-even rule gives `0.12`.
/// Inexact decimal inputs may land on either side of the tie.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Human readable line shown by the calendar.
pub fn describe_alignment(planet: CelestialBody, separation: Degree) -> String {
    format!("Moon and {planet} aligned (sep: {separation:.1}°)")
}

pub struct AlignmentCollector<'a, P: PositionProvider + ?Sized> {
    provider: &'a P,
    site: &'a Observer,
    tz: Tz,
    config: SearchConfig,
}

impl<'a, P: PositionProvider + ?Sized> AlignmentCollector<'a, P> {
    pub fn new(provider: &'a P, site: &'a Observer, tz: Tz, config: SearchConfig) -> Self {
        AlignmentCollector {
            provider,
            site,
            tz,
            config,
        }
    }

    /// Night-time alignments of one planet, seen from `frame`, within `[start, end)`.
    ///
    /// Events come out in ascending time order.
    pub fn collect_planet_between(
        &self,
        start: &Epoch,
        end: &Epoch,
        frame: &ReferenceFrame,
        planet: CelestialBody,
    ) -> Result<Vec<AlignmentEvent>, AlmanacError> {
        let candidates = find_maxima(
            start,
            end,
            |t| neg_abs_diff(self.provider, t, frame, planet),
            &self.config,
        )?;
        debug!(%planet, frame = frame.label(), candidates = candidates.len(), "extrema found");

        let mut events = Vec::new();
        for candidate in candidates {
            let Some(check) = validate(self.provider, &candidate, frame, planet)? else {
                continue;
            };
            if !is_night(self.provider, &candidate, self.site)? {
                debug!(%candidate, %planet, "alignment during daylight or twilight");
                continue;
            }

            let (date, time) = format_local(&candidate, &self.tz)?;
            events.push(AlignmentEvent {
                date,
                time,
                planet: planet.name().to_string(),
                degrees: round_to(check.separation_degrees, 2),
                longitude_diff: round_to(check.longitude_diff_degrees.abs(), 4),
                description: describe_alignment(planet, check.separation_degrees),
            });
        }
        Ok(events)
    }

    /// Night-time alignments of one planet during the calendar year `year`.
    pub fn collect_planet(
        &self,
        year: i32,
        frame: &ReferenceFrame,
        planet: CelestialBody,
    ) -> Result<Vec<AlignmentEvent>, AlmanacError> {
        let (start, end) = year_bounds(year);
        self.collect_planet_between(&start, &end, frame, planet)
    }

    /// All planets for one frame, sorted by local date and time.
    pub fn collect_frame(
        &self,
        year: i32,
        frame: &ReferenceFrame,
    ) -> Result<Vec<AlignmentEvent>, AlmanacError> {
        let mut events = Vec::new();
        for planet in CelestialBody::ALIGNMENT_PLANETS {
            info!(year, frame = frame.label(), %planet, "searching alignments");
            let found = self.collect_planet(year, frame, planet)?;
            info!(year, frame = frame.label(), %planet, found = found.len(), "alignments kept");
            events.extend(found);
        }
        sort_chronologically(&mut events);
        Ok(events)
    }

    /// Geocentric and topocentric lists of `year`.
    pub fn collect_year(&self, year: i32) -> Result<Alignments, AlmanacError> {
        let geocentric = self.collect_frame(year, &ReferenceFrame::Geocentric)?;
        let topocentric =
            self.collect_frame(year, &ReferenceFrame::Topocentric(self.site.clone()))?;
        Ok(Alignments {
            geocentric,
            topocentric,
        })
    }
}
