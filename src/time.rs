//! Time scales, civil time zones and sidereal time.
//!
//! Instants are carried as [`hifitime::Epoch`] everywhere in the crate. This module is
//! the boundary with the civil world: yearly search windows in UTC, conversion of
//! instants to local `YYYY-MM-DD` / `HH:MM` strings through [`chrono_tz`], and the
//! reverse conversion from a local wall-clock reading. It also hosts the Greenwich
//! mean sidereal time used by the Earth rotation model.
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use hifitime::{Duration, Epoch};

use crate::{
    almanac_errors::AlmanacError,
    constants::{DAYS_PER_JULIAN_CENTURY, DPI, MJD, SECONDS_PER_DAY, SIDEREAL_RATE, T2000},
};

/// Resolve an IANA time zone name such as `"America/Montevideo"`.
pub fn parse_timezone(name: &str) -> Result<Tz, AlmanacError> {
    name.parse::<Tz>()
        .map_err(|e| AlmanacError::InvalidTimeZone(format!("{name}: {e}")))
}

/// Half-open search window `[Jan 1 00:00 UTC, next Jan 1 00:00 UTC)` of a calendar year.
pub fn year_bounds(year: i32) -> (Epoch, Epoch) {
    (
        Epoch::from_gregorian_utc_at_midnight(year, 1, 1),
        Epoch::from_gregorian_utc_at_midnight(year + 1, 1, 1),
    )
}

/// Shift an epoch by a (possibly fractional) number of days.
pub fn add_days(epoch: &Epoch, days: f64) -> Epoch {
    *epoch + Duration::from_seconds(days * SECONDS_PER_DAY)
}

/// Signed number of days from `start` to `end`.
pub fn days_between(start: &Epoch, end: &Epoch) -> f64 {
    (*end - *start).to_seconds() / SECONDS_PER_DAY
}

/// Convert an epoch to a UTC [`DateTime`].
///
/// The calendar decomposition is done by hifitime, so leap seconds are accounted for
/// before handing the broken-down time to chrono.
pub fn epoch_to_utc(epoch: &Epoch) -> Result<DateTime<Utc>, AlmanacError> {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .and_then(|date| {
            date.and_hms_nano_opt(hour as u32, minute as u32, second.min(59) as u32, nanos)
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AlmanacError::DateConversion(format!("{epoch} has no UTC representation")))
}

/// Local civil date and time of an epoch, formatted as `("YYYY-MM-DD", "HH:MM")`.
///
/// Seconds are truncated, not rounded, so an event at 00:17:59 local is reported
/// at `"00:17"`.
pub fn format_local(epoch: &Epoch, tz: &Tz) -> Result<(String, String), AlmanacError> {
    let local = epoch_to_utc(epoch)?.with_timezone(tz);
    Ok((
        local.format("%Y-%m-%d").to_string(),
        local.format("%H:%M").to_string(),
    ))
}

/// Convert a local wall-clock reading in `tz` to an epoch.
///
/// Ambiguous or skipped local times (DST transitions) are rejected.
pub fn local_to_epoch(
    tz: &Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<Epoch, AlmanacError> {
    let local = tz
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            AlmanacError::DateConversion(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02} is not a unique local time in {tz}"
            ))
        })?;
    let utc = local.with_timezone(&Utc);

    Ok(Epoch::from_gregorian_utc(
        utc.year(),
        utc.month() as u8,
        utc.day() as u8,
        utc.hour() as u8,
        utc.minute() as u8,
        utc.second() as u8,
        utc.nanosecond(),
    ))
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians.
///
/// IAU 1982 expression of GMST at 0h UT1, advanced by the sidereal rate over the
/// fraction of the day.
///
/// Arguments
/// -----------------
/// * `tjm`: Modified Julian Date in the UT1 scale.
///
/// Return
/// ----------
/// * GMST in radians, normalized to `[0, 2π)`.
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;

    let h = tjm.fract() * DPI;
    (gmst0 + h * SIDEREAL_RATE).rem_euclid(DPI)
}
