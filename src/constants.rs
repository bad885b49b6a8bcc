//! # Constants and type definitions for moon_almanac
//!
//! This module centralizes the **physical constants**, **conversion factors**, the
//! **decision thresholds** of the alignment pipeline and the common type aliases used
//! throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (Earth ellipsoid, speed of light, J2000 epoch)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, arcseconds ↔ radians)
//! - Thresholds applied when validating alignments and gating them by night
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Astronomical unit in kilometers
pub const AU: f64 = 149_597_870.7;

/// Modified Julian Date of the J2000 epoch (2000-01-01 12:00 TT)
pub const T2000: f64 = 51544.5;

/// Offset between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees to radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds to radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Equatorial radius of the Earth (WGS84), in meters
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Polar radius of the Earth (WGS84), in meters
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Equatorial radius of the Earth, in kilometers
pub const EARTH_RADIUS_KM: f64 = EARTH_MAJOR_AXIS / 1000.;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Ratio between the sidereal and the solar day
pub const SIDEREAL_RATE: f64 = 1.00273790934;

/// Earth rotation rate in rad/s
pub const EARTH_ROTATION_RATE: f64 = DPI * SIDEREAL_RATE / SECONDS_PER_DAY;

/// Mean obliquity of the ecliptic at J2000 (IAU 1976), in arcseconds
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84381.448;

// -------------------------------------------------------------------------------------------------
// Alignment pipeline thresholds
// -------------------------------------------------------------------------------------------------

/// Largest |Moon − planet| ecliptic longitude difference, in degrees, for which a
/// candidate extremum is accepted as a true conjunction.
pub const CONJUNCTION_TOLERANCE_DEG: f64 = 1.0;

/// Sun altitude, in degrees, below which the site is considered dark enough.
/// The comparison is strict: an altitude of exactly this value is not night.
pub const TWILIGHT_ALTITUDE_DEG: f64 = -6.0;

/// Separation reported, in degrees, when the Moon-planet separation cannot be
/// computed for an otherwise accepted conjunction.
pub const SEPARATION_SENTINEL_DEG: f64 = 999.9;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

pub type Degree = f64;
pub type ArcSec = f64;
pub type Radian = f64;
pub type Kilometer = f64;
pub type Meter = f64;
pub type MJD = f64;
