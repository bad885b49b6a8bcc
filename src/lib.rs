//! # moon_almanac
//!
//! Yearly calendar of principal Moon phases and Moon-planet alignments for a single
//! observing site, computed from a JPL planetary kernel.
//!
//! * [`jpl_ephem`] reads NAIF SPK kernels such as `de421.bsp`.
//! * [`positions`] turns barycentric states into apparent places, geocentric or
//!   topocentric.
//! * [`search`] scans functions of time for maxima and discrete changes.
//! * [`alignments`] and [`moon_phases`] build the yearly event lists.
//! * [`almanac`] ties everything to a configuration and writes one JSON file per year
//!   through [`dataset`].
pub mod alignments;
pub mod almanac;
pub mod almanac_errors;
pub mod constants;
pub mod dataset;
pub mod earth_orientation;
pub mod jpl_ephem;
pub mod moon_phases;
pub mod observers;
pub mod positions;
pub mod search;
pub mod time;
