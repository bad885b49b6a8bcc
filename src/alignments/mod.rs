//! Moon-planet alignments.
//!
//! An alignment is an instant where the Moon and a planet share the same apparent
//! ecliptic longitude, seen from the Earth's centre or from the observing site, while
//! the Sun is below the twilight threshold at the site.
pub mod angular_difference;
pub mod collector;
pub mod inspect;
pub mod night_gate;
pub mod validator;
