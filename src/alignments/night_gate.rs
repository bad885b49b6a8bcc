use hifitime::Epoch;

use crate::{
    almanac_errors::AlmanacError,
    constants::{Degree, TWILIGHT_ALTITUDE_DEG},
    observers::Observer,
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
};

/// Strictly below the twilight threshold: exactly -6° is still twilight.
pub fn is_below_twilight(sun_altitude: Degree) -> bool {
    sun_altitude < TWILIGHT_ALTITUDE_DEG
}

/// Whether the Sun is below the twilight threshold at `site`.
///
/// The Sun is always observed from the site, whatever frame the alignment was found in.
pub fn is_night<P>(provider: &P, epoch: &Epoch, site: &Observer) -> Result<bool, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    let frame = ReferenceFrame::Topocentric(site.clone());
    let (altitude, _) = provider.apparent_altaz(epoch, &frame, CelestialBody::Sun)?;
    Ok(is_below_twilight(altitude))
}

#[cfg(test)]
mod test_night_gate {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_below_twilight(-5.999));
        assert!(!is_below_twilight(-6.0));
        assert!(is_below_twilight(-6.001));
        assert!(is_below_twilight(-45.0));
        assert!(!is_below_twilight(12.0));
    }
}
