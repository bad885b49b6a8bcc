use hifitime::Epoch;

use crate::{
    almanac_errors::AlmanacError,
    constants::Degree,
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
};

/// Signed difference `a - b` of two longitudes, wrapped into `(-180, 180]`.
///
/// The wrap keeps the difference continuous across the 0°/360° seam of the
/// longitudes; the only discontinuity left is at opposition.
pub fn wrap_longitude_difference(a: Degree, b: Degree) -> Degree {
    let wrapped = (a - b + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Moon minus `planet` apparent ecliptic longitude seen from `frame`, in `(-180, 180]`.
pub fn diff<P>(
    provider: &P,
    epoch: &Epoch,
    frame: &ReferenceFrame,
    planet: CelestialBody,
) -> Result<Degree, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    let longitudes = provider.apparent_longitudes(epoch, frame, &[CelestialBody::Moon, planet])?;
    match longitudes.as_slice() {
        [moon, other] => Ok(wrap_longitude_difference(*moon, *other)),
        _ => Err(AlmanacError::DegenerateGeometry(format!(
            "expected 2 longitudes, got {}",
            longitudes.len()
        ))),
    }
}

/// `-|diff|`: maximal, at zero, when the Moon and `planet` share the same longitude.
pub fn neg_abs_diff<P>(
    provider: &P,
    epoch: &Epoch,
    frame: &ReferenceFrame,
    planet: CelestialBody,
) -> Result<Degree, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    Ok(-diff(provider, epoch, frame, planet)?.abs())
}
