//! Confirmation of conjunction candidates.
//!
//! A local maximum of `-|diff|` is not necessarily a conjunction: when the Moon and a
//! planet approach and then recede without meeting, `|diff|` still has a minimum.
//! Candidates are accepted only when the longitude difference is within
//! [`CONJUNCTION_TOLERANCE_DEG`].
use hifitime::Epoch;
use tracing::{trace, warn};

use crate::{
    almanac_errors::AlmanacError,
    constants::{Degree, CONJUNCTION_TOLERANCE_DEG, SEPARATION_SENTINEL_DEG},
    positions::{CelestialBody, PositionProvider, ReferenceFrame},
};

use super::angular_difference::diff;

/// Measurements of an accepted conjunction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjunctionCheck {
    /// True Moon-planet angular separation, or [`SEPARATION_SENTINEL_DEG`] when it
    /// could not be computed.
    pub separation_degrees: Degree,
    /// Signed longitude difference at the candidate instant.
    pub longitude_diff_degrees: Degree,
}

/// Whether a longitude difference is close enough to zero to be a conjunction.
pub fn within_conjunction_tolerance(longitude_diff: Degree) -> bool {
    longitude_diff.abs() <= CONJUNCTION_TOLERANCE_DEG
}

/// Check a candidate instant.
///
/// Return
/// ----------
/// * `Ok(None)` when the candidate is not a conjunction.
/// * `Ok(Some(check))` otherwise. A failing separation never fails the call; it is
///   replaced by [`SEPARATION_SENTINEL_DEG`].
/// * `Err` when the longitude difference itself cannot be computed.
pub fn validate<P>(
    provider: &P,
    epoch: &Epoch,
    frame: &ReferenceFrame,
    planet: CelestialBody,
) -> Result<Option<ConjunctionCheck>, AlmanacError>
where
    P: PositionProvider + ?Sized,
{
    let longitude_diff = diff(provider, epoch, frame, planet)?;
    if !within_conjunction_tolerance(longitude_diff) {
        trace!(%epoch, %planet, longitude_diff, "candidate rejected");
        return Ok(None);
    }

    let separation = provider
        .separation(epoch, frame, CelestialBody::Moon, planet)
        .unwrap_or_else(|err| {
            warn!(
                %epoch,
                %planet,
                frame = frame.label(),
                error = %err,
                sentinel = SEPARATION_SENTINEL_DEG,
                "separation unavailable, using the sentinel value"
            );
            SEPARATION_SENTINEL_DEG
        });

    Ok(Some(ConjunctionCheck {
        separation_degrees: separation,
        longitude_diff_degrees: longitude_diff,
    }))
}
