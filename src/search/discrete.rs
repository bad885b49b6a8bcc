//! Change instants of an integer-valued function of time.
//!
//! The oracle is sampled every `step_days` over `[start, end]`; each pair of
//! neighbouring samples with different codes is bisected until the bracket is
//! narrower than `tolerance_days`. The step must be short enough that the code
//! changes at most once between two samples.
use hifitime::Epoch;
use itertools::Itertools;

use crate::{
    almanac_errors::AlmanacError,
    time::{add_days, days_between},
};

use super::SearchConfig;

/// Instants at which `oracle` changes value inside `[start, end)`, with the new codes.
///
/// Return
/// ----------
/// * `(instants, codes)`, two vectors of equal length in ascending time order.
pub fn find_discrete<F>(
    start: &Epoch,
    end: &Epoch,
    mut oracle: F,
    config: &SearchConfig,
) -> Result<(Vec<Epoch>, Vec<u8>), AlmanacError>
where
    F: FnMut(&Epoch) -> Result<u8, AlmanacError>,
{
    config.validate()?;
    let span = days_between(start, end);
    if span.is_nan() || span <= 0.0 {
        return Err(AlmanacError::InvalidSearchConfig(format!(
            "empty search window {start} .. {end}"
        )));
    }

    let mut code_at = |x: f64| oracle(&add_days(start, x));

    let n_steps = (span / config.step_days).ceil() as i64;
    let samples = (0..=n_steps)
        .map(|k| {
            let x = (k as f64 * config.step_days).min(span);
            code_at(x).map(|code| (x, code))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut instants = Vec::new();
    let mut codes = Vec::new();

    for ((mut lo, code_lo), (mut hi, code_hi)) in samples.into_iter().tuple_windows() {
        if code_lo == code_hi {
            continue;
        }

        let mut iterations = 0;
        while hi - lo >= config.tolerance_days {
            if iterations == config.max_iterations {
                return Err(AlmanacError::SearchNonConvergence {
                    iterations,
                    width_days: hi - lo,
                });
            }
            let mid = 0.5 * (lo + hi);
            if code_at(mid)? == code_lo {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }

        let x = 0.5 * (lo + hi);
        if x < span {
            instants.push(add_days(start, x));
            codes.push(code_hi);
        }
    }

    Ok((instants, codes))
}
