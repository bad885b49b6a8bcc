//! Local maxima of a real function of time.
//!
//! The objective is sampled every `step_days` from one step before the window start
//! to at least one step after its end, so a maximum lying just inside the window is
//! still bracketed by three samples. A sample strictly greater than its left neighbour
//! and not smaller than its right one brackets a maximum in `[x_{i-1}, x_{i+1}]`,
//! which is narrowed by golden-section search until narrower than `tolerance_days`.
//!
//! Refined instants outside `[start, end)` are dropped, which makes consecutive
//! windows partition the maxima: a maximum near a window boundary is reported by the
//! window that contains it and only by that one.
use hifitime::Epoch;
use itertools::Itertools;
use tracing::trace;

use crate::{
    almanac_errors::AlmanacError,
    time::{add_days, days_between},
};

use super::SearchConfig;

/// `1/φ`, the golden-section shrink factor.
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Narrow `[lo, hi]` around the maximum of a unimodal `f`, returning the bracket midpoint.
fn golden_section_max<F>(
    mut f: F,
    lo: f64,
    hi: f64,
    config: &SearchConfig,
) -> Result<f64, AlmanacError>
where
    F: FnMut(f64) -> Result<f64, AlmanacError>,
{
    let (mut a, mut b) = (lo, hi);
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = f(c)?;
    let mut fd = f(d)?;

    for _ in 0..config.max_iterations {
        if b - a < config.tolerance_days {
            return Ok(0.5 * (a + b));
        }
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = f(c)?;
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = f(d)?;
        }
    }

    if b - a < config.tolerance_days {
        Ok(0.5 * (a + b))
    } else {
        Err(AlmanacError::SearchNonConvergence {
            iterations: config.max_iterations,
            width_days: b - a,
        })
    }
}

/// All local maxima of `objective` whose refined instant lies in `[start, end)`.
///
/// Arguments
/// -----------------
/// * `start`, `end`: Window bounds, `start < end`.
/// * `objective`: Function of time to maximize. A non-finite value is an error.
/// * `config`: Grid step, refinement tolerance and iteration cap.
///
/// Return
/// ----------
/// * The refined instants in ascending order, no two closer than the tolerance.
pub fn find_maxima<F>(
    start: &Epoch,
    end: &Epoch,
    mut objective: F,
    config: &SearchConfig,
) -> Result<Vec<Epoch>, AlmanacError>
where
    F: FnMut(&Epoch) -> Result<f64, AlmanacError>,
{
    config.validate()?;
    let span = days_between(start, end);
    if span.is_nan() || span <= 0.0 {
        return Err(AlmanacError::InvalidSearchConfig(format!(
            "empty search window {start} .. {end}"
        )));
    }

    let mut evaluate = |x: f64| -> Result<f64, AlmanacError> {
        let epoch = add_days(start, x);
        let value = objective(&epoch)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AlmanacError::NonFiniteObjective(epoch))
        }
    };

    let n_steps = (span / config.step_days).ceil() as i64;
    let samples = (-1..=n_steps + 1)
        .map(|k| {
            let x = k as f64 * config.step_days;
            evaluate(x).map(|value| (x, value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let brackets: Vec<(f64, f64)> = samples
        .iter()
        .tuple_windows()
        .filter(|((_, left), (_, mid), (_, right))| left < mid && mid >= right)
        .map(|((x_left, _), _, (x_right, _))| (*x_left, *x_right))
        .collect();

    let mut maxima = Vec::with_capacity(brackets.len());
    for (lo, hi) in brackets {
        let x = golden_section_max(&mut evaluate, lo, hi, config)?;
        if (0.0..span).contains(&x) {
            maxima.push(x);
        } else {
            trace!(offset_days = x, "maximum outside the search window dropped");
        }
    }

    maxima.sort_by(f64::total_cmp);
    maxima.dedup_by(|later, earlier| *later - *earlier < config.tolerance_days);

    Ok(maxima.into_iter().map(|x| add_days(start, x)).collect())
}
