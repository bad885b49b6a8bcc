//! Coarse-scan searches over functions of time.
//!
//! Both searches sample the function on a regular grid over a window, then refine
//! what the grid brackets:
//!
//! * [`extremum::find_maxima`] refines local maxima of a real function by
//!   golden-section narrowing;
//! * [`discrete::find_discrete`] refines the instants where an integer-valued
//!   function changes value by bisection.
//!
//! The grid step, the refinement tolerance and the iteration cap come from a
//! [`SearchConfig`].
pub mod discrete;
pub mod extremum;

use crate::almanac_errors::AlmanacError;

/// Sampling and convergence parameters of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Grid step, in days.
    pub step_days: f64,
    /// Width, in days, under which a refined bracket is accepted.
    pub tolerance_days: f64,
    /// Refinement steps allowed per bracket.
    pub max_iterations: usize,
}

impl SearchConfig {
    /// Alignment search: one sample every 0.1 day, refined to one minute.
    pub fn alignment() -> Self {
        SearchConfig {
            step_days: 0.1,
            tolerance_days: 1.0 / 1440.0,
            max_iterations: 100,
        }
    }

    /// Moon phase search: daily samples, refined to one minute.
    pub fn moon_phase() -> Self {
        SearchConfig {
            step_days: 1.0,
            tolerance_days: 1.0 / 1440.0,
            max_iterations: 100,
        }
    }

    pub fn validate(&self) -> Result<(), AlmanacError> {
        let invalid = |msg: String| Err(AlmanacError::InvalidSearchConfig(msg));

        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return invalid(format!("step_days must be positive, got {}", self.step_days));
        }
        if !self.tolerance_days.is_finite() || self.tolerance_days <= 0.0 {
            return invalid(format!(
                "tolerance_days must be positive, got {}",
                self.tolerance_days
            ));
        }
        if self.tolerance_days >= self.step_days {
            return invalid(format!(
                "tolerance_days ({}) must be smaller than step_days ({})",
                self.tolerance_days, self.step_days
            ));
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::alignment()
    }
}
