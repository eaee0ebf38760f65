//! Decision-threshold sets for ROC sweeps.
//!
//! A sweep is configured either with a number of evenly spaced thresholds
//! over `[0, 1]` or with an explicit list. [`Thresholds::resolve`] turns
//! either form into the concrete list once, before any sweep begins.

use proclam_core::{ProclamError, Result};
use tracing::debug;

use crate::binarize::check_threshold;

/// Number of evenly spaced thresholds used when none are given.
pub const DEFAULT_THRESHOLD_COUNT: usize = 100;

/// Threshold set for a ROC sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Thresholds {
    /// `n` evenly spaced values spanning `[0, 1]` inclusive.
    Count(usize),
    /// Caller-supplied values in `[0, 1]`, used in the given order.
    Explicit(Vec<f64>),
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::Count(DEFAULT_THRESHOLD_COUNT)
    }
}

impl From<usize> for Thresholds {
    fn from(n: usize) -> Self {
        Thresholds::Count(n)
    }
}

impl From<Vec<f64>> for Thresholds {
    fn from(values: Vec<f64>) -> Self {
        Thresholds::Explicit(values)
    }
}

impl From<&[f64]> for Thresholds {
    fn from(values: &[f64]) -> Self {
        Thresholds::Explicit(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Thresholds {
    fn from(values: [f64; N]) -> Self {
        Thresholds::Explicit(values.to_vec())
    }
}

impl Thresholds {
    /// Produce the concrete threshold list.
    ///
    /// Explicit lists are not sorted; the curve integrator sorts by FPR, so
    /// the order only affects the order of reported curve points.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero count, an empty explicit list, or any
    /// explicit value outside `[0, 1]`.
    pub fn resolve(&self) -> Result<Vec<f64>> {
        match self {
            Thresholds::Count(0) => Err(ProclamError::InvalidInput(
                "threshold count must be > 0".into(),
            )),
            Thresholds::Count(n) => Ok(linspace(*n)),
            Thresholds::Explicit(values) => {
                if values.is_empty() {
                    return Err(ProclamError::InvalidInput("empty threshold list".into()));
                }
                for &t in values {
                    check_threshold(t)?;
                }
                if values.windows(2).any(|w| w[1] < w[0]) {
                    debug!(
                        "explicit thresholds are not non-decreasing ({} values)",
                        values.len()
                    );
                }
                Ok(values.clone())
            }
        }
    }
}

/// `n` evenly spaced values from 0 to 1 inclusive. `linspace(1) == [0.0]`.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = (n - 1) as f64;
            (0..n).map(|i| i as f64 / step).collect()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
