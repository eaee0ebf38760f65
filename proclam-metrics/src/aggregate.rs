//! Cross-class aggregation of per-class scores.

use std::fmt;
use std::str::FromStr;

use proclam_core::{ProclamError, Result};

/// Weighting policy used to reduce per-class AUCs to a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AveragingScheme {
    /// Every class counts equally (unweighted mean).
    #[default]
    Macro,
    /// Classes are weighted by how many samples carry their label.
    Weighted,
}

impl AveragingScheme {
    /// Parse the optional scheme name given to a metric constructor.
    ///
    /// `None` selects [`AveragingScheme::Macro`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognised name.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        name.map_or(Ok(Self::Macro), |s| s.parse())
    }

    /// Per-class weights for the given class supports, or `None` for an
    /// unweighted mean.
    pub fn weights(&self, supports: &[usize]) -> Option<Vec<f64>> {
        match self {
            AveragingScheme::Macro => None,
            AveragingScheme::Weighted => Some(supports.iter().map(|&s| s as f64).collect()),
        }
    }
}

impl FromStr for AveragingScheme {
    type Err = ProclamError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "macro" | "equal" | "unweighted" => Ok(Self::Macro),
            "weighted" | "frequency" | "support" => Ok(Self::Weighted),
            other => Err(ProclamError::Parse(format!(
                "unknown averaging scheme '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AveragingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AveragingScheme::Macro => write!(f, "macro"),
            AveragingScheme::Weighted => write!(f, "weighted"),
        }
    }
}

/// Weighted mean of the finite entries of `values`.
///
/// NaN entries (undefined per-class scores) are skipped together with their
/// weights. Equal weights are used when `weights` is `None`. Returns NaN if
/// no finite value carries positive weight.
///
/// # Errors
///
/// Returns an error if `values` is empty, the lengths differ, or any weight
/// is negative or non-finite.
pub fn average(values: &[f64], weights: Option<&[f64]>) -> Result<f64> {
    if values.is_empty() {
        return Err(ProclamError::InvalidInput("average of empty values".into()));
    }
    if let Some(w) = weights {
        if w.len() != values.len() {
            return Err(ProclamError::InvalidInput(format!(
                "values length {} != weights length {}",
                values.len(),
                w.len()
            )));
        }
        if let Some(bad) = w.iter().find(|&&x| !x.is_finite() || x < 0.0) {
            return Err(ProclamError::InvalidInput(format!(
                "weights must be finite and non-negative, got {}",
                bad
            )));
        }
    }

    let mut sum = 0.0;
    let mut total_weight = 0.0;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        let w = weights.map_or(1.0, |w| w[i]);
        sum += w * v;
        total_weight += w;
    }

    if total_weight == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(sum / total_weight)
}

// ── Tests ──────────────────────────────────────────────────────────────────
