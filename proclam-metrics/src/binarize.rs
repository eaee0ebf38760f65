//! One-vs-rest binarization of class-probability predictions.
//!
//! Tie policy: a probability is a positive call only when it is **strictly
//! greater** than the threshold. A probability exactly equal to the
//! threshold is negative. AUC is sensitive to this choice, so every metric
//! in this crate goes through these functions.

use proclam_core::{ProbabilityMatrix, ProclamError, Result};

/// Boolean decisions with the same N × K shape as the source predictions.
///
/// Only produced by [`binarize`], so the shape always matches a valid
/// [`ProbabilityMatrix`] (at least one class).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    /// Row-major storage: `decisions[sample * n_classes + class]`.
    decisions: Vec<bool>,
    n_classes: usize,
}

impl BinaryMatrix {
    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Row-major decisions.
    pub fn as_slice(&self) -> &[bool] {
        &self.decisions
    }

    /// Decision for a specific (sample, class) pair.
    #[inline]
    pub fn get(&self, sample: usize, class: usize) -> bool {
        self.decisions[sample * self.n_classes + class]
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.decisions.len() / self.n_classes
    }

    /// Decisions for one class across all samples.
    pub fn column(&self, class: usize) -> Vec<bool> {
        self.decisions
            .iter()
            .skip(class)
            .step_by(self.n_classes)
            .copied()
            .collect()
    }
}

/// Binarize every entry of `predictions` at `threshold`.
///
/// # Errors
///
/// Returns an error if `threshold` is not a finite value in `[0, 1]`.
pub fn binarize(predictions: &ProbabilityMatrix, threshold: f64) -> Result<BinaryMatrix> {
    check_threshold(threshold)?;
    Ok(BinaryMatrix {
        decisions: predictions.as_slice().iter().map(|&p| p > threshold).collect(),
        n_classes: predictions.n_classes(),
    })
}

/// Binarize the `class` column of `predictions` at `threshold`.
///
/// Equivalent to `binarize(predictions, threshold)?.column(class)` without
/// materializing the other columns.
///
/// # Errors
///
/// Returns an error if `threshold` is outside `[0, 1]` or `class` does not
/// index a prediction column.
pub fn binarize_class(
    predictions: &ProbabilityMatrix,
    threshold: f64,
    class: usize,
) -> Result<Vec<bool>> {
    check_threshold(threshold)?;
    check_class(predictions, class)?;
    Ok(predictions.column(class).map(|p| p > threshold).collect())
}

/// One-vs-rest indicator of `truth`: `true` where the label equals `class`.
pub fn one_vs_rest(truth: &[usize], class: usize) -> Vec<bool> {
    truth.iter().map(|&t| t == class).collect()
}

pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ProclamError::InvalidInput(format!(
            "threshold {} is out of range [0, 1]",
            threshold
        )));
    }
    Ok(())
}

pub(crate) fn check_class(predictions: &ProbabilityMatrix, class: usize) -> Result<()> {
    if class >= predictions.n_classes() {
        return Err(ProclamError::InvalidInput(format!(
            "class {} has no prediction column (n_classes = {})",
            class,
            predictions.n_classes()
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────
