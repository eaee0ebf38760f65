//! Core trait definitions for the proclam toolkit.
//!
//! Every classifier-evaluation metric implements [`Metric`] so benchmarking
//! harnesses can run them side by side.

use crate::matrix::ProbabilityMatrix;

/// A scalar evaluation metric over class-probability predictions.
pub trait Metric {
    /// Short machine-readable name (e.g. `"roc_auc"`).
    fn name(&self) -> &str;

    /// Score `predictions` against integer `truth` labels.
    ///
    /// A NaN score means the metric is undefined for this input; structural
    /// problems with the input are reported as errors instead.
    fn score(&self, predictions: &ProbabilityMatrix, truth: &[usize]) -> crate::Result<f64>;
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
