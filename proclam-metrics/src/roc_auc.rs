//! Multi-class (one-vs-rest) area under the ROC curve.
//!
//! For every class label observed in the truth vector, the engine sweeps the
//! configured thresholds, binarizes that class's prediction column at each
//! one, tallies a 2×2 confusion table against the one-vs-rest truth and
//! records the resulting (FPR, TPR) pair. The curve is anchored at (0, 0)
//! and (1, 1), sorted by FPR and integrated with the trapezoidal rule. The
//! per-class AUCs are finally averaged according to an [`AveragingScheme`].
//!
//! Structural problems with the input (shape mismatch, out-of-range
//! probabilities or thresholds, labels without a prediction column) fail
//! before the sweep starts. Numerical degeneracies only affect the class
//! they occur in: its AUC is NaN and a [`Diagnostic`] is attached to the
//! report.

use std::fmt;

use proclam_core::{Metric, ProbabilityMatrix, ProclamError, Result, Summarizable};
use tracing::{debug, warn};

use crate::aggregate::{average, AveragingScheme};
use crate::binarize::{binarize_class, check_class, one_vs_rest};
use crate::confusion::{ConfusionCounts, RatePair, UndefinedRate};
use crate::integrate::integrate_curve;
use crate::thresholds::Thresholds;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`RocAuc`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RocAucConfig {
    /// Thresholds used by [`Metric::score`] (100 evenly spaced by default).
    pub thresholds: Thresholds,
    /// Cross-class averaging policy.
    pub scheme: AveragingScheme,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A single point on a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocPoint {
    /// Threshold that produced this point. The anchors use `+inf` for
    /// (0, 0) and `-inf` for (1, 1).
    pub threshold: f64,
    /// False positive rate: FP / (FP + TN).
    pub fpr: f64,
    /// True positive rate (recall): TP / (TP + FN).
    pub tpr: f64,
}

impl RocPoint {
    fn rates(&self) -> RatePair {
        RatePair {
            fpr: self.fpr,
            tpr: self.tpr,
        }
    }
}

/// One-vs-rest ROC curve for a single class.
#[derive(Debug, Clone)]
pub struct RocCurve {
    /// Class treated as positive.
    pub class: usize,
    /// Points sorted by FPR (ties by TPR). Anchored at (0, 0) and (1, 1)
    /// whenever every swept rate is defined.
    pub points: Vec<RocPoint>,
    /// Area under the curve, NaN if undefined.
    pub auc: f64,
}

/// Why a class's AUC is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegenerateReason {
    /// Every sample carries this class's label.
    NoNegatives,
    /// No sample carries this class's label.
    NoPositives,
    /// No threshold splits the samples: each one predicts all of them
    /// positive or none of them, so the scores carry no rank information.
    NoSeparation,
    /// The curve has fewer than two distinct FPR values.
    SingleFpr,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::NoNegatives => write!(f, "no negative samples"),
            DegenerateReason::NoPositives => write!(f, "no positive samples"),
            DegenerateReason::NoSeparation => write!(f, "no threshold separates the samples"),
            DegenerateReason::SingleFpr => {
                write!(f, "fewer than two distinct false positive rates")
            }
        }
    }
}

/// A non-fatal numerical problem encountered while evaluating one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// A rate was 0/0 at one or more thresholds.
    UndefinedRate {
        class: usize,
        cause: UndefinedRate,
        /// Number of thresholds at which the rate was undefined.
        thresholds: usize,
    },
    /// The class's AUC is NaN.
    DegenerateClass {
        class: usize,
        reason: DegenerateReason,
    },
}

impl Diagnostic {
    /// Class the diagnostic refers to.
    pub fn class(&self) -> usize {
        match *self {
            Diagnostic::UndefinedRate { class, .. } | Diagnostic::DegenerateClass { class, .. } => {
                class
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UndefinedRate {
                class,
                cause,
                thresholds,
            } => write!(f, "class {}: {} at {} threshold(s)", class, cause, thresholds),
            Diagnostic::DegenerateClass { class, reason } => {
                write!(f, "class {}: AUC undefined ({})", class, reason)
            }
        }
    }
}

/// AUC for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassAuc {
    /// Class label (prediction column index).
    pub class: usize,
    /// Area under the one-vs-rest ROC curve, NaN if undefined.
    pub auc: f64,
    /// Samples carrying this label.
    pub n_positive: usize,
    /// Samples carrying any other label.
    pub n_negative: usize,
}

impl ClassAuc {
    /// Whether the AUC is a number.
    pub fn is_defined(&self) -> bool {
        !self.auc.is_nan()
    }
}

/// Result of [`RocAuc::evaluate`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocAucReport {
    /// One entry per distinct label in the truth vector, ascending.
    pub classes: Vec<ClassAuc>,
    /// Average of the defined per-class AUCs under `scheme`; NaN if none
    /// is defined.
    pub aggregate: f64,
    /// Averaging scheme used for `aggregate`.
    pub scheme: AveragingScheme,
    /// Numerical problems, in class order.
    pub diagnostics: Vec<Diagnostic>,
}

impl RocAucReport {
    /// Per-class AUC values in class order.
    pub fn per_class(&self) -> Vec<f64> {
        self.classes.iter().map(|c| c.auc).collect()
    }

    /// AUC of a specific class, if it was present in the truth vector.
    pub fn class_auc(&self, class: usize) -> Option<f64> {
        self.classes.iter().find(|c| c.class == class).map(|c| c.auc)
    }

    /// Number of classes whose AUC is NaN.
    pub fn n_undefined(&self) -> usize {
        self.classes.iter().filter(|c| !c.is_defined()).count()
    }
}

impl Summarizable for RocAucReport {
    fn summary(&self) -> String {
        format!(
            "roc_auc({})={:.4} over {} classes ({} undefined)",
            self.scheme,
            self.aggregate,
            self.classes.len(),
            self.n_undefined(),
        )
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Multi-class ROC AUC metric.
///
/// Stateless: every call to [`RocAuc::evaluate`] is independent and
/// deterministic for identical inputs.
#[derive(Debug, Clone, Default)]
pub struct RocAuc {
    config: RocAucConfig,
}

impl RocAuc {
    /// Create the metric with an optional averaging scheme name
    /// (see [`AveragingScheme::from_name`]).
    ///
    /// # Errors
    ///
    /// Returns an error if `scheme` is not a recognised name.
    pub fn new(scheme: Option<&str>) -> Result<Self> {
        Ok(Self::with_config(RocAucConfig {
            scheme: AveragingScheme::from_name(scheme)?,
            ..RocAucConfig::default()
        }))
    }

    /// Create the metric from an explicit configuration.
    pub fn with_config(config: RocAucConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &RocAucConfig {
        &self.config
    }

    /// Compute per-class and aggregate AUC.
    ///
    /// `thresholds` is either a count of evenly spaced values over `[0, 1]`
    /// or an explicit list (see [`Thresholds`]).
    ///
    /// # Errors
    ///
    /// Returns an error if `truth` and `predictions` disagree on the number
    /// of samples, a label has no prediction column, or the thresholds are
    /// invalid. Degenerate classes are not errors.
    pub fn evaluate(
        &self,
        predictions: &ProbabilityMatrix,
        truth: &[usize],
        thresholds: impl Into<Thresholds>,
    ) -> Result<RocAucReport> {
        let classes = observed_classes(predictions, truth)?;
        let thresholds = thresholds.into().resolve()?;
        debug!(
            n_samples = truth.len(),
            n_classes = classes.len(),
            n_thresholds = thresholds.len(),
            "evaluating ROC AUC"
        );

        #[cfg(feature = "parallel")]
        let sweeps = {
            use rayon::prelude::*;
            classes
                .par_iter()
                .map(|&class| sweep_class(predictions, truth, class, &thresholds))
                .collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let sweeps = classes
            .iter()
            .map(|&class| sweep_class(predictions, truth, class, &thresholds))
            .collect::<Result<Vec<_>>>()?;

        let mut results = Vec::with_capacity(sweeps.len());
        let mut diagnostics = Vec::new();
        for sweep in sweeps {
            results.push(sweep.result);
            diagnostics.extend(sweep.diagnostics);
        }

        let aucs: Vec<f64> = results.iter().map(|c| c.auc).collect();
        let supports: Vec<usize> = results.iter().map(|c| c.n_positive).collect();
        let weights = self.config.scheme.weights(&supports);
        let aggregate = average(&aucs, weights.as_deref())?;
        if aggregate.is_nan() {
            warn!("ROC AUC undefined for every class");
        }

        Ok(RocAucReport {
            classes: results,
            aggregate,
            scheme: self.config.scheme,
            diagnostics,
        })
    }
}

impl Metric for RocAuc {
    fn name(&self) -> &str {
        "roc_auc"
    }

    fn score(&self, predictions: &ProbabilityMatrix, truth: &[usize]) -> Result<f64> {
        Ok(self
            .evaluate(predictions, truth, self.config.thresholds.clone())?
            .aggregate)
    }
}

/// Macro-averaged ROC AUC.
///
/// Shorthand for `RocAuc::default().evaluate(..)?.aggregate`.
pub fn roc_auc(
    predictions: &ProbabilityMatrix,
    truth: &[usize],
    thresholds: impl Into<Thresholds>,
) -> Result<f64> {
    Ok(RocAuc::default()
        .evaluate(predictions, truth, thresholds)?
        .aggregate)
}

/// One-vs-rest ROC curve of a single class.
///
/// `class` need not occur in `truth`; in that case the curve is degenerate
/// and its AUC is NaN.
///
/// # Errors
///
/// Returns an error for a sample-count mismatch, an out-of-range label or
/// class, or invalid thresholds.
pub fn class_roc_curve(
    predictions: &ProbabilityMatrix,
    truth: &[usize],
    class: usize,
    thresholds: impl Into<Thresholds>,
) -> Result<RocCurve> {
    observed_classes(predictions, truth)?;
    check_class(predictions, class)?;
    let thresholds = thresholds.into().resolve()?;
    Ok(sweep_class(predictions, truth, class, &thresholds)?.curve)
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

struct ClassSweep {
    result: ClassAuc,
    curve: RocCurve,
    diagnostics: Vec<Diagnostic>,
}

/// Validate shapes and labels, returning the sorted distinct labels.
fn observed_classes(predictions: &ProbabilityMatrix, truth: &[usize]) -> Result<Vec<usize>> {
    if truth.len() != predictions.n_samples() {
        return Err(ProclamError::InvalidInput(format!(
            "truth length {} != prediction rows {}",
            truth.len(),
            predictions.n_samples()
        )));
    }
    if let Some(&bad) = truth.iter().find(|&&t| t >= predictions.n_classes()) {
        return Err(ProclamError::InvalidInput(format!(
            "truth label {} has no prediction column (n_classes = {})",
            bad,
            predictions.n_classes()
        )));
    }

    let mut classes = truth.to_vec();
    classes.sort_unstable();
    classes.dedup();
    Ok(classes)
}

fn sweep_class(
    predictions: &ProbabilityMatrix,
    truth: &[usize],
    class: usize,
    thresholds: &[f64],
) -> Result<ClassSweep> {
    let actual = one_vs_rest(truth, class);
    let n_positive = actual.iter().filter(|&&a| a).count();
    let n_negative = actual.len() - n_positive;

    let mut points = Vec::with_capacity(thresholds.len() + 2);
    let mut undefined: Option<(UndefinedRate, usize)> = None;
    let mut separated = false;

    for &threshold in thresholds {
        let predicted = binarize_class(predictions, threshold, class)?;
        let cm = ConfusionCounts::from_indicators(&predicted, &actual)?;
        let rates = match cm.try_rates() {
            Ok(rates) => rates,
            Err(cause) => {
                let count = undefined.map_or(0, |(_, n)| n);
                undefined = Some((cause, count + 1));
                cm.rates()
            }
        };
        let called = cm.predicted_positives();
        separated |= called > 0 && called < cm.total();
        points.push(RocPoint {
            threshold,
            fpr: rates.fpr,
            tpr: rates.tpr,
        });
    }

    let mut diagnostics = Vec::new();
    let degenerate = if let Some((cause, count)) = undefined {
        warn!(class, thresholds = count, "{}", cause);
        diagnostics.push(Diagnostic::UndefinedRate {
            class,
            cause,
            thresholds: count,
        });
        Some(match cause {
            UndefinedRate::NoNegatives => DegenerateReason::NoNegatives,
            UndefinedRate::NoPositives | UndefinedRate::Empty => DegenerateReason::NoPositives,
        })
    } else if !separated {
        Some(DegenerateReason::NoSeparation)
    } else {
        points.insert(
            0,
            RocPoint {
                threshold: f64::INFINITY,
                fpr: 0.0,
                tpr: 0.0,
            },
        );
        points.push(RocPoint {
            threshold: f64::NEG_INFINITY,
            fpr: 1.0,
            tpr: 1.0,
        });
        None
    };

    // Stable: the +inf anchor stays ahead of any swept (0, 0) point.
    points.sort_by(|a, b| a.fpr.total_cmp(&b.fpr).then_with(|| a.tpr.total_cmp(&b.tpr)));

    let mut auc = f64::NAN;
    let degenerate = match degenerate {
        Some(reason) => Some(reason),
        None => {
            let rates: Vec<RatePair> = points.iter().map(RocPoint::rates).collect();
            auc = integrate_curve(&rates);
            auc.is_nan().then_some(DegenerateReason::SingleFpr)
        }
    };

    if let Some(reason) = degenerate {
        warn!(class, "ROC AUC undefined: {}", reason);
        diagnostics.push(Diagnostic::DegenerateClass { class, reason });
    } else {
        debug!(class, auc, "class ROC AUC");
    }

    Ok(ClassSweep {
        result: ClassAuc {
            class,
            auc,
            n_positive,
            n_negative,
        },
        curve: RocCurve { class, points, auc },
        diagnostics,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dataset() -> impl Strategy<Value = (usize, Vec<usize>, Vec<f64>)> {
        (2usize..5).prop_flat_map(|k| {
            proptest::collection::vec(0..k, 2..40).prop_flat_map(move |truth| {
                let n = truth.len();
                (
                    Just(k),
                    Just(truth),
                    proptest::collection::vec(0.0f64..=1.0, n * k),
                )
            })
        })
    }

    proptest! {
        #[test]
        fn auc_in_unit_interval_or_nan(
            (k, truth, data) in dataset(),
            count in 1usize..60,
        ) {
            let preds = ProbabilityMatrix::from_flat(data, k).unwrap();
            let report = RocAuc::default().evaluate(&preds, &truth, count).unwrap();
            for auc in report.per_class() {
                prop_assert!(auc.is_nan() || (0.0..=1.0).contains(&auc));
            }
            prop_assert!(report.aggregate.is_nan() || (0.0..=1.0).contains(&report.aggregate));
        }

        #[test]
        fn repeated_evaluation_identical(
            (k, truth, data) in dataset(),
        ) {
            let preds = ProbabilityMatrix::from_flat(data, k).unwrap();
            let metric = RocAuc::default();
            let a = metric.evaluate(&preds, &truth, 25usize).unwrap().per_class();
            let b = metric.evaluate(&preds, &truth, 25usize).unwrap().per_class();
            prop_assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(&b) {
                prop_assert!(x.to_bits() == y.to_bits());
            }
        }

        #[test]
        fn reversed_thresholds_same_auc(
            (k, truth, data) in dataset(),
            count in 2usize..40,
        ) {
            let preds = ProbabilityMatrix::from_flat(data, k).unwrap();
            let forward = crate::thresholds::linspace(count);
            let backward: Vec<f64> = forward.iter().rev().copied().collect();
            let metric = RocAuc::default();
            let a = metric.evaluate(&preds, &truth, forward).unwrap().per_class();
            let b = metric.evaluate(&preds, &truth, backward).unwrap().per_class();
            for (x, y) in a.iter().zip(&b) {
                prop_assert!((x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-12);
            }
        }

        #[test]
        fn counts_partition_every_threshold(
            (k, truth, data) in dataset(),
            threshold in 0.0f64..=1.0,
        ) {
            let preds = ProbabilityMatrix::from_flat(data, k).unwrap();
            let predicted = binarize_class(&preds, threshold, 0).unwrap();
            let cm = ConfusionCounts::from_indicators(&predicted, &one_vs_rest(&truth, 0)).unwrap();
            prop_assert_eq!(cm.total(), truth.len());
        }
    }
}
