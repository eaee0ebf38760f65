//! Binary (one-vs-rest) confusion counts and the ROC rates derived from them.

use proclam_core::{ProclamError, Result};
use thiserror::Error;

/// 2×2 confusion table for a single (class, threshold) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionCounts {
    /// Predicted positive, actually positive.
    pub true_positives: usize,
    /// Predicted positive, actually negative.
    pub false_positives: usize,
    /// Predicted negative, actually positive.
    pub false_negatives: usize,
    /// Predicted negative, actually negative.
    pub true_negatives: usize,
}

/// A point in ROC space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatePair {
    /// False positive rate: FP / (FP + TN).
    pub fpr: f64,
    /// True positive rate (recall): TP / (TP + FN).
    pub tpr: f64,
}

impl RatePair {
    /// Whether both coordinates are finite.
    pub fn is_defined(&self) -> bool {
        self.fpr.is_finite() && self.tpr.is_finite()
    }
}

/// Why a rate could not be computed from a [`ConfusionCounts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndefinedRate {
    /// FP + TN = 0, so the false positive rate is 0/0.
    #[error("false positive rate is undefined: no negative samples")]
    NoNegatives,
    /// TP + FN = 0, so the true positive rate is 0/0.
    #[error("true positive rate is undefined: no positive samples")]
    NoPositives,
    /// The table is empty.
    #[error("rates are undefined: confusion table is empty")]
    Empty,
}

impl ConfusionCounts {
    /// Tally predicted-positive and actually-positive indicators.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty or have different lengths.
    pub fn from_indicators(predicted: &[bool], actual: &[bool]) -> Result<Self> {
        if predicted.is_empty() {
            return Err(ProclamError::InvalidInput("empty indicator vectors".into()));
        }
        if predicted.len() != actual.len() {
            return Err(ProclamError::InvalidInput(format!(
                "predicted length {} != actual length {}",
                predicted.len(),
                actual.len()
            )));
        }

        let mut cm = Self::default();
        for (&p, &a) in predicted.iter().zip(actual) {
            match (p, a) {
                (true, true) => cm.true_positives += 1,
                (true, false) => cm.false_positives += 1,
                (false, true) => cm.false_negatives += 1,
                (false, false) => cm.true_negatives += 1,
            }
        }
        Ok(cm)
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.false_negatives + self.true_negatives
    }

    /// Number of actual positives (TP + FN).
    pub fn positives(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    /// Number of actual negatives (FP + TN).
    pub fn negatives(&self) -> usize {
        self.false_positives + self.true_negatives
    }

    /// Number of samples predicted positive (TP + FP).
    pub fn predicted_positives(&self) -> usize {
        self.true_positives + self.false_positives
    }

    /// (FPR, TPR) with NaN in any coordinate whose denominator is zero.
    pub fn rates(&self) -> RatePair {
        RatePair {
            fpr: ratio(self.false_positives, self.negatives()),
            tpr: ratio(self.true_positives, self.positives()),
        }
    }

    /// (FPR, TPR), or the reason one of them is 0/0.
    pub fn try_rates(&self) -> std::result::Result<RatePair, UndefinedRate> {
        if self.total() == 0 {
            return Err(UndefinedRate::Empty);
        }
        if self.positives() == 0 {
            return Err(UndefinedRate::NoPositives);
        }
        if self.negatives() == 0 {
            return Err(UndefinedRate::NoNegatives);
        }
        Ok(self.rates())
    }
}

fn ratio(numer: usize, denom: usize) -> f64 {
    if denom == 0 {
        f64::NAN
    } else {
        numer as f64 / denom as f64
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn counts_known() {
        // predicted: [T, T, F, F, T, F]
        // actual:    [T, F, T, F, T, F]
        let predicted = [true, true, false, false, true, false];
        let actual = [true, false, true, false, true, false];
        let cm = ConfusionCounts::from_indicators(&predicted, &actual).unwrap();
        assert_eq!(cm.true_positives, 2);
        assert_eq!(cm.false_positives, 1);
        assert_eq!(cm.false_negatives, 1);
        assert_eq!(cm.true_negatives, 2);
    }

    #[test]
    fn counts_partition_samples() {
        let predicted = [true, false, true, true, false, false, true];
        let actual = [false, false, true, false, true, false, true];
        let cm = ConfusionCounts::from_indicators(&predicted, &actual).unwrap();
        assert_eq!(cm.total(), predicted.len());
        assert_eq!(cm.positives() + cm.negatives(), predicted.len());
    }

    #[test]
    fn rates_known() {
        // TP=2, FP=1, FN=1, TN=3 → FPR=1/4, TPR=2/3
        let cm = ConfusionCounts {
            true_positives: 2,
            false_positives: 1,
            false_negatives: 1,
            true_negatives: 3,
        };
        let r = cm.try_rates().unwrap();
        assert!((r.fpr - 0.25).abs() < TOL);
        assert!((r.tpr - 2.0 / 3.0).abs() < TOL);
        assert!(r.is_defined());
    }

    #[test]
    fn no_negatives_fpr_nan() {
        let cm = ConfusionCounts::from_indicators(&[true, false], &[true, true]).unwrap();
        let r = cm.rates();
        assert!(r.fpr.is_nan());
        assert!((r.tpr - 0.5).abs() < TOL);
        assert!(!r.is_defined());
        assert_eq!(cm.try_rates(), Err(UndefinedRate::NoNegatives));
    }

    #[test]
    fn no_positives_tpr_nan() {
        let cm = ConfusionCounts::from_indicators(&[true, false], &[false, false]).unwrap();
        assert!(cm.rates().tpr.is_nan());
        assert_eq!(cm.try_rates(), Err(UndefinedRate::NoPositives));
    }

    #[test]
    fn empty_table_undefined() {
        let cm = ConfusionCounts::default();
        assert_eq!(cm.try_rates(), Err(UndefinedRate::Empty));
        let r = cm.rates();
        assert!(r.fpr.is_nan() && r.tpr.is_nan());
    }

    #[test]
    fn empty_error() {
        assert!(ConfusionCounts::from_indicators(&[], &[]).is_err());
    }

    #[test]
    fn length_mismatch_error() {
        assert!(ConfusionCounts::from_indicators(&[true, false], &[true]).is_err());
    }
}
