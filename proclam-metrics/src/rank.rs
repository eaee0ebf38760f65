//! Threshold-free AUC from ranks (Mann-Whitney U).
//!
//! The swept estimate in [`crate::roc_auc`] converges to this value as the
//! number of thresholds grows, so it doubles as the analytic reference.

use proclam_core::{ProclamError, Result};
use tracing::warn;

use crate::binarize::check_threshold;

/// Exact ROC AUC of `scores` against binary `labels`.
///
/// Computes `U / (n_pos * n_neg)` where `U` is the Mann-Whitney statistic
/// of the positive scores. Tied scores receive the average of their ranks,
/// so each positive/negative tie contributes one half.
///
/// Returns NaN (with a warning) if either class is absent.
///
/// # Errors
///
/// Returns an error if the slices are empty, have different lengths, or
/// any score is not finite.
pub fn rank_auc(scores: &[f64], labels: &[bool]) -> Result<f64> {
    validate(scores, labels)?;

    let n_pos = labels.iter().filter(|&&l| l).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        warn!(n_pos, n_neg, "rank AUC undefined: only one class present");
        return Ok(f64::NAN);
    }

    let ranks = average_ranks(scores);
    let pos_rank_sum: f64 = ranks
        .iter()
        .zip(labels)
        .filter_map(|(&r, &l)| l.then_some(r))
        .sum();

    let p = n_pos as f64;
    let u = pos_rank_sum - p * (p + 1.0) / 2.0;
    Ok(u / (p * n_neg as f64))
}

/// Rank AUC restricted to samples scored strictly above `pthresh`.
///
/// Uses the same tie policy as [`crate::binarize`]: a score equal to
/// `pthresh` is excluded. Returns NaN (with a warning) if the retained
/// samples do not contain both classes.
///
/// # Errors
///
/// Returns an error for the same inputs as [`rank_auc`], or if `pthresh`
/// is outside `[0, 1]`.
pub fn rank_auc_above(scores: &[f64], labels: &[bool], pthresh: f64) -> Result<f64> {
    validate(scores, labels)?;
    check_threshold(pthresh)?;

    let (kept_scores, kept_labels): (Vec<f64>, Vec<bool>) = scores
        .iter()
        .zip(labels)
        .filter(|(s, _)| **s > pthresh)
        .map(|(&s, &l)| (s, l))
        .unzip();

    let n_pos = kept_labels.iter().filter(|&&l| l).count();
    if n_pos == 0 || n_pos == kept_labels.len() {
        warn!(
            pthresh,
            retained = kept_labels.len(),
            "rank AUC undefined: at most one class above threshold"
        );
        return Ok(f64::NAN);
    }
    rank_auc(&kept_scores, &kept_labels)
}

fn validate(scores: &[f64], labels: &[bool]) -> Result<()> {
    if scores.is_empty() {
        return Err(ProclamError::InvalidInput("empty input".into()));
    }
    if scores.len() != labels.len() {
        return Err(ProclamError::InvalidInput(format!(
            "scores length {} != labels length {}",
            scores.len(),
            labels.len()
        )));
    }
    if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
        return Err(ProclamError::InvalidInput(format!(
            "score at index {} is not finite: {}",
            i, scores[i]
        )));
    }
    Ok(())
}

/// 1-based ranks with ties assigned the average of their would-be ranks.
fn average_ranks(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    let mut indexed: Vec<(f64, usize)> = data
        .iter()
        .copied()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();
    indexed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && indexed[j].0.total_cmp(&indexed[i].0).is_eq() {
            j += 1;
        }
        // Ranks (i+1)..=j share their mean.
        let rank_val = (i + 1 + j) as f64 / 2.0;
        for item in &indexed[i..j] {
            ranks[item.1] = rank_val;
        }
        i = j;
    }
    ranks
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn average_ranks_with_ties() {
        assert_eq!(average_ranks(&[3.0, 1.0, 2.0, 2.0]), vec![4.0, 1.0, 2.5, 2.5]);
    }

    #[test]
    fn perfect_separation() {
        let auc = rank_auc(&[0.9, 0.8, 0.3, 0.1], &[true, true, false, false]).unwrap();
        assert!((auc - 1.0).abs() < TOL);
    }

    #[test]
    fn inverted_separation() {
        let auc = rank_auc(&[0.1, 0.2, 0.8, 0.9], &[true, true, false, false]).unwrap();
        assert!(auc.abs() < TOL);
    }

    #[test]
    fn interleaved_known() {
        // Pairs (pos, neg): (0.9,0.7) (0.9,0.3) (0.5,0.7) (0.5,0.3) → 3 of 4 won
        let auc = rank_auc(&[0.9, 0.7, 0.5, 0.3], &[true, false, true, false]).unwrap();
        assert!((auc - 0.75).abs() < TOL);
    }

    #[test]
    fn all_tied_is_half() {
        let auc = rank_auc(&[0.5; 4], &[true, true, false, false]).unwrap();
        assert!((auc - 0.5).abs() < TOL);
    }

    #[test]
    fn single_class_is_nan() {
        assert!(rank_auc(&[0.2, 0.4], &[true, true]).unwrap().is_nan());
        assert!(rank_auc(&[0.2, 0.4], &[false, false]).unwrap().is_nan());
    }

    #[test]
    fn invalid_input_error() {
        assert!(rank_auc(&[], &[]).is_err());
        assert!(rank_auc(&[0.1, 0.2], &[true]).is_err());
    }

    #[test]
    fn non_finite_score_error() {
        assert!(matches!(
            rank_auc(&[f64::NAN, 0.1, 0.2], &[true, false, false]),
            Err(ProclamError::InvalidInput(_))
        ));
        assert!(rank_auc(&[f64::INFINITY, 0.1], &[true, false]).is_err());
        assert!(rank_auc_above(&[f64::NAN, 0.9, 0.8], &[true, false, true], 0.5).is_err());
    }

    // ── Above-threshold subset ──────────────────────────────────

    #[test]
    fn above_threshold_scores_subset() {
        // Kept (> 0.4): (0.9,T) (0.7,F) (0.5,T) → pairs won: 0.9>0.7 only → 1/2
        // 0.4 (F) is excluded by the strict tie policy, 0.3 and 0.1 are below.
        let scores = [0.9, 0.7, 0.5, 0.4, 0.3, 0.1];
        let labels = [true, false, true, false, true, false];
        let auc = rank_auc_above(&scores, &labels, 0.4).unwrap();
        assert!((auc - 0.5).abs() < TOL);
        let full = rank_auc(&scores, &labels).unwrap();
        assert!((full - auc).abs() > 0.01);
    }

    #[test]
    fn above_zero_threshold_matches_full() {
        let scores = [0.9, 0.7, 0.5, 0.3];
        let labels = [true, false, true, false];
        let above = rank_auc_above(&scores, &labels, 0.0).unwrap();
        assert!((above - rank_auc(&scores, &labels).unwrap()).abs() < TOL);
    }

    #[test]
    fn above_threshold_one_class_left_is_nan() {
        let scores = [0.9, 0.8, 0.3, 0.1];
        let labels = [true, true, false, false];
        assert!(rank_auc_above(&scores, &labels, 0.5).unwrap().is_nan());
        // Nothing above the threshold at all.
        assert!(rank_auc_above(&scores, &labels, 0.95).unwrap().is_nan());
    }

    #[test]
    fn above_threshold_invalid_pthresh_error() {
        assert!(rank_auc_above(&[0.2, 0.4], &[true, false], 1.5).is_err());
        assert!(rank_auc_above(&[0.2, 0.4], &[true, false], f64::NAN).is_err());
    }
}
