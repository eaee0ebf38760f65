//! Numerical integration of ROC curves.

use crate::confusion::RatePair;

/// Trapezoidal AUC: sum of trapezoids between consecutive (x, y) points.
///
/// Assumes `x` is already ordered; widths use `|x[i] - x[i-1]|`.
pub fn trapezoidal_auc(x: &[f64], y: &[f64]) -> f64 {
    let mut auc = 0.0;
    for i in 1..x.len().min(y.len()) {
        auc += (x[i] - x[i - 1]).abs() * (y[i] + y[i - 1]) / 2.0;
    }
    auc
}

/// Area under a ROC curve given as unordered (FPR, TPR) points.
///
/// Points are sorted by FPR ascending, ties by TPR ascending, before the
/// trapezoidal rule is applied, so the input order never matters.
///
/// Returns NaN if any point is undefined or the curve has fewer than two
/// distinct FPR values.
pub fn integrate_curve(points: &[RatePair]) -> f64 {
    if points.iter().any(|p| !p.is_defined()) {
        return f64::NAN;
    }

    let mut sorted = points.to_vec();
    sort_curve(&mut sorted);

    if distinct_fpr(&sorted) < 2 {
        return f64::NAN;
    }

    let fpr: Vec<f64> = sorted.iter().map(|p| p.fpr).collect();
    let tpr: Vec<f64> = sorted.iter().map(|p| p.tpr).collect();
    trapezoidal_auc(&fpr, &tpr)
}

/// Sort points by FPR ascending, breaking ties by TPR ascending.
pub fn sort_curve(points: &mut [RatePair]) {
    points.sort_by(|a, b| a.fpr.total_cmp(&b.fpr).then_with(|| a.tpr.total_cmp(&b.tpr)));
}

/// Number of distinct FPR values in an FPR-sorted curve.
pub(crate) fn distinct_fpr(sorted: &[RatePair]) -> usize {
    let mut count = 0;
    let mut prev: Option<f64> = None;
    for p in sorted {
        if prev != Some(p.fpr) {
            count += 1;
            prev = Some(p.fpr);
        }
    }
    count
}

// ── Tests ──────────────────────────────────────────────────────────────────
