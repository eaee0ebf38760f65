//! Class-probability prediction matrices.
//!
//! [`ProbabilityMatrix`] is the N samples × K classes input shared by every
//! metric. Entries are validated once at construction so downstream code can
//! assume finite probabilities in `[0, 1]`. Rows are not required to sum to 1.

use crate::{ProclamError, Result};

/// Row-major matrix of predicted class probabilities.
///
/// Entry `(i, k)` is the predicted probability that sample `i` belongs to
/// class `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMatrix {
    data: Vec<f64>,
    n_samples: usize,
    n_classes: usize,
}

impl ProbabilityMatrix {
    /// Build a matrix from row-major storage with `n_classes` columns.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is empty, `n_classes` is zero, the length
    /// is not a multiple of `n_classes`, or any entry is outside `[0, 1]`.
    pub fn from_flat(data: Vec<f64>, n_classes: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(ProclamError::InvalidInput("empty prediction matrix".into()));
        }
        if n_classes == 0 {
            return Err(ProclamError::InvalidInput("n_classes must be > 0".into()));
        }
        if data.len() % n_classes != 0 {
            return Err(ProclamError::InvalidInput(format!(
                "data length {} not divisible by n_classes {}",
                data.len(),
                n_classes
            )));
        }
        validate_probabilities(&data, n_classes)?;
        Ok(Self {
            n_samples: data.len() / n_classes,
            data,
            n_classes,
        })
    }

    /// Build a matrix from one slice per sample.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, the rows are ragged, or any
    /// entry is outside `[0, 1]`.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| ProclamError::InvalidInput("empty prediction matrix".into()))?;
        let n_classes = first.as_ref().len();
        let mut data = Vec::with_capacity(rows.len() * n_classes);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_classes {
                return Err(ProclamError::InvalidInput(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_classes
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_flat(data, n_classes)
    }

    /// Number of samples (rows).
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of classes (columns).
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Probability that `sample` belongs to `class`.
    #[inline]
    pub fn get(&self, sample: usize, class: usize) -> f64 {
        self.data[sample * self.n_classes + class]
    }

    /// All class probabilities for one sample.
    pub fn row(&self, sample: usize) -> &[f64] {
        let start = sample * self.n_classes;
        &self.data[start..start + self.n_classes]
    }

    /// Probabilities for one class across all samples, in sample order.
    pub fn column(&self, class: usize) -> impl Iterator<Item = f64> + '_ {
        self.data
            .iter()
            .skip(class)
            .step_by(self.n_classes)
            .copied()
    }

    /// Row-major backing storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

fn validate_probabilities(data: &[f64], n_classes: usize) -> Result<()> {
    for (i, &p) in data.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) {
            return Err(ProclamError::InvalidInput(format!(
                "probability at sample {}, class {} is out of range [0, 1]: {}",
                i / n_classes,
                i % n_classes,
                p,
            )));
        }
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_shape() {
        let m = ProbabilityMatrix::from_rows(&[[0.9, 0.1], [0.2, 0.8], [0.5, 0.5]]).unwrap();
        assert_eq!(m.n_samples(), 3);
        assert_eq!(m.n_classes(), 2);
        assert_eq!(m.get(1, 1), 0.8);
        assert_eq!(m.row(2), &[0.5, 0.5]);
    }

    #[test]
    fn column_iterates_samples() {
        let m = ProbabilityMatrix::from_flat(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 3).unwrap();
        let col: Vec<f64> = m.column(1).collect();
        assert_eq!(col, vec![0.2, 0.5]);
    }

    #[test]
    fn rows_need_not_sum_to_one() {
        assert!(ProbabilityMatrix::from_rows(&[[0.9, 0.9], [0.0, 0.0]]).is_ok());
    }

    #[test]
    fn ragged_rows_error() {
        let rows: Vec<Vec<f64>> = vec![vec![0.5, 0.5], vec![1.0]];
        assert!(ProbabilityMatrix::from_rows(&rows).is_err());
    }

    #[test]
    fn out_of_range_error() {
        assert!(ProbabilityMatrix::from_flat(vec![0.5, 1.5], 2).is_err());
        assert!(ProbabilityMatrix::from_flat(vec![-0.1, 0.5], 2).is_err());
        assert!(ProbabilityMatrix::from_flat(vec![f64::NAN, 0.5], 2).is_err());
    }

    #[test]
    fn empty_and_indivisible_error() {
        assert!(ProbabilityMatrix::from_flat(vec![], 2).is_err());
        assert!(ProbabilityMatrix::from_flat(vec![0.5], 0).is_err());
        assert!(ProbabilityMatrix::from_flat(vec![0.5, 0.5, 0.5], 2).is_err());
        let empty: Vec<Vec<f64>> = vec![];
        assert!(ProbabilityMatrix::from_rows(&empty).is_err());
    }
}
