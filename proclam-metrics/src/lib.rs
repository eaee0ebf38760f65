//! Classifier evaluation metrics for the proclam benchmarking toolkit.
//!
//! - **Binarization** — one-vs-rest decisions at a probability threshold
//! - **Confusion counts** — 2×2 tables and the (FPR, TPR) rates they imply
//! - **Thresholds** — evenly spaced or explicit sweep grids
//! - **Integration** — trapezoidal area under FPR-sorted curves, rank-based AUC
//! - **ROC AUC** — per-class and averaged multi-class area under the ROC curve

pub mod aggregate;
pub mod binarize;
pub mod confusion;
pub mod integrate;
pub mod rank;
pub mod roc_auc;
pub mod thresholds;

pub use aggregate::{average, AveragingScheme};
pub use binarize::{binarize, binarize_class, one_vs_rest, BinaryMatrix};
pub use confusion::{ConfusionCounts, RatePair, UndefinedRate};
pub use integrate::{integrate_curve, trapezoidal_auc};
pub use rank::{rank_auc, rank_auc_above};
pub use roc_auc::{
    class_roc_curve, roc_auc, ClassAuc, DegenerateReason, Diagnostic, RocAuc, RocAucConfig,
    RocAucReport, RocCurve, RocPoint,
};
pub use thresholds::Thresholds;
