//! Shared primitives, traits, and utilities for the proclam classifier
//! benchmarking toolkit.
//!
//! `proclam-core` provides the foundation that the metric crates build on:
//!
//! - **Error types** — [`ProclamError`] and [`Result`] for structured error handling
//! - **Prediction matrices** — [`ProbabilityMatrix`], validated N × K class probabilities
//! - **Traits** — [`Metric`] and [`Summarizable`]

pub mod error;
pub mod matrix;
pub mod traits;

pub use error::{ProclamError, Result};
pub use matrix::ProbabilityMatrix;
pub use traits::*;
