//! Structured error types for the proclam toolkit.

use thiserror::Error;

/// Unified error type for all proclam operations.
#[derive(Debug, Error)]
pub enum ProclamError {
    /// Invalid input (shape mismatch, out-of-range values, empty arrays)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parse error (unknown scheme names and similar configuration strings)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience alias used throughout the proclam crates.
pub type Result<T> = std::result::Result<T, ProclamError>;
