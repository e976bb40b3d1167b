//! Structured error types for resampling operations.

use thiserror::Error;

/// Unified error type for all resampling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResamplingError {
    /// An estimator or summary that needs at least one observation got none.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A repetition count or resample length was negative.
    #[error("invalid repetition count: {0} (must be >= 0)")]
    InvalidRepetitionCount(i64),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the resampling crates.
pub type Result<T> = std::result::Result<T, ResamplingError>;
