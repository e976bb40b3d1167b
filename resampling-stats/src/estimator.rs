//! Point estimators over observation sequences.
//!
//! An [`Estimator`] maps a borrowed sequence to a single real number. Two are
//! provided:
//!
//! - [`Proportion`] — fraction of observations equal to a target label
//! - [`Mean`] — arithmetic mean of numeric observations
//!
//! Any closure `Fn(&[T]) -> Result<f64>` is an estimator as well, so callers
//! can plug ad-hoc statistics straight into the resampling harness.

use resampling_core::{ResamplingError, Result};

/// A pure function from an observation sequence to a real number.
///
/// Implementations must be deterministic: the same `data` always yields the
/// same result.
pub trait Estimator<T> {
    /// Evaluate the estimator on `data`.
    fn estimate(&self, data: &[T]) -> Result<f64>;
}

impl<T, F> Estimator<T> for F
where
    F: Fn(&[T]) -> Result<f64>,
{
    fn estimate(&self, data: &[T]) -> Result<f64> {
        self(data)
    }
}

/// Fraction of observations equal to a designated target label.
///
/// # Example
///
/// ```
/// use resampling_stats::estimator::{Estimator, Proportion};
///
/// let heads = Proportion::new("H");
/// assert_eq!(heads.estimate(&["H", "H", "H", "T"]).unwrap(), 0.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Proportion<T> {
    target: T,
}

impl<T> Proportion<T> {
    /// Count observations equal to `target`.
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// The label being counted.
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: PartialEq> Estimator<T> for Proportion<T> {
    /// # Errors
    ///
    /// Returns [`ResamplingError::EmptyInput`] if `data` is empty. The ratio
    /// is undefined there and reporting `0.0` would read as "no target seen".
    fn estimate(&self, data: &[T]) -> Result<f64> {
        if data.is_empty() {
            return Err(ResamplingError::EmptyInput(
                "proportion: data must not be empty".into(),
            ));
        }
        let hits = data.iter().filter(|x| **x == self.target).count();
        Ok(hits as f64 / data.len() as f64)
    }
}

/// Arithmetic mean of numeric observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mean;

impl Estimator<f64> for Mean {
    fn estimate(&self, data: &[f64]) -> Result<f64> {
        if data.is_empty() {
            return Err(ResamplingError::EmptyInput(
                "mean: data must not be empty".into(),
            ));
        }
        Ok(data.iter().sum::<f64>() / data.len() as f64)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
