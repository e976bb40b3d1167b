//! Bootstrap resampling and interval estimation.
//!
//! - **Estimators** — [`estimator::Proportion`], [`estimator::Mean`], or any
//!   closure returning `Result<f64>`
//! - **Resampling** — [`resample::resample_once`] and the repeated
//!   [`resample::resample_and_evaluate`] harness, with a pluggable
//!   [`resample::Resampler`]
//! - **Summaries** — mean, variance and percentile interval via
//!   [`summary::summarize`], plus [`summary::bias`]
//! - **Driver** — [`bootstrap::Bootstrap`] runs all of the above from a
//!   [`bootstrap::BootstrapConfig`]

pub mod bootstrap;
pub mod estimator;
pub mod resample;
pub mod summary;

pub use bootstrap::{Bootstrap, BootstrapConfig, BootstrapResult};
pub use estimator::{Estimator, Mean, Proportion};
pub use resample::{
    repetitions, resample_and_evaluate, resample_and_evaluate_with, resample_once, Resampler,
    WithReplacement,
};
pub use summary::{bias, percentile, summarize, BootstrapSummary, DEFAULT_CONFIDENCE};

#[cfg(feature = "parallel")]
pub use resample::{resample_and_evaluate_par, resample_and_evaluate_par_with};
