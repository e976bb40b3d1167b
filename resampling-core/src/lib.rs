//! Shared primitives for the resampling workspace.
//!
//! `resampling-core` provides the foundation the statistics crate builds on:
//!
//! - **Error types** — [`ResamplingError`] and [`Result`] for structured error handling
//! - **Randomness** — the [`RandomSource`] capability and the seeded [`Xorshift64`] generator
//! - **Traits** — [`Summarizable`] for one-line display of results

pub mod error;
pub mod rng;
pub mod traits;

pub use error::{ResamplingError, Result};
pub use rng::{RandomSource, Xorshift64};
pub use traits::*;
