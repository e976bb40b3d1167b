//! Configured bootstrap runs.
//!
//! [`Bootstrap`] ties the pieces together: it computes the point estimate on
//! the observed data, draws [`BootstrapConfig::n_resamples`] resamples from a
//! seeded [`Xorshift64`], and summarises the resulting distribution.

use log::debug;
use resampling_core::{ResamplingError, Result, Summarizable, Xorshift64};

use crate::estimator::Estimator;
use crate::resample::resample_and_evaluate;
use crate::summary::{bias, check_confidence, summarize, BootstrapSummary, DEFAULT_CONFIDENCE};

/// Parameters for a bootstrap run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BootstrapConfig {
    /// Number of resamples to draw.
    pub n_resamples: usize,
    /// Two-sided confidence level of the percentile interval.
    pub confidence: f64,
    /// Seed for the random source.
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_resamples: 1000,
            confidence: DEFAULT_CONFIDENCE,
            seed: 42,
        }
    }
}

impl BootstrapConfig {
    /// Set the number of resamples.
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        self.n_resamples = n_resamples;
        self
    }

    /// Set the confidence level.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration can produce a summary.
    ///
    /// # Errors
    ///
    /// Returns [`ResamplingError::InvalidInput`] if `n_resamples` is zero or
    /// `confidence` is not strictly inside `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.n_resamples == 0 {
            return Err(ResamplingError::InvalidInput(
                "n_resamples must be > 0".into(),
            ));
        }
        check_confidence(self.confidence)
    }
}

/// Outcome of a bootstrap run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapResult {
    /// Estimator applied once to the observed data.
    pub point_estimate: f64,
    /// Estimator value for each resample, in draw order.
    pub distribution: Vec<f64>,
    /// Mean, variance and percentile interval of `distribution`.
    pub summary: BootstrapSummary,
    /// `summary.mean - point_estimate`.
    pub bias: f64,
    /// Bootstrap standard error.
    pub std_error: f64,
}

impl Summarizable for BootstrapResult {
    fn summary(&self) -> String {
        format!(
            "estimate={:.4}, bias={:.4}, se={:.4}, {}",
            self.point_estimate,
            self.bias,
            self.std_error,
            self.summary.summary(),
        )
    }
}

/// A bootstrap runner bound to one configuration.
///
/// # Example
///
/// ```
/// use resampling_stats::bootstrap::{Bootstrap, BootstrapConfig};
/// use resampling_stats::estimator::Proportion;
///
/// let flips = ["H", "H", "T", "H", "T", "H", "H", "T"];
/// let boot = Bootstrap::new(BootstrapConfig::default().with_resamples(500)).unwrap();
/// let result = boot.run(&flips, &Proportion::new("H")).unwrap();
/// assert_eq!(result.point_estimate, 0.625);
/// assert_eq!(result.distribution.len(), 500);
/// assert!(result.summary.lower <= result.summary.upper);
/// ```
#[derive(Debug, Clone)]
pub struct Bootstrap {
    config: BootstrapConfig,
}

impl Bootstrap {
    /// Create a runner after validating `config`.
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run the bootstrap for `estimator` on `data`.
    ///
    /// # Errors
    ///
    /// Propagates estimator errors, including
    /// [`ResamplingError::EmptyInput`] for empty `data`.
    pub fn run<T, E>(&self, data: &[T], estimator: &E) -> Result<BootstrapResult>
    where
        T: Clone,
        E: Estimator<T> + ?Sized,
    {
        let point_estimate = estimator.estimate(data)?;
        debug!(
            "bootstrap: n={}, resamples={}, seed={}, point_estimate={}",
            data.len(),
            self.config.n_resamples,
            self.config.seed,
            point_estimate
        );

        let mut rng = Xorshift64::new(self.config.seed);
        let distribution =
            resample_and_evaluate(data, estimator, self.config.n_resamples, &mut rng)?;
        self.finish(point_estimate, distribution)
    }

    /// Parallel [`run`](Self::run), drawing one random stream per resample.
    ///
    /// Results are reproducible for a given seed but differ from the
    /// sequential run's.
    #[cfg(feature = "parallel")]
    pub fn run_par<T, E>(&self, data: &[T], estimator: &E) -> Result<BootstrapResult>
    where
        T: Clone + Sync,
        E: Estimator<T> + Sync + ?Sized,
    {
        let point_estimate = estimator.estimate(data)?;
        debug!(
            "bootstrap (parallel): n={}, resamples={}, seed={}, point_estimate={}",
            data.len(),
            self.config.n_resamples,
            self.config.seed,
            point_estimate
        );

        let distribution = crate::resample::resample_and_evaluate_par(
            data,
            estimator,
            self.config.n_resamples,
            self.config.seed,
        )?;
        self.finish(point_estimate, distribution)
    }

    fn finish(&self, point_estimate: f64, distribution: Vec<f64>) -> Result<BootstrapResult> {
        let summary = summarize(&distribution, self.config.confidence)?;
        let result = BootstrapResult {
            point_estimate,
            bias: bias(summary.mean, point_estimate),
            std_error: summary.std_error(),
            distribution,
            summary,
        };
        debug!("bootstrap: {}", result.summary());
        Ok(result)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
