//! Summary statistics over a bootstrap distribution.
//!
//! [`summarize`] reduces the values produced by the resampling harness to a
//! mean, a population variance and a two-sided percentile interval.
//! [`bias`] compares the distribution mean with the point estimate from the
//! original data.

use resampling_core::{ResamplingError, Result, Summarizable};

/// Default two-sided confidence level for percentile intervals.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Mean, spread and percentile interval of a bootstrap distribution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapSummary {
    /// Number of values summarised.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance (ddof=0).
    pub variance: f64,
    /// Lower percentile bound, at `(1 - confidence) / 2`.
    pub lower: f64,
    /// Upper percentile bound, at `1 - (1 - confidence) / 2`.
    pub upper: f64,
    /// Confidence level the bounds were computed for.
    pub confidence: f64,
}

impl BootstrapSummary {
    /// Bootstrap standard error (square root of the variance).
    pub fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Width of the percentile interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the closed interval `[lower, upper]`.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl Summarizable for BootstrapSummary {
    fn summary(&self) -> String {
        format!(
            "n={}, mean={:.4}, var={:.4}, {:.0}% CI=[{:.4}, {:.4}]",
            self.count,
            self.mean,
            self.variance,
            self.confidence * 100.0,
            self.lower,
            self.upper,
        )
    }
}

/// Summarise a bootstrap distribution at the given confidence level.
///
/// The interval is the percentile pair `[(1 - c)/2, 1 - (1 - c)/2]`; at the
/// default `c = 0.95` that is the 2.5th and 97.5th percentiles. Percentiles
/// interpolate linearly between order statistics.
///
/// # Errors
///
/// Returns [`ResamplingError::EmptyInput`] if `distribution` is empty, and
/// [`ResamplingError::InvalidInput`] if `confidence` is not strictly inside
/// `(0, 1)`.
///
/// # Example
///
/// ```
/// use resampling_stats::summary::summarize;
///
/// let dist: Vec<f64> = (0..=100).map(|i| i as f64).collect();
/// let s = summarize(&dist, 0.9).unwrap();
/// assert_eq!(s.mean, 50.0);
/// assert!((s.lower - 5.0).abs() < 1e-10);
/// assert!((s.upper - 95.0).abs() < 1e-10);
/// ```
pub fn summarize(distribution: &[f64], confidence: f64) -> Result<BootstrapSummary> {
    if distribution.is_empty() {
        return Err(ResamplingError::EmptyInput(
            "summarize: distribution must not be empty".into(),
        ));
    }
    check_confidence(confidence)?;

    let n = distribution.len();
    let mut sorted = distribution.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (mean, variance) = mean_and_variance(&sorted);

    let alpha = (1.0 - confidence) / 2.0;
    let lower = quantile_sorted(&sorted, alpha);
    let upper = quantile_sorted(&sorted, 1.0 - alpha);

    Ok(BootstrapSummary {
        count: n,
        mean,
        variance,
        lower,
        upper,
        confidence,
    })
}

/// Bootstrap bias estimate: distribution mean minus the point estimate.
pub fn bias(distribution_mean: f64, point_estimate: f64) -> f64 {
    distribution_mean - point_estimate
}

/// The `q`-th quantile of `data` (`q` in `[0, 1]`), linearly interpolated.
///
/// # Errors
///
/// Returns an error if `data` is empty or `q` is outside `[0, 1]`.
pub fn percentile(data: &[f64], q: f64) -> Result<f64> {
    if data.is_empty() {
        return Err(ResamplingError::EmptyInput(
            "percentile: data must not be empty".into(),
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(ResamplingError::InvalidInput(format!(
            "percentile: q must be in [0, 1], got {}",
            q
        )));
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(quantile_sorted(&sorted, q))
}

pub(crate) fn check_confidence(confidence: f64) -> Result<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(ResamplingError::InvalidInput(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )))
    }
}

// ── Internal ───────────────────────────────────────────────────────────────

/// Mean and population variance of a non-empty slice.
///
/// Values are divided by a power of two near the largest magnitude before
/// summing, so sums of large finite values do not overflow. The division is
/// exact for every value that is not vanishingly small next to the maximum.
fn mean_and_variance(data: &[f64]) -> (f64, f64) {
    let n_f = data.len() as f64;
    let max_abs = data.iter().fold(0.0f64, |m, &x| m.max(x.abs()));
    let scale = if max_abs > 1.0 && max_abs.is_finite() {
        2f64.powi(max_abs.log2().floor().min(1023.0) as i32)
    } else {
        1.0
    };

    let mean = data.iter().map(|&x| x / scale).sum::<f64>() / n_f;
    let ss = data.iter().map(|&x| (x / scale - mean).powi(2)).sum::<f64>() / n_f;
    (mean * scale, ss * scale * scale)
}

/// Quantile of a pre-sorted, non-empty slice at rank `q * (n - 1)`.
///
/// Interpolates between the order statistics either side of the rank. A
/// rank at or past the last index (only `q == 1`) returns the maximum
/// directly, since there is no upper neighbour to blend with.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let pos = q * last as f64;
    let lo = pos.floor() as usize;
    if lo >= last {
        return sorted[last];
    }
    let frac = pos - lo as f64;
    if frac == 0.0 {
        return sorted[lo];
    }
    sorted[lo] * (1.0 - frac) + sorted[lo + 1] * frac
}

// ── Tests ──────────────────────────────────────────────────────────────────
