//! Resampling with replacement and the resample-and-evaluate harness.
//!
//! - [`resample_once`] — one bootstrap resample of the same length as the input
//! - [`Resampler`] — the pluggable resampling step; [`WithReplacement`] is the
//!   standard bootstrap draw
//! - [`resample_and_evaluate`] — apply an estimator to many independent resamples
//! - [`resample_and_evaluate_with`] — the same harness with a caller-supplied resampler
//! - [`resample_and_evaluate_par`] — spread over rayon workers with one random
//!   stream per replicate (requires the `parallel` feature)
//! - [`repetitions`] — checked conversion of a signed repetition count

use resampling_core::{RandomSource, ResamplingError, Result};

#[cfg(feature = "parallel")]
use resampling_core::Xorshift64;

use crate::estimator::Estimator;

/// Produces one resample of `data` into a reusable buffer.
///
/// The harness hands back the previous resample in `buf`, so implementations
/// must overwrite it completely. Any closure `Fn(&[T], &mut Vec<T>, &mut R)`
/// is a resampler.
pub trait Resampler<T, R: ?Sized> {
    /// Replace the contents of `buf` with a resample of `data`.
    fn resample_into(&self, data: &[T], buf: &mut Vec<T>, rng: &mut R);
}

impl<T, R, F> Resampler<T, R> for F
where
    R: ?Sized,
    F: Fn(&[T], &mut Vec<T>, &mut R),
{
    fn resample_into(&self, data: &[T], buf: &mut Vec<T>, rng: &mut R) {
        self(data, buf, rng)
    }
}

/// Uniform sampling with replacement, keeping the input length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithReplacement;

impl<T, R> Resampler<T, R> for WithReplacement
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    fn resample_into(&self, data: &[T], buf: &mut Vec<T>, rng: &mut R) {
        let n = data.len();
        buf.clear();
        buf.extend((0..n).map(|_| data[rng.next_index(n)].clone()));
    }
}

/// Draw one resample of `data` with replacement.
///
/// The output has the same length as `data`; each element is picked
/// independently and uniformly from the input, so an element may appear
/// several times or not at all. An empty input gives an empty output.
///
/// # Example
///
/// ```
/// use resampling_core::Xorshift64;
/// use resampling_stats::resample::resample_once;
///
/// let mut rng = Xorshift64::new(42);
/// let r = resample_once(&["A", "B"], &mut rng);
/// assert_eq!(r.len(), 2);
/// ```
pub fn resample_once<T, R>(data: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: RandomSource + ?Sized,
{
    let mut out = Vec::with_capacity(data.len());
    WithReplacement.resample_into(data, &mut out, rng);
    out
}

/// Evaluate `estimator` on `count` independent resamples of `data`.
///
/// The i-th value of the result is the estimator applied to the i-th
/// resample drawn from `rng` by [`WithReplacement`]. With `count == 0` the
/// estimator is never called and the result is empty.
///
/// # Errors
///
/// Propagates the first error returned by `estimator`, e.g.
/// [`ResamplingError::EmptyInput`] when `data` is empty and the estimator
/// needs at least one observation.
///
/// # Example
///
/// ```
/// use resampling_core::Xorshift64;
/// use resampling_stats::estimator::Proportion;
/// use resampling_stats::resample::resample_and_evaluate;
///
/// let flips = ["H", "T", "H", "H", "T"];
/// let mut rng = Xorshift64::new(42);
/// let dist = resample_and_evaluate(&flips, &Proportion::new("H"), 200, &mut rng).unwrap();
/// assert_eq!(dist.len(), 200);
/// ```
pub fn resample_and_evaluate<T, E, R>(
    data: &[T],
    estimator: &E,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    T: Clone,
    E: Estimator<T> + ?Sized,
    R: RandomSource + ?Sized,
{
    resample_and_evaluate_with(data, &WithReplacement, estimator, count, rng)
}

/// [`resample_and_evaluate`] with a caller-supplied resampler.
///
/// # Errors
///
/// Propagates the first error returned by `estimator`.
pub fn resample_and_evaluate_with<T, S, E, R>(
    data: &[T],
    resampler: &S,
    estimator: &E,
    count: usize,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    S: Resampler<T, R> + ?Sized,
    E: Estimator<T> + ?Sized,
    R: ?Sized,
{
    let mut buf = Vec::with_capacity(data.len());
    let mut results = Vec::with_capacity(count);

    for _ in 0..count {
        resampler.resample_into(data, &mut buf, rng);
        results.push(estimator.estimate(&buf)?);
    }

    Ok(results)
}

/// Parallel [`resample_and_evaluate`].
///
/// Replicate `i` draws from its own [`Xorshift64::for_stream`]`(seed, i)`, so
/// the output depends only on `seed` and not on how rayon splits the work.
/// It is not the same sequence the sequential harness produces for `seed`.
///
/// # Errors
///
/// Propagates an estimator error, as the sequential version does.
#[cfg(feature = "parallel")]
pub fn resample_and_evaluate_par<T, E>(
    data: &[T],
    estimator: &E,
    count: usize,
    seed: u64,
) -> Result<Vec<f64>>
where
    T: Clone + Sync,
    E: Estimator<T> + Sync + ?Sized,
{
    resample_and_evaluate_par_with(data, &WithReplacement, estimator, count, seed)
}

/// Parallel [`resample_and_evaluate_with`].
///
/// # Errors
///
/// Propagates an estimator error.
#[cfg(feature = "parallel")]
pub fn resample_and_evaluate_par_with<T, S, E>(
    data: &[T],
    resampler: &S,
    estimator: &E,
    count: usize,
    seed: u64,
) -> Result<Vec<f64>>
where
    T: Sync,
    S: Resampler<T, Xorshift64> + Sync + ?Sized,
    E: Estimator<T> + Sync + ?Sized,
{
    use rayon::prelude::*;

    (0..count)
        .into_par_iter()
        .map_init(
            || Vec::with_capacity(data.len()),
            |buf, i| {
                let mut rng = Xorshift64::for_stream(seed, i as u64);
                resampler.resample_into(data, buf, &mut rng);
                estimator.estimate(buf)
            },
        )
        .collect()
}

/// Convert a signed repetition count into a `usize`.
///
/// Counts arriving from loosely typed sources (bindings, parsed settings) go
/// through here before reaching the harness.
///
/// # Errors
///
/// Returns [`ResamplingError::InvalidRepetitionCount`] if `n` is negative.
pub fn repetitions(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| ResamplingError::InvalidRepetitionCount(n))
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{Mean, Proportion};
    use resampling_core::Xorshift64;
    use std::cell::Cell;

    #[test]
    fn resample_preserves_length_and_values() {
        let data = ["H", "T", "T", "H", "H"];
        let mut rng = Xorshift64::new(3);
        let r = resample_once(&data, &mut rng);
        assert_eq!(r.len(), data.len());
        for x in &r {
            assert!(data.contains(x));
        }
    }

    #[test]
    fn resample_empty_is_empty() {
        let data: [u32; 0] = [];
        let mut rng = Xorshift64::new(3);
        assert!(resample_once(&data, &mut rng).is_empty());
    }

    #[test]
    fn resample_does_not_mutate_input() {
        let data = vec![1, 2, 3, 4];
        let mut rng = Xorshift64::new(11);
        let _ = resample_once(&data, &mut rng);
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn resample_reproducible_with_seed() {
        let data = ["A", "B"];
        let first = resample_once(&data, &mut Xorshift64::new(42));
        let second = resample_once(&data, &mut Xorshift64::new(42));
        assert_eq!(first, second);
    }

    #[test]
    fn resample_draws_with_replacement() {
        // 20 distinct values: a resample almost surely repeats something.
        let data: Vec<u32> = (0..20).collect();
        let mut rng = Xorshift64::new(8);
        let mut r = resample_once(&data, &mut rng);
        r.sort_unstable();
        r.dedup();
        assert!(r.len() < data.len());
    }

    #[test]
    fn evaluate_returns_exact_count() {
        let data = ["H", "T", "H"];
        let mut rng = Xorshift64::new(1);
        for n in [1, 7, 100] {
            let dist = resample_and_evaluate(&data, &Proportion::new("H"), n, &mut rng).unwrap();
            assert_eq!(dist.len(), n);
        }
    }

    #[test]
    fn evaluate_zero_count_never_calls_estimator() {
        let calls = Cell::new(0usize);
        let counting = |d: &[f64]| -> Result<f64> {
            calls.set(calls.get() + 1);
            Mean.estimate(d)
        };
        let mut rng = Xorshift64::new(1);
        let dist = resample_and_evaluate(&[1.0, 2.0], &counting, 0, &mut rng).unwrap();
        assert!(dist.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn evaluate_calls_estimator_once_per_resample() {
        let calls = Cell::new(0usize);
        let counting = |d: &[f64]| -> Result<f64> {
            calls.set(calls.get() + 1);
            Mean.estimate(d)
        };
        let mut rng = Xorshift64::new(1);
        resample_and_evaluate(&[1.0, 2.0], &counting, 25, &mut rng).unwrap();
        assert_eq!(calls.get(), 25);
    }

    #[test]
    fn evaluate_binary_mean_in_unit_interval() {
        let data = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let mut rng = Xorshift64::new(42);
        let dist = resample_and_evaluate(&data, &Mean, 10, &mut rng).unwrap();
        assert_eq!(dist.len(), 10);
        for &v in &dist {
            assert!((0.0..=1.0).contains(&v), "mean {} out of [0,1]", v);
        }
    }

    #[test]
    fn evaluate_binary_mean_converges_to_half() {
        let data = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let mut rng = Xorshift64::new(2024);
        let dist = resample_and_evaluate(&data, &Mean, 10_000, &mut rng).unwrap();
        let avg = dist.iter().sum::<f64>() / dist.len() as f64;
        // Each resample mean has sd ~0.177; the average of 10k has sd ~0.0018.
        assert!((avg - 0.5).abs() < 0.01, "average bootstrap mean {}", avg);
    }

    #[test]
    fn evaluate_reproducible_with_seed() {
        let data = [1.0, 5.0, 2.0, 8.0, 3.0];
        let a = resample_and_evaluate(&data, &Mean, 50, &mut Xorshift64::new(9)).unwrap();
        let b = resample_and_evaluate(&data, &Mean, 50, &mut Xorshift64::new(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn evaluate_empty_input_propagates_estimator_error() {
        let data: [&str; 0] = [];
        let mut rng = Xorshift64::new(1);
        let err = resample_and_evaluate(&data, &Proportion::new("H"), 5, &mut rng).unwrap_err();
        assert!(matches!(err, ResamplingError::EmptyInput(_)));
    }

    #[test]
    fn evaluate_empty_input_zero_count_is_ok() {
        let data: [&str; 0] = [];
        let mut rng = Xorshift64::new(1);
        let dist = resample_and_evaluate(&data, &Proportion::new("H"), 0, &mut rng).unwrap();
        assert!(dist.is_empty());
    }

    #[test]
    fn evaluate_accepts_trait_object() {
        let est: &dyn Estimator<f64> = &Mean;
        let mut rng = Xorshift64::new(4);
        let dist = resample_and_evaluate(&[1.0, 2.0, 3.0], est, 3, &mut rng).unwrap();
        assert_eq!(dist.len(), 3);
    }

    #[test]
    fn repetitions_rejects_negative() {
        assert_eq!(repetitions(0).unwrap(), 0);
        assert_eq!(repetitions(1000).unwrap(), 1000);
        assert_eq!(
            repetitions(-1).unwrap_err(),
            ResamplingError::InvalidRepetitionCount(-1)
        );
    }

    #[test]
    fn evaluate_with_uses_supplied_resampler() {
        let calls = Cell::new(0usize);
        let identity = |d: &[f64], buf: &mut Vec<f64>, _rng: &mut Xorshift64| {
            calls.set(calls.get() + 1);
            buf.clear();
            buf.extend_from_slice(d);
        };
        let data = [1.0, 2.0, 3.0, 6.0];
        let mut rng = Xorshift64::new(5);
        let dist = resample_and_evaluate_with(&data, &identity, &Mean, 20, &mut rng).unwrap();
        assert_eq!(calls.get(), 20);
        assert_eq!(dist, vec![3.0; 20]);
        // The identity resampler never touches the generator.
        assert_eq!(rng, Xorshift64::new(5));
    }

    #[test]
    fn evaluate_with_default_matches_plain_harness() {
        let data = [1.0, 5.0, 2.0, 8.0, 3.0];
        let plain = resample_and_evaluate(&data, &Mean, 50, &mut Xorshift64::new(9)).unwrap();
        let with = resample_and_evaluate_with(
            &data,
            &WithReplacement,
            &Mean,
            50,
            &mut Xorshift64::new(9),
        )
        .unwrap();
        assert_eq!(plain, with);
    }

    #[test]
    fn evaluate_with_struct_resampler() {
        // Always repeats the first observation.
        struct FirstOnly;
        impl<R: ?Sized> Resampler<char, R> for FirstOnly {
            fn resample_into(&self, data: &[char], buf: &mut Vec<char>, _rng: &mut R) {
                buf.clear();
                buf.extend(std::iter::repeat(data[0]).take(data.len()));
            }
        }
        let mut rng = Xorshift64::new(1);
        let dist =
            resample_and_evaluate_with(&['H', 'T', 'T'], &FirstOnly, &Proportion::new('H'), 4, &mut rng)
                .unwrap();
        assert_eq!(dist, vec![1.0; 4]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_output_independent_of_thread_count() {
        let data = [0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let run_in = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| resample_and_evaluate_par(&data, &Mean, 300, 7).unwrap())
        };
        let single = run_in(1);
        let multi = run_in(4);
        assert_eq!(single.len(), 300);
        assert_eq!(single, multi);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_with_uses_supplied_resampler() {
        let identity = |d: &[f64], buf: &mut Vec<f64>, _rng: &mut Xorshift64| {
            buf.clear();
            buf.extend_from_slice(d);
        };
        let dist = resample_and_evaluate_par_with(&[2.0, 4.0], &identity, &Mean, 16, 3).unwrap();
        assert_eq!(dist, vec![3.0; 16]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_is_deterministic_and_sized() {
        let data = [0.0, 1.0, 1.0, 0.0, 1.0];
        let a = resample_and_evaluate_par(&data, &Mean, 500, 42).unwrap();
        let b = resample_and_evaluate_par(&data, &Mean, 500, 42).unwrap();
        assert_eq!(a.len(), 500);
        assert_eq!(a, b);
        assert!(resample_and_evaluate_par(&data, &Mean, 0, 42).unwrap().is_empty());
    }
}
