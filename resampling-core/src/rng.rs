//! Seeded random sources for reproducible resampling.
//!
//! [`RandomSource`] is the capability the resampler draws from; any generator
//! that can produce uniform 64-bit words can implement it. [`Xorshift64`] is
//! the bundled implementation: tiny, deterministic for a given seed, and good
//! enough for bootstrap index selection.

/// A source of uniformly distributed 64-bit words.
///
/// Only [`next_u64`](RandomSource::next_u64) is required; the remaining
/// methods derive floats and bounded indices from it.
pub trait RandomSource {
    /// Next uniformly distributed 64-bit word.
    fn next_u64(&mut self) -> u64;

    /// Uniform float in `[0, 1)` built from the top 53 bits of a draw.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform index in `[0, bound)`.
    ///
    /// Uses a widening multiply rather than `%`, so there is no modulo bias
    /// toward small indices. Returns 0 when `bound` is 0.
    fn next_index(&mut self, bound: usize) -> usize {
        ((self.next_u64() as u128 * bound as u128) >> 64) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Minimal xorshift64 PRNG for reproducible resampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator from `seed`. A zero seed is mapped to 1, since the
    /// all-zero state is a fixed point of xorshift.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Create the generator for stream `stream` derived from `seed`.
    ///
    /// Each `(seed, stream)` pair is scrambled through SplitMix64, so streams
    /// with adjacent indices start from unrelated states.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mixed = splitmix64(seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)));
        Self::new(splitmix64(mixed))
    }
}

impl RandomSource for Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

/// SplitMix64 finalizer.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ── Tests ──────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn next_f64_in_unit_interval(seed in any::<u64>()) {
            let mut rng = Xorshift64::new(seed);
            for _ in 0..64 {
                let x = rng.next_f64();
                prop_assert!((0.0..1.0).contains(&x), "next_f64={} out of [0,1)", x);
            }
        }

        #[test]
        fn next_index_below_bound(seed in any::<u64>(), bound in 1usize..10_000) {
            let mut rng = Xorshift64::new(seed);
            for _ in 0..64 {
                prop_assert!(rng.next_index(bound) < bound);
            }
        }
    }
}
