//! memeq

use core::hint::black_box;
use subtle::{Choice, ConstantTimeEq};

/// Compares two slices of memory content and returns whether they are equal as a [Choice]
///
/// Every byte of both slices is read, no matter where (or whether) the first difference occurs.
/// The result is a [Choice] so callers can keep combining it with other flags without
/// branching on it.
///
/// # Panics
/// If the two slices have different lengths.
///
/// ## Leaks
/// Lengths are treated as public: a length mismatch panics immediately.
///
/// The execution time of the function grows approx. linear with the length of the input. This is
/// considered safe.
///
/// ## Examples
///
/// ```rust
/// use ctmap_constant_time::memeq;
/// let a = [0, 0, 0, 0];
/// let b = [0, 0, 0, 1];
/// assert!(bool::from(memeq(&a, &a)));
/// assert!(!bool::from(memeq(&a, &b)));
/// assert!(bool::from(memeq(&[], &[])));
/// ```
#[inline]
pub fn memeq(a: &[u8], b: &[u8]) -> Choice {
    assert!(black_box(a.len()) == black_box(b.len()));
    black_box(a).ct_eq(black_box(b))
}


/// [tests::memeq_runs_in_constant_time] runs a stasticial test that the equality of the two
/// input parameters does not correlate with the run time.
#[cfg(all(test, feature = "constant_time_tests"))]
mod tests {
    use super::stats::pearson;
    use super::*;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use std::time::Instant;

    #[test]
    /// tests whether [memeq] actually runs in constant time
    ///
    /// Half of the comparisons are run on equal slices, the other half on slices which differ
    /// in their very first byte (the case an early-exit comparison would return fastest for).
    /// The test fails if the result is correlated with the run time
    /// (absolute correlation coefficient ≥ 0.01).
    fn memeq_runs_in_constant_time() {
        const RUNS: usize = 1_000_000;
        const LEN: usize = 1024;

        let reference = [b'a'; LEN];
        let mut differing = reference;
        differing[0] = b'b';

        let mut classes: Vec<bool> = (0..RUNS).map(|i| i % 2 == 0).collect();
        classes.shuffle(&mut thread_rng());

        let mut candidate = [0u8; LEN];
        let samples: Vec<(f64, f64)> = classes
            .into_iter()
            .map(|equal| {
                candidate.copy_from_slice(if equal { &reference } else { &differing });
                let start = Instant::now();
                black_box(memeq(black_box(&reference), black_box(&candidate)));
                let nanos = start.elapsed().as_nanos() as f64;
                (if equal { 1. } else { 0. }, nanos)
            })
            .collect();

        let correlation = pearson(&samples);
        println!("correlation: {correlation:.6}");
        #[cfg(not(coverage))]
        assert!(
            correlation.abs() < 0.01,
            "execution time correlates with result"
        )
    }
}
