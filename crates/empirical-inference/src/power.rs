//! Power analysis by resampling

use crate::hypothesis::ResamplingTest;
use crate::permutation::DiffMeansPermute;
use empirical_core::resample::resample;
use empirical_core::{Error, Result};
use rand::Rng;
use tracing::debug;

/// Significance threshold used when counting misses
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Fraction of simulated experiments in which a real difference in means
/// goes undetected
///
/// Each run resamples both groups with replacement, then runs a
/// [`DiffMeansPermute`] test with `iters` permutations. A run counts as a
/// false negative when its p-value exceeds [`SIGNIFICANCE_LEVEL`].
pub fn false_negative_rate<R: Rng + ?Sized>(
    group1: &[f64],
    group2: &[f64],
    num_runs: usize,
    iters: usize,
    rng: &mut R,
) -> Result<f64> {
    if num_runs == 0 {
        return Err(Error::InvalidParameter("num_runs must be positive".to_string()));
    }
    let mut misses = 0usize;
    for _ in 0..num_runs {
        let sample1 = resample(group1, group1.len(), rng)?;
        let sample2 = resample(group2, group2.len(), rng)?;
        let mut test = ResamplingTest::new(DiffMeansPermute::new(), (sample1, sample2))?;
        if test.p_value(iters, rng)? > SIGNIFICANCE_LEVEL {
            misses += 1;
        }
    }
    let rate = misses as f64 / num_runs as f64;
    debug!(num_runs, misses, rate, "false negative rate");
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_large_effect_is_rarely_missed() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let group1: Vec<f64> = (0..30).map(|i| (i % 6) as f64 + 10.0).collect();
        let group2: Vec<f64> = (0..30).map(|i| (i % 6) as f64).collect();
        let rate = false_negative_rate(&group1, &group2, 20, 101, &mut rng).unwrap();
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn test_no_effect_is_usually_missed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let group: Vec<f64> = (0..30).map(|i| ((i * 7) % 11) as f64).collect();
        let rate = false_negative_rate(&group, &group, 40, 101, &mut rng).unwrap();
        assert!(rate > 0.7, "rate = {rate}");
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(false_negative_rate(&[1.0], &[2.0], 0, 10, &mut rng).is_err());
        assert!(false_negative_rate(&[], &[2.0], 5, 10, &mut rng).is_err());
    }
}
