//! Resampling hypothesis tests
//!
//! A concrete test implements [`HypothesisTest`]: how to reduce a dataset to
//! a test statistic and how to simulate one dataset under the null
//! hypothesis. [`ResamplingTest`] is the engine shared by every test. It
//! freezes the observed statistic at construction, then estimates the
//! p-value as the fraction of simulated statistics at least as large.
//!
//! # Example
//!
//! ```rust
//! use empirical_core::RandomContext;
//! use empirical_inference::{CoinTest, ResamplingTest};
//!
//! let mut rng = RandomContext::seeded(17);
//! let mut test = ResamplingTest::new(CoinTest::new(), (140, 110)).unwrap();
//! let p = test.p_value(1000, &mut rng).unwrap();
//! assert!(p > 0.0 && p < 0.2);
//! ```

use crate::config::ResamplingConfig;
use empirical_core::{reals, Error, Real, Result};
use empirical_mass::Cdf;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// A statistic and a null model to compare it against
pub trait HypothesisTest {
    type Data;

    /// Precompute whatever the null model needs from the observed data
    fn make_model(&mut self, _data: &Self::Data) -> Result<()> {
        Ok(())
    }

    /// Reduce a dataset to a scalar discrepancy; larger is more extreme
    fn test_statistic(&self, data: &Self::Data) -> Result<f64>;

    /// Simulate one dataset under the null hypothesis
    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Data>;
}

/// Summary of a finished test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub p_value: f64,
    pub actual: f64,
    pub max_test_stat: f64,
    pub iterations: usize,
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p-value = {}", self.p_value)?;
        writeln!(f, "actual = {}", self.actual)?;
        write!(f, "ts max = {}", self.max_test_stat)
    }
}

/// Engine estimating p-values for a [`HypothesisTest`]
#[derive(Debug, Clone)]
pub struct ResamplingTest<T: HypothesisTest> {
    test: T,
    data: T::Data,
    actual: f64,
    test_stats: Option<Vec<f64>>,
    p_value: Option<f64>,
}

impl<T: HypothesisTest> ResamplingTest<T> {
    /// Build the null model and freeze the observed statistic
    pub fn new(mut test: T, data: T::Data) -> Result<Self> {
        test.make_model(&data)?;
        let actual = test.test_statistic(&data)?;
        if actual.is_nan() {
            return Err(Error::non_finite("observed test statistic"));
        }
        Ok(Self {
            test,
            data,
            actual,
            test_stats: None,
            p_value: None,
        })
    }

    /// Observed statistic
    pub fn actual(&self) -> f64 {
        self.actual
    }

    pub fn data(&self) -> &T::Data {
        &self.data
    }

    pub fn test(&self) -> &T {
        &self.test
    }

    /// Simulate `iters` null datasets and return the fraction whose
    /// statistic is at least the observed one
    ///
    /// The simulated statistics replace those of any previous run.
    #[instrument(level = "debug", skip(self, rng), fields(actual = self.actual))]
    pub fn p_value<R: Rng + ?Sized>(&mut self, iters: usize, rng: &mut R) -> Result<f64> {
        check_iterations(iters)?;
        let mut stats = Vec::with_capacity(iters);
        for _ in 0..iters {
            let simulated = self.test.run_model(rng)?;
            stats.push(self.test.test_statistic(&simulated)?);
        }
        Ok(self.record(stats))
    }

    /// Run with a configured iteration count and seed
    pub fn run(&mut self, config: &ResamplingConfig) -> Result<TestReport> {
        config.validate()?;
        let mut rng = config.rng();
        self.p_value(config.iterations, &mut rng)?;
        self.report()
    }

    fn record(&mut self, stats: Vec<f64>) -> f64 {
        let count = stats.iter().filter(|&&x| x >= self.actual).count();
        let p = count as f64 / stats.len() as f64;
        debug!(iterations = stats.len(), count, p_value = p, "resampling finished");
        self.test_stats = Some(stats);
        self.p_value = Some(p);
        p
    }

    /// Simulated statistics from the last run
    pub fn test_stats(&self) -> Option<&[f64]> {
        self.test_stats.as_deref()
    }

    fn stats_or_err(&self) -> Result<&[f64]> {
        self.test_stats().ok_or_else(|| {
            Error::Domain("no simulated statistics; compute a p-value first".to_string())
        })
    }

    /// Distribution of the simulated statistics
    pub fn test_cdf(&self) -> Result<Cdf<Real>> {
        Cdf::from_values(reals(self.stats_or_err()?))
    }

    /// Largest simulated statistic
    pub fn max_test_stat(&self) -> Result<f64> {
        Ok(self
            .stats_or_err()?
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    pub fn report(&self) -> Result<TestReport> {
        let stats = self.stats_or_err()?;
        let p_value = self.p_value.ok_or_else(|| {
            Error::InvariantViolation("statistics recorded without a p-value".to_string())
        })?;
        Ok(TestReport {
            p_value,
            actual: self.actual,
            max_test_stat: self.max_test_stat()?,
            iterations: stats.len(),
        })
    }
}

#[cfg(feature = "parallel")]
impl<T> ResamplingTest<T>
where
    T: HypothesisTest + Sync,
{
    /// Parallel p-value; iteration `i` draws from its own generator seeded
    /// with `seed + i`, so the result does not depend on scheduling
    #[instrument(level = "debug", skip(self), fields(actual = self.actual))]
    pub fn p_value_par(&mut self, iters: usize, seed: u64) -> Result<f64> {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use rayon::prelude::*;

        check_iterations(iters)?;
        let test = &self.test;
        let stats = (0..iters)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                let simulated = test.run_model(&mut rng)?;
                test.test_statistic(&simulated)
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(self.record(stats))
    }
}

fn check_iterations(iters: usize) -> Result<()> {
    if iters == 0 {
        return Err(Error::InvalidParameter(
            "iterations must be positive".to_string(),
        ));
    }
    Ok(())
}
