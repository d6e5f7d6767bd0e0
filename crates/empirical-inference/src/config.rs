//! Resampling configuration

use empirical_core::{Error, RandomContext, Result};
use serde::{Deserialize, Serialize};

/// Iterations used when none are given
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Quick look, e.g. inside a power analysis loop
pub const FAST_ITERATIONS: usize = 101;

/// Enough for p-values stable to about ±0.01
pub const HIGH_PRECISION_ITERATIONS: usize = 10_000;

/// How many null datasets to simulate and how to seed them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResamplingConfig {
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for ResamplingConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl ResamplingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fast() -> Self {
        Self::default().with_iterations(FAST_ITERATIONS)
    }

    pub fn high_precision() -> Self {
        Self::default().with_iterations(HIGH_PRECISION_ITERATIONS)
    }

    /// Set the number of simulated datasets
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidParameter(
                "iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Random stream for this configuration
    pub fn rng(&self) -> RandomContext {
        match self.seed {
            Some(seed) => RandomContext::seeded(seed),
            None => RandomContext::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ResamplingConfig::new().with_iterations(500).with_seed(42);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.rng().seed(), Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(ResamplingConfig::default().iterations, DEFAULT_ITERATIONS);
        assert_eq!(ResamplingConfig::fast().iterations, FAST_ITERATIONS);
        assert_eq!(
            ResamplingConfig::high_precision().iterations,
            HIGH_PRECISION_ITERATIONS
        );
        assert!(ResamplingConfig::default().seed.is_none());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = ResamplingConfig::new().with_iterations(0);
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
    }
}
