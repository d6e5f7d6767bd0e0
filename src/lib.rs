//! Empirical distributions, Bayesian suites, resampling tests and survival
//!
//! This crate re-exports the empirical-stats workspace:
//!
//! - [`empirical_core`]: errors, key traits, random context and sample statistics
//! - [`empirical_mass`]: histograms, PMFs, CDFs, densities and conjugate priors
//! - [`empirical_inference`]: Bayesian suites and resampling hypothesis tests
//! - [`empirical_survival`]: survival and hazard functions, Kaplan-Meier estimation
//!
//! # Example
//!
//! ```rust
//! use empirical_stats::prelude::*;
//!
//! let mut rng = RandomContext::seeded(42);
//! let mut test = ResamplingTest::new(CoinTest::new(), (150, 100)).unwrap();
//! let p = test.p_value(1000, &mut rng).unwrap();
//! assert!(p < 0.05);
//!
//! let km = KaplanMeier::estimate(&[1.0, 2.0, 2.0, 3.0], &[]).unwrap();
//! assert!((km.survival().prob(2.0) - 0.25).abs() < 1e-12);
//! ```

pub use empirical_core;
pub use empirical_inference;
pub use empirical_mass;
pub use empirical_survival;

pub mod prelude {
    pub use empirical_core::{linspace, real, reals, Error, Key, Numeric, RandomContext, Real, Result};
    pub use empirical_inference::{
        likelihood_fn, CoinTest, CorrelationPermute, DiceChiTest, DiceTest, DiffMeansOneSided,
        DiffMeansPermute, DiffStdPermute, HypothesisTest, Likelihood, LogLikelihood,
        PregLengthTest, ResamplingConfig, ResamplingTest, Suite, TestReport,
    };
    pub use empirical_mass::{
        Beta, Cdf, Dirichlet, Hist, Joint, Pdf, Pmf, RenderDomain, Sampler, Source, WeightedMap,
    };
    pub use empirical_survival::{
        conditional_survival, HazardFunction, KaplanMeier, KaplanMeierRow, SurvivalFunction,
    };
}
