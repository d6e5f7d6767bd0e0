//! Bayesian suites and resampling hypothesis tests
//!
//! - [`suite`]: a distribution over hypotheses updated by a [`Likelihood`]
//!   model, one observation or one dataset at a time
//! - [`hypothesis`]: the [`HypothesisTest`] trait and the [`ResamplingTest`]
//!   engine that turns any implementation into a p-value
//! - [`permutation`] and [`goodness`]: ready-made tests
//! - [`analytic`]: closed-form sampling distributions to compare against
//! - [`power`]: false negative rates by resampling
//!
//! # Feature Flags
//!
//! - `parallel`: adds [`ResamplingTest::p_value_par`], which runs the
//!   simulations on the rayon thread pool with one seeded generator per
//!   iteration

pub mod analytic;
pub mod config;
pub mod goodness;
pub mod hypothesis;
pub mod permutation;
pub mod power;
pub mod suite;

pub use analytic::{chi_squared_cdf, student_cdf};
pub use config::{
    ResamplingConfig, DEFAULT_ITERATIONS, FAST_ITERATIONS, HIGH_PRECISION_ITERATIONS,
};
pub use goodness::{CoinTest, DiceChiTest, DiceTest, PregLengthTest};
pub use hypothesis::{HypothesisTest, ResamplingTest, TestReport};
pub use permutation::{
    CorrelationPermute, DiffMeansOneSided, DiffMeansPermute, DiffStdPermute, Groups,
};
pub use power::false_negative_rate;
pub use suite::{likelihood_fn, FnLikelihood, Likelihood, LogLikelihood, Suite};
