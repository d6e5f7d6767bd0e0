//! Frequency maps, probability mass functions and cumulative distributions
//!
//! This crate represents probability laws as finite, mutable, queryable
//! structures and computes derived laws from them.
//!
//! # Key Features
//!
//! - **One generic container**: [`WeightedMap`] holds every value-to-weight
//!   mapping; [`Hist`], [`Pmf`] and [`Joint`] are thin wrappers over it
//! - **Distribution algebra**: `&a + &b` and friends give the law of the
//!   result on independent draws
//! - **Fast lookups**: [`Cdf`] answers `P(X <= x)` and its inverse by
//!   binary search, and is the preferred path for repeated sampling
//! - **Densities**: [`Pdf`] implementations discretise into a [`Pmf`]
//! - **Conjugate priors**: [`Beta`] and [`Dirichlet`]
//!
//! # Example
//!
//! ```rust
//! use empirical_mass::{Cdf, Pmf};
//!
//! let die = Pmf::from_values(1..=6i64);
//! let two_dice = &die + &die;
//! let cdf = Cdf::from_pmf(&two_dice).unwrap();
//!
//! assert_eq!(cdf.median().unwrap(), 7);
//! assert!((cdf.prob(&3) - 3.0 / 36.0).abs() < 1e-12);
//!
//! // the best of three rolls
//! let best = die.max(3).unwrap();
//! assert!((best.prob(&5) - (5.0f64 / 6.0).powi(3)).abs() < 1e-12);
//! ```

pub mod cdf;
pub mod conjugate;
pub mod families;
pub mod hist;
pub mod joint;
pub mod pdf;
pub mod pmf;
pub mod source;
pub mod weighted;

pub use cdf::Cdf;
pub use conjugate::{Beta, Dirichlet};
pub use families::{
    make_binomial_pmf, make_exponential_pmf, make_gamma_pmf, make_geometric_pmf, make_mixture,
    make_normal_pmf, make_pareto_pmf, make_poisson_pmf, make_uniform_pmf, make_weibull_pmf,
};
pub use hist::Hist;
pub use joint::{make_joint, Joint, JointKey};
pub use pdf::{EstimatedPdf, ExponentialPdf, NormalPdf, Pdf, RenderDomain};
pub use pmf::Pmf;
pub use source::{random_sum, sample_sum, Sampler, Source};
pub use weighted::WeightedMap;
