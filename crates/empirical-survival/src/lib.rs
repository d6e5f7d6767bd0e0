//! Survival analysis for empirical lifetimes
//!
//! - [`SurvivalFunction`]: `S(t)`, the probability a lifetime exceeds `t`
//! - [`HazardFunction`]: the rate at which lifetimes still at risk end
//! - [`KaplanMeier`]: a hazard estimate from complete and censored lifetimes
//!
//! # Example
//!
//! ```rust
//! use empirical_survival::KaplanMeier;
//!
//! // two lifetimes still running when observation stopped
//! let complete = [1.0, 2.0, 2.0, 5.0];
//! let ongoing = [3.0, 4.0];
//! let km = KaplanMeier::estimate(&complete, &ongoing).unwrap();
//!
//! let sf = km.survival();
//! assert_eq!(sf.prob(0.5), 1.0);
//! assert!((sf.prob(1.0) - 5.0 / 6.0).abs() < 1e-12);
//! assert_eq!(km.table()[2].censored, 1);
//! ```

pub mod hazard;
pub mod kaplan_meier;
pub mod survival;

pub use hazard::HazardFunction;
pub use kaplan_meier::{KaplanMeier, KaplanMeierRow};
pub use survival::{conditional_survival, SurvivalFunction};
