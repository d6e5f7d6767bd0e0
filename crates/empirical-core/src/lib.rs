//! Core traits and types for empirical distributions
//!
//! This crate provides the foundation shared by the empirical-stats crates:
//!
//! - [`error`]: one error taxonomy for every crate (`Domain`, `OutOfRange`,
//!   `Unimplemented`, `Data`, `InvariantViolation`)
//! - [`numeric`]: key and weight traits, plus the totally ordered [`Real`] key
//! - [`random`]: an explicitly passed, reseedable random context
//! - [`math`]: odds conversions and closed-form distribution evaluators
//! - [`stats`]: sample statistics over plain slices
//! - [`mod@interpolate`]: linear interpolation between sorted sequences
//! - [`resample`]: bootstrap resampling and percentile rows
//!
//! # Example
//!
//! ```rust
//! use empirical_core::{math::odds, stats::mean, RandomContext};
//! use empirical_core::resample::resample;
//!
//! let mut rng = RandomContext::seeded(17);
//! let data = vec![1.0, 2.0, 3.0, 4.0];
//! let boot = resample(&data, 4, &mut rng).unwrap();
//! assert_eq!(boot.len(), 4);
//! assert_eq!(mean(&data), 2.5);
//! assert_eq!(odds(0.75), 3.0);
//! ```

pub mod error;
pub mod interpolate;
pub mod math;
pub mod numeric;
pub mod random;
pub mod resample;
pub mod stats;

pub use error::{Error, Result};
pub use interpolate::{interpolate, Interpolator};
pub use numeric::{real, reals, Key, Numeric, Real, Weight};
pub use random::RandomContext;

/// Evenly spaced values over `[low, high]`, inclusive of both ends
///
/// Returns an empty vector for `n == 0` and `[low]` for `n == 1`.
pub fn linspace(low: f64, high: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let step = (high - low) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { high } else { low + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-3.0, 3.0, 101);
        assert_eq!(xs.len(), 101);
        assert_eq!(xs[0], -3.0);
        assert_eq!(xs[100], 3.0);
        assert!((xs[50]).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }
}
