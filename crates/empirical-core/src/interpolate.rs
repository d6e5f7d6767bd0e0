//! Linear interpolation between two sorted sequences

use crate::{Error, Result};

/// Mapping between sorted sequences with clamped linear interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Interpolator {
    /// Create an interpolator; `xs` and `ys` must be sorted and of equal length
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::size_mismatch(xs.len(), ys.len(), "interpolator"));
        }
        if xs.is_empty() {
            return Err(Error::empty_input("interpolator"));
        }
        Ok(Self { xs, ys })
    }

    /// Look up `x` and return the corresponding `y`
    pub fn lookup(&self, x: f64) -> f64 {
        interpolate(x, &self.xs, &self.ys)
    }

    /// Look up `y` and return the corresponding `x`
    pub fn reverse(&self, y: f64) -> f64 {
        interpolate(y, &self.ys, &self.xs)
    }
}

/// Clamped linear interpolation of `x` over parallel sorted slices
///
/// A NaN `x` or empty input gives NaN. Only the common prefix of the two
/// slices is used.
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if x.is_nan() || n == 0 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let last = n - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let i = xs.partition_point(|&v| v <= x);
    let frac = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
    ys[i - 1] + frac * (ys[i] - ys[i - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_reverse() {
        let interp = Interpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 30.0]).unwrap();
        assert_eq!(interp.lookup(0.5), 5.0);
        assert_eq!(interp.lookup(1.5), 20.0);
        assert_eq!(interp.reverse(20.0), 1.5);
    }

    #[test]
    fn test_clamped_outside_range() {
        let interp = Interpolator::new(vec![1.0, 2.0], vec![5.0, 6.0]).unwrap();
        assert_eq!(interp.lookup(-10.0), 5.0);
        assert_eq!(interp.lookup(10.0), 6.0);
    }

    #[test]
    fn test_nan_maps_to_nan() {
        let interp = Interpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 20.0]).unwrap();
        assert!(interp.lookup(f64::NAN).is_nan());
        assert!(interp.reverse(f64::NAN).is_nan());
    }

    #[test]
    fn test_free_function_on_slices() {
        assert_eq!(interpolate(1.5, &[1.0, 2.0], &[0.0, 4.0]), 2.0);
        assert!(interpolate(1.0, &[], &[]).is_nan());
        assert_eq!(interpolate(3.0, &[1.0, 2.0, 3.0], &[7.0, 8.0]), 8.0);
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        assert!(Interpolator::new(vec![1.0], vec![]).is_err());
        assert!(Interpolator::new(vec![], vec![]).is_err());
    }
}
