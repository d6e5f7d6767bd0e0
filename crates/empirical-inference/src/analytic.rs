//! Closed-form sampling distributions for comparison with simulated ones

use empirical_core::{linspace, reals, Error, Real, Result};
use empirical_mass::Cdf;
use statrs::distribution::{ChiSquared, ContinuousCDF, StudentsT};

/// Distribution of the sample correlation of `n` uncorrelated pairs
///
/// Derived from Student's t with `n - 2` degrees of freedom over
/// `t` in [-3, 3], mapped through `r = t / sqrt(n - 2 + t^2)`.
pub fn student_cdf(n: usize) -> Result<Cdf<Real>> {
    if n < 3 {
        return Err(Error::InsufficientData {
            expected: 3,
            actual: n,
        });
    }
    let df = (n - 2) as f64;
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| Error::parameter("student t", e))?;
    let ts = linspace(-3.0, 3.0, 101);
    let ps = ts.iter().map(|&t| dist.cdf(t)).collect();
    let rs: Vec<f64> = ts.iter().map(|t| t / (df + t * t).sqrt()).collect();
    Cdf::from_parts(reals(&rs), ps)
}

/// Chi-squared CDF with `n - 1` degrees of freedom over [0, 25]
pub fn chi_squared_cdf(n: usize) -> Result<Cdf<Real>> {
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }
    let dist =
        ChiSquared::new((n - 1) as f64).map_err(|e| Error::parameter("chi squared", e))?;
    let xs = linspace(0.0, 25.0, 101);
    let ps = xs.iter().map(|&x| dist.cdf(x)).collect();
    Cdf::from_parts(reals(&xs), ps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use empirical_core::real;

    #[test]
    fn test_student_cdf_is_symmetric() {
        let cdf = student_cdf(30).unwrap();
        assert_eq!(cdf.len(), 101);
        let (xs, ps) = (cdf.xs(), cdf.ps());
        for i in 0..=50 {
            assert_abs_diff_eq!(xs[i].into_inner(), -xs[100 - i].into_inner(), epsilon = 1e-9);
            assert_abs_diff_eq!(ps[i] + ps[100 - i], 1.0, epsilon = 1e-9);
        }
        let top = *cdf.xs().last().unwrap();
        assert!(top.into_inner() < 1.0);
        assert!(student_cdf(2).is_err());
    }

    #[test]
    fn test_chi_squared_cdf() {
        let cdf = chi_squared_cdf(6).unwrap();
        // just below the 95th percentile with 5 degrees of freedom
        assert_abs_diff_eq!(cdf.prob(&real(11.0)), 0.9486, epsilon = 1e-3);
        assert!(chi_squared_cdf(1).is_err());
    }
}
