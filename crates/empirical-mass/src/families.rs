//! Discrete approximations of standard distribution families
//!
//! Continuous families are evaluated on an evenly spaced grid and the
//! densities treated as masses. Every constructor except
//! [`make_binomial_pmf`] normalizes its result.

use crate::pmf::Pmf;
use empirical_core::math;
use empirical_core::{linspace, real, Error, Key, Real, Result};

fn grid_pmf<F>(xs: Vec<f64>, density: F) -> Result<Pmf<Real>>
where
    F: Fn(f64) -> Result<f64>,
{
    let items = xs
        .into_iter()
        .map(|x| Ok((real(x), density(x)?)))
        .collect::<Result<Vec<_>>>()?;
    Pmf::from_items(items)
}

/// Normal over `mu ± num_sigmas * sigma` at `n` points
pub fn make_normal_pmf(mu: f64, sigma: f64, num_sigmas: f64, n: usize) -> Result<Pmf<Real>> {
    let low = mu - num_sigmas * sigma;
    let high = mu + num_sigmas * sigma;
    grid_pmf(linspace(low, high, n), |x| math::eval_normal_pdf(x, mu, sigma))
}

/// Exact binomial masses for `0..=n` successes; already sums to 1
pub fn make_binomial_pmf(n: u64, p: f64) -> Result<Pmf<i64>> {
    let mut pmf = Pmf::new();
    for k in 0..=n {
        pmf.set(k as i64, math::eval_binomial_pmf(k, n, p)?);
    }
    Ok(pmf)
}

/// Poisson truncated at `high`, keeping every `step`-th count
pub fn make_poisson_pmf(lam: f64, high: u64, step: usize) -> Result<Pmf<i64>> {
    if step == 0 {
        return Err(Error::parameter("poisson pmf", "step must be positive"));
    }
    let items = (0..=high)
        .step_by(step)
        .map(|k| Ok((k as i64, math::eval_poisson_pmf(k, lam)?)))
        .collect::<Result<Vec<_>>>()?;
    Pmf::from_items(items)
}

/// Exponential over `[0, high]` at `n` points
pub fn make_exponential_pmf(lam: f64, high: f64, n: usize) -> Result<Pmf<Real>> {
    grid_pmf(linspace(0.0, high, n), |x| math::eval_exponential_pdf(x, lam))
}

/// Geometric over `0..high`
///
/// With `loc = 0` the keys count trials up to and including the first
/// success; with `loc = -1` they count failures before it.
pub fn make_geometric_pmf(p: f64, loc: i64, high: i64) -> Result<Pmf<i64>> {
    let items = (0..high)
        .map(|k| Ok((k, math::eval_geometric_pmf(k, p, loc)?)))
        .collect::<Result<Vec<_>>>()?;
    Pmf::from_items(items)
}

/// Gamma with shape `a` and unit rate, evaluated at `xs`
pub fn make_gamma_pmf(xs: &[f64], a: f64) -> Result<Pmf<Real>> {
    grid_pmf(xs.to_vec(), |x| math::eval_gamma_pdf(x, a))
}

/// Weibull over `[0, high]` at `n` points; an infinite density at zero
/// is dropped to 0
pub fn make_weibull_pmf(lam: f64, k: f64, high: f64, n: usize) -> Result<Pmf<Real>> {
    grid_pmf(linspace(0.0, high, n), |x| {
        let d = math::eval_weibull_pdf(x, lam, k)?;
        Ok(if d.is_infinite() { 0.0 } else { d })
    })
}

/// Pareto over `[xm, high]` at `num` points
pub fn make_pareto_pmf(xm: f64, alpha: f64, high: f64, num: usize) -> Result<Pmf<Real>> {
    grid_pmf(linspace(xm, high, num), |x| math::eval_pareto_pdf(x, xm, alpha))
}

/// Equal mass on `n` evenly spaced points over `[low, high]`
pub fn make_uniform_pmf(low: f64, high: f64, n: usize) -> Result<Pmf<Real>> {
    grid_pmf(linspace(low, high, n), |_| Ok(1.0))
}

/// Mixture of weighted components, each contributing `weight * p`
///
/// The result is normalized only if the weights sum to 1.
pub fn make_mixture<K: Key>(components: &[(Pmf<K>, f64)]) -> Pmf<K> {
    let mut mix = Pmf::new().with_label("mix");
    for (pmf, weight) in components {
        for (x, p) in pmf.iter() {
            mix.incr(x.clone(), weight * p);
        }
    }
    mix
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normal_pmf_moments() {
        let pmf = make_normal_pmf(10.0, 2.0, 4.0, 201).unwrap();
        assert_eq!(pmf.len(), 201);
        assert_abs_diff_eq!(pmf.total(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pmf.mean(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pmf.std(None), 2.0, epsilon = 1e-2);
    }

    #[test]
    fn test_binomial_pmf() {
        let pmf = make_binomial_pmf(10, 0.5).unwrap();
        assert_eq!(pmf.len(), 11);
        assert_abs_diff_eq!(pmf.total(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pmf.prob(&5), 252.0 / 1024.0, epsilon = 1e-9);
        assert_eq!(pmf.mode().unwrap(), 5);
    }

    #[test]
    fn test_poisson_pmf() {
        let pmf = make_poisson_pmf(3.0, 30, 1).unwrap();
        assert_abs_diff_eq!(pmf.mean(), 3.0, epsilon = 1e-6);
        let coarse = make_poisson_pmf(3.0, 10, 2).unwrap();
        assert_eq!(coarse.len(), 6);
        assert!(make_poisson_pmf(3.0, 10, 0).is_err());
    }

    #[test]
    fn test_geometric_pmf() {
        let trials = make_geometric_pmf(0.5, 0, 10).unwrap();
        assert_eq!(trials.prob(&0), 0.0);
        assert!(trials.prob(&1) > trials.prob(&2));
        let failures = make_geometric_pmf(0.5, -1, 10).unwrap();
        assert!(failures.prob(&0) > 0.0);
        assert_abs_diff_eq!(failures.prob(&0), 2.0 * failures.prob(&1), epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_and_weibull_match_at_shape_one() {
        let expo = make_exponential_pmf(2.0, 5.0, 50).unwrap();
        let weibull = make_weibull_pmf(0.5, 1.0, 5.0, 50).unwrap();
        for (x, p) in expo.iter() {
            assert_abs_diff_eq!(weibull.prob(x), *p, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_weibull_drops_infinite_density() {
        let pmf = make_weibull_pmf(1.0, 0.5, 5.0, 20).unwrap();
        assert_eq!(pmf.prob(&real(0.0)), 0.0);
        assert_abs_diff_eq!(pmf.total(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pareto_and_gamma_normalized() {
        let pareto = make_pareto_pmf(1.0, 2.0, 10.0, 101).unwrap();
        assert_abs_diff_eq!(pareto.total(), 1.0, epsilon = 1e-9);
        assert_eq!(pareto.mode().unwrap(), real(1.0));
        let gamma = make_gamma_pmf(&linspace(0.1, 10.0, 100), 2.0).unwrap();
        assert_abs_diff_eq!(gamma.total(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uniform_and_mixture() {
        let uniform = make_uniform_pmf(0.0, 1.0, 5).unwrap();
        assert_abs_diff_eq!(uniform.prob(&real(0.5)), 0.2, epsilon = 1e-12);

        let d4 = Pmf::from_values(1..=4i64);
        let d6 = Pmf::from_values(1..=6i64);
        let mix = make_mixture(&[(d4, 0.5), (d6, 0.5)]);
        assert_abs_diff_eq!(mix.total(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mix.prob(&1), 0.5 / 4.0 + 0.5 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mix.prob(&6), 0.5 / 6.0, epsilon = 1e-12);
        assert_eq!(mix.label(), Some("mix"));
    }
}
