//! Odds conversions and closed-form distribution evaluators
//!
//! The evaluators wrap `statrs` distributions. Constructor failures
//! (non-positive scale, probability outside [0, 1], ...) surface as
//! [`Error::InvalidParameter`].

use crate::{Error, Result};
use statrs::distribution::{
    Binomial, Continuous, ContinuousCDF, Discrete, Exp, Gamma, Hypergeometric, LogNormal, Normal,
    Pareto, Poisson, Weibull,
};
use statrs::function::factorial;

/// Odds in favour for probability `p`
///
/// `p == 1` maps to `+inf` rather than failing; [`probability`] maps it back.
///
/// ```rust
/// use empirical_core::math::odds;
/// assert_eq!(odds(0.75), 3.0);
/// assert!(odds(1.0).is_infinite());
/// ```
pub fn odds(p: f64) -> f64 {
    if p == 1.0 {
        return f64::INFINITY;
    }
    p / (1.0 - p)
}

/// Probability corresponding to odds `o`
pub fn probability(o: f64) -> f64 {
    if o == f64::INFINITY {
        return 1.0;
    }
    o / (o + 1.0)
}

/// Probability corresponding to `yes:no` odds
pub fn probability2(yes: f64, no: f64) -> f64 {
    yes / (yes + no)
}

/// Binomial coefficient "n choose k"
pub fn binomial_coef(n: u64, k: u64) -> f64 {
    factorial::binomial(n, k)
}

/// Natural log of "n choose k"
pub fn log_binomial_coef(n: u64, k: u64) -> f64 {
    factorial::ln_binomial(n, k)
}

fn normal(mu: f64, sigma: f64) -> Result<Normal> {
    Normal::new(mu, sigma).map_err(|e| Error::parameter("normal", e))
}

/// Normal density at `x`
pub fn eval_normal_pdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(normal(mu, sigma)?.pdf(x))
}

/// Normal CDF at `x`
pub fn eval_normal_cdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(normal(mu, sigma)?.cdf(x))
}

/// Inverse normal CDF
pub fn eval_normal_cdf_inverse(p: f64, mu: f64, sigma: f64) -> Result<f64> {
    Error::check_probability(p)?;
    Ok(normal(mu, sigma)?.inverse_cdf(p))
}

/// Lognormal CDF where `ln X ~ Normal(mu, sigma)`
pub fn eval_lognormal_cdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    let dist = LogNormal::new(mu, sigma).map_err(|e| Error::parameter("lognormal", e))?;
    Ok(dist.cdf(x))
}

/// Probability of `k` successes in `n` trials
pub fn eval_binomial_pmf(k: u64, n: u64, p: f64) -> Result<f64> {
    let dist = Binomial::new(p, n).map_err(|e| Error::parameter("binomial", e))?;
    Ok(dist.pmf(k))
}

/// Probability of `k` events at rate `lam`
pub fn eval_poisson_pmf(k: u64, lam: f64) -> Result<f64> {
    let dist = Poisson::new(lam).map_err(|e| Error::parameter("poisson", e))?;
    Ok(dist.pmf(k))
}

fn exponential(lam: f64) -> Result<Exp> {
    Exp::new(lam).map_err(|e| Error::parameter("exponential", e))
}

/// Exponential density with rate `lam`
pub fn eval_exponential_pdf(x: f64, lam: f64) -> Result<f64> {
    Ok(exponential(lam)?.pdf(x))
}

/// Exponential CDF with rate `lam`
pub fn eval_exponential_cdf(x: f64, lam: f64) -> Result<f64> {
    Ok(exponential(lam)?.cdf(x))
}

fn weibull(lam: f64, k: f64) -> Result<Weibull> {
    Weibull::new(k, lam).map_err(|e| Error::parameter("weibull", e))
}

/// Weibull density with scale `lam` and shape `k`
pub fn eval_weibull_pdf(x: f64, lam: f64, k: f64) -> Result<f64> {
    Ok(weibull(lam, k)?.pdf(x))
}

/// Weibull CDF with scale `lam` and shape `k`
pub fn eval_weibull_cdf(x: f64, lam: f64, k: f64) -> Result<f64> {
    Ok(weibull(lam, k)?.cdf(x))
}

/// Pareto density with minimum `xm` and shape `alpha`
pub fn eval_pareto_pdf(x: f64, xm: f64, alpha: f64) -> Result<f64> {
    let dist = Pareto::new(xm, alpha).map_err(|e| Error::parameter("pareto", e))?;
    Ok(dist.pdf(x))
}

/// Geometric PMF shifted by `loc`
///
/// With `loc = 0`, the probability that the first success happens on trial `k`
/// (support starts at 1). With `loc = -1`, the probability of `k` failures
/// before the first success.
pub fn eval_geometric_pmf(k: i64, p: f64, loc: i64) -> Result<f64> {
    if !(p > 0.0 && p <= 1.0) {
        return Err(Error::parameter(
            "geometric",
            format!("success probability {p} must be in (0, 1]"),
        ));
    }
    let trials = k - loc;
    if trials < 1 {
        return Ok(0.0);
    }
    Ok((1.0 - p).powi((trials - 1) as i32) * p)
}

/// Probability of `k` successes in `n` draws from a population of `big_n`
/// containing `big_k` successes
pub fn eval_hypergeom_pmf(k: u64, big_n: u64, big_k: u64, n: u64) -> Result<f64> {
    let dist = Hypergeometric::new(big_n, big_k, n)
        .map_err(|e| Error::parameter("hypergeometric", e))?;
    Ok(dist.pmf(k))
}

/// Gamma density with shape `a` and unit rate
pub fn eval_gamma_pdf(x: f64, a: f64) -> Result<f64> {
    let dist = Gamma::new(a, 1.0).map_err(|e| Error::parameter("gamma", e))?;
    Ok(dist.pdf(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_odds_round_trip() {
        for &p in &[0.0, 0.1, 0.5, 0.75, 0.99] {
            assert_abs_diff_eq!(probability(odds(p)), p, epsilon = 1e-12);
        }
        assert_eq!(odds(1.0), f64::INFINITY);
        assert_eq!(probability(f64::INFINITY), 1.0);
        assert_abs_diff_eq!(probability2(2.0, 1.0), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_binomial_coefficients() {
        assert_abs_diff_eq!(binomial_coef(5, 2), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(log_binomial_coef(5, 2), 10f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_normal_evaluators() {
        assert_abs_diff_eq!(eval_normal_cdf(0.0, 0.0, 1.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(
            eval_normal_cdf_inverse(0.975, 0.0, 1.0).unwrap(),
            1.959964,
            epsilon = 1e-5
        );
        assert_abs_diff_eq!(
            eval_normal_pdf(0.0, 0.0, 1.0).unwrap(),
            1.0 / (2.0 * std::f64::consts::PI).sqrt(),
            epsilon = 1e-12
        );
        assert!(matches!(
            eval_normal_pdf(0.0, 0.0, -1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            eval_normal_cdf_inverse(1.5, 0.0, 1.0),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_discrete_evaluators() {
        assert_abs_diff_eq!(eval_binomial_pmf(1, 2, 0.5).unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(
            eval_poisson_pmf(0, 2.0).unwrap(),
            (-2.0f64).exp(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(eval_geometric_pmf(1, 0.25, 0).unwrap(), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(eval_geometric_pmf(0, 0.25, -1).unwrap(), 0.25, epsilon = 1e-12);
        assert_eq!(eval_geometric_pmf(0, 0.25, 0).unwrap(), 0.0);
        // 2 red among 5 balls, draw 2: P(both red) = 1/10
        assert_abs_diff_eq!(eval_hypergeom_pmf(2, 5, 2, 2).unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_continuous_evaluators() {
        assert_abs_diff_eq!(
            eval_exponential_cdf(1.0, 2.0).unwrap(),
            1.0 - (-2.0f64).exp(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(eval_exponential_pdf(0.0, 2.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            eval_weibull_cdf(1.0, 1.0, 1.0).unwrap(),
            1.0 - (-1.0f64).exp(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(eval_pareto_pdf(1.0, 1.0, 2.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eval_gamma_pdf(1.0, 1.0).unwrap(), (-1.0f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(eval_lognormal_cdf(1.0, 0.0, 1.0).unwrap(), 0.5, epsilon = 1e-12);
    }
}
