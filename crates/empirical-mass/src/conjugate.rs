//! Conjugate priors for proportions
//!
//! [`Beta`] tracks a single success probability; [`Dirichlet`] tracks a
//! vector of category prevalences. Both update in closed form by adding
//! observed counts to their parameters.

use crate::cdf::Cdf;
use crate::pmf::Pmf;
use empirical_core::{linspace, real, reals, Error, Key, Real, Result};
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::ContinuousCDF;
use statrs::function::beta::beta_reg;
use tracing::debug;

/// Beta distribution over a proportion
#[derive(Debug, Clone, PartialEq)]
pub struct Beta {
    alpha: f64,
    beta: f64,
    label: Option<String>,
}

impl Default for Beta {
    /// The uniform prior, `Beta(1, 1)`
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            label: None,
        }
    }
}

impl Beta {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha > 0.0 && beta > 0.0) {
            return Err(Error::parameter(
                "beta",
                format!("shape parameters must be positive, got ({alpha}, {beta})"),
            ));
        }
        Ok(Self {
            alpha,
            beta,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Add observed successes and failures
    pub fn update(&mut self, heads: f64, tails: f64) {
        self.alpha += heads;
        self.beta += tails;
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Mode of the distribution
    pub fn map(&self) -> f64 {
        let a = self.alpha - 1.0;
        let b = self.beta - 1.0;
        a / (a + b)
    }

    fn sampler(&self) -> Result<rand_distr::Beta<f64>> {
        rand_distr::Beta::new(self.alpha, self.beta).map_err(|e| Error::parameter("beta", e))
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        Ok(self.sampler()?.sample(rng))
    }

    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>> {
        let dist = self.sampler()?;
        Ok((0..n).map(|_| dist.sample(rng)).collect())
    }

    /// Unnormalized density at `x`
    pub fn eval_pdf(&self, x: f64) -> f64 {
        x.powf(self.alpha - 1.0) * (1.0 - x).powf(self.beta - 1.0)
    }

    /// Discrete approximation over `steps` evenly spaced points in [0, 1]
    ///
    /// With either shape below 1 the density is unbounded at an edge, so
    /// masses come from differencing the CDF instead.
    pub fn make_pmf(&self, steps: usize) -> Result<Pmf<Real>> {
        let pmf = if self.alpha < 1.0 || self.beta < 1.0 {
            debug!(alpha = self.alpha, beta = self.beta, "discretising beta through its cdf");
            self.make_cdf(steps)?.make_pmf()?
        } else {
            let xs = linspace(0.0, 1.0, steps);
            Pmf::from_items(xs.into_iter().map(|x| (real(x), self.eval_pdf(x))))?
        };
        Ok(match &self.label {
            Some(label) => pmf.with_label(label.clone()),
            None => pmf,
        })
    }

    /// Regularized incomplete beta evaluated at `steps` points in [0, 1]
    pub fn make_cdf(&self, steps: usize) -> Result<Cdf<Real>> {
        let xs = linspace(0.0, 1.0, steps);
        let ps = xs.iter().map(|&x| beta_reg(self.alpha, self.beta, x)).collect();
        Cdf::from_parts(reals(&xs), ps)
    }

    /// Value at percentile `p` in [0, 100]
    pub fn percentile(&self, p: f64) -> Result<f64> {
        Error::check_percentage(p)?;
        let dist = statrs::distribution::Beta::new(self.alpha, self.beta)
            .map_err(|e| Error::parameter("beta", e))?;
        Ok(dist.inverse_cdf(p / 100.0))
    }

    pub fn percentiles(&self, ps: &[f64]) -> Result<Vec<f64>> {
        ps.iter().map(|&p| self.percentile(p)).collect()
    }
}

/// Dirichlet distribution over `n` category prevalences
#[derive(Debug, Clone, PartialEq)]
pub struct Dirichlet {
    params: Vec<f64>,
    label: Option<String>,
}

impl Dirichlet {
    /// `n` dimensions sharing concentration `conc`; fewer than two
    /// dimensions is a domain error
    pub fn new(n: usize, conc: f64) -> Result<Self> {
        if n < 2 {
            return Err(Error::Domain(format!(
                "a Dirichlet needs at least 2 dimensions, got {n}"
            )));
        }
        if !(conc > 0.0) {
            return Err(Error::parameter(
                "dirichlet",
                format!("concentration must be positive, got {conc}"),
            ));
        }
        Ok(Self {
            params: vec![conc; n],
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn n(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Add observed counts to the leading parameters
    pub fn update(&mut self, data: &[f64]) -> Result<()> {
        if data.len() > self.params.len() {
            return Err(Error::size_mismatch(
                self.params.len(),
                data.len(),
                "dirichlet update",
            ));
        }
        for (param, x) in self.params.iter_mut().zip(data) {
            *param += x;
        }
        Ok(())
    }

    /// One normalized vector of prevalences
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<f64>> {
        let mut draws = Vec::with_capacity(self.params.len());
        for &shape in &self.params {
            let gamma =
                rand_distr::Gamma::new(shape, 1.0).map_err(|e| Error::parameter("dirichlet", e))?;
            draws.push(gamma.sample(rng));
        }
        let total: f64 = draws.iter().sum();
        Ok(draws.into_iter().map(|g| g / total).collect())
    }

    /// Likelihood of category counts under one random prevalence vector;
    /// zero when there are more counts than categories
    pub fn likelihood<R: Rng + ?Sized>(&self, data: &[f64], rng: &mut R) -> Result<f64> {
        if data.len() > self.n() {
            return Ok(0.0);
        }
        let p = self.random(rng)?;
        Ok(p.iter().zip(data).map(|(pi, x)| pi.powf(*x)).product())
    }

    pub fn log_likelihood<R: Rng + ?Sized>(&self, data: &[f64], rng: &mut R) -> Result<f64> {
        if data.len() > self.n() {
            return Ok(f64::NEG_INFINITY);
        }
        let p = self.random(rng)?;
        Ok(p.iter().zip(data).map(|(pi, x)| pi.ln() * x).sum())
    }

    /// Marginal distribution of prevalence `i`
    pub fn marginal_beta(&self, i: usize) -> Result<Beta> {
        let alpha0: f64 = self.params.iter().sum();
        let alpha = *self.params.get(i).ok_or_else(|| {
            Error::OutOfRange(format!("dimension {i} of a {}-dimensional dirichlet", self.n()))
        })?;
        Beta::new(alpha, alpha0 - alpha)
    }

    /// Mean prevalence of each category, keyed by `xs`
    pub fn predictive_pmf<K: Key>(&self, xs: &[K]) -> Result<Pmf<K>> {
        let alpha0: f64 = self.params.iter().sum();
        let pmf = Pmf::from_items(
            xs.iter()
                .cloned()
                .zip(self.params.iter().map(|a| a / alpha0)),
        )?;
        Ok(match &self.label {
            Some(label) => pmf.with_label(label.clone()),
            None => pmf,
        })
    }
}
