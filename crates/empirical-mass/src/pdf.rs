//! Continuous densities and their discretisation
//!
//! A [`Pdf`] only has to know how to evaluate itself. Rendering and
//! conversion to a [`Pmf`] over [`Real`] keys are provided on top of
//! [`Pdf::density`], evaluated over a [`RenderDomain`].

use crate::pmf::Pmf;
use empirical_core::stats;
use empirical_core::{linspace, real, Error, Real, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::Distribution;
use statrs::distribution::{Continuous, Exp, Normal};
use std::f64::consts::PI;

/// Points at which a density is evaluated
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderDomain {
    /// The density's own plotting range, see [`Pdf::linspace`]
    #[default]
    Default,
    /// `n` evenly spaced points over `[low, high]`, both ends included
    Range { low: f64, high: f64, n: usize },
    /// Explicit evaluation points
    Points(Vec<f64>),
}

impl RenderDomain {
    pub fn range(low: f64, high: f64, n: usize) -> Self {
        RenderDomain::Range { low, high, n }
    }
}

/// Probability density function
pub trait Pdf {
    /// Density at `x`
    fn density(&self, x: f64) -> f64;

    /// Natural plotting range for this density
    fn linspace(&self) -> Result<Vec<f64>> {
        Err(Error::unimplemented("Pdf::linspace"))
    }

    fn label(&self) -> Option<&str> {
        None
    }

    fn densities(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.density(x)).collect()
    }

    /// Evaluation points paired with densities
    fn render(&self, domain: &RenderDomain) -> Result<(Vec<f64>, Vec<f64>)> {
        let xs = match domain {
            RenderDomain::Default => self.linspace()?,
            RenderDomain::Range { low, high, n } => linspace(*low, *high, *n),
            RenderDomain::Points(xs) => xs.clone(),
        };
        let ds = self.densities(&xs);
        Ok((xs, ds))
    }

    /// `(x, density)` pairs over the default range
    fn items(&self) -> Result<Vec<(f64, f64)>> {
        let (xs, ds) = self.render(&RenderDomain::Default)?;
        Ok(xs.into_iter().zip(ds).collect())
    }

    /// Normalized discrete approximation, treating densities as masses
    fn make_pmf(&self, domain: &RenderDomain) -> Result<Pmf<Real>> {
        let (xs, ds) = self.render(domain)?;
        let pmf = Pmf::from_items(xs.into_iter().map(real).zip(ds))?;
        Ok(match self.label() {
            Some(label) => pmf.with_label(label),
            None => pmf,
        })
    }
}

/// Density of a normal distribution
#[derive(Debug, Clone)]
pub struct NormalPdf {
    mu: f64,
    sigma: f64,
    dist: Normal,
    label: Option<String>,
}

impl NormalPdf {
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        let dist = Normal::new(mu, sigma).map_err(|e| Error::parameter("normal pdf", e))?;
        Ok(Self {
            mu,
            sigma,
            dist,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Pdf for NormalPdf {
    fn density(&self, x: f64) -> f64 {
        self.dist.pdf(x)
    }

    /// Three standard deviations either side of the mean
    fn linspace(&self) -> Result<Vec<f64>> {
        Ok(linspace(
            self.mu - 3.0 * self.sigma,
            self.mu + 3.0 * self.sigma,
            101,
        ))
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Density of an exponential distribution with rate `lam`
#[derive(Debug, Clone)]
pub struct ExponentialPdf {
    lam: f64,
    dist: Exp,
    label: Option<String>,
}

impl ExponentialPdf {
    pub fn new(lam: f64) -> Result<Self> {
        let dist = Exp::new(lam).map_err(|e| Error::parameter("exponential pdf", e))?;
        Ok(Self {
            lam,
            dist,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn lam(&self) -> f64 {
        self.lam
    }
}

impl Pdf for ExponentialPdf {
    fn density(&self, x: f64) -> f64 {
        self.dist.pdf(x)
    }

    fn linspace(&self) -> Result<Vec<f64>> {
        Ok(linspace(0.0, 5.0 / self.lam, 101))
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Gaussian kernel density estimate of a sample
///
/// The bandwidth follows Scott's rule: the sample standard deviation
/// (`ddof = 1`) times `n^(-1/5)`.
#[derive(Debug, Clone)]
pub struct EstimatedPdf {
    sample: Vec<f64>,
    bandwidth: f64,
    linspace: Vec<f64>,
    label: Option<String>,
}

impl EstimatedPdf {
    pub fn new(sample: &[f64]) -> Result<Self> {
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite("kernel density sample"));
        }
        let sd = stats::std(sample, 1)?;
        if sd == 0.0 {
            return Err(Error::Domain(
                "kernel density of a constant sample is singular".to_string(),
            ));
        }
        let bandwidth = sd * (sample.len() as f64).powf(-0.2);
        let low = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let high = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            sample: sample.to_vec(),
            bandwidth,
            linspace: linspace(low, high, 101),
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// `n` draws from the smoothed distribution: a random data point plus
    /// kernel noise
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>> {
        let noise = rand_distr::Normal::new(0.0, self.bandwidth)
            .map_err(|e| Error::parameter("kernel noise", e))?;
        (0..n)
            .map(|_| {
                let center = self
                    .sample
                    .choose(rng)
                    .ok_or_else(|| Error::empty_input("kernel density sample"))?;
                Ok(center + noise.sample(rng))
            })
            .collect()
    }
}

impl Pdf for EstimatedPdf {
    fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.sample.len() as f64 * h * (2.0 * PI).sqrt());
        let sum: f64 = self
            .sample
            .iter()
            .map(|xi| {
                let z = (x - xi) / h;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }

    fn linspace(&self) -> Result<Vec<f64>> {
        Ok(self.linspace.clone())
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
