//! Cumulative distribution functions
//!
//! A [`Cdf`] stores sorted values alongside their cumulative probabilities.
//! Forward lookup ([`Cdf::prob`]) and inverse lookup ([`Cdf::value`]) are
//! both binary searches, which makes the CDF the preferred path for repeated
//! sampling.

use crate::hist::Hist;
use crate::pmf::Pmf;
use crate::weighted::WeightedMap;
use empirical_core::{Error, Key, Numeric, Result, Weight};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};
use tracing::{instrument, warn};

/// Sorted values and non-decreasing cumulative probabilities ending at 1
///
/// Equality compares `xs` and `ps` only; labels are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cdf<K> {
    xs: Vec<K>,
    ps: Vec<f64>,
    label: Option<String>,
}

impl<K> Default for Cdf<K> {
    fn default() -> Self {
        Self {
            xs: Vec::new(),
            ps: Vec::new(),
            label: None,
        }
    }
}

impl<K: Key + Ord> Cdf<K> {
    /// Empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap precomputed values and cumulative probabilities
    pub fn from_parts(xs: Vec<K>, ps: Vec<f64>) -> Result<Self> {
        if xs.len() != ps.len() {
            return Err(Error::size_mismatch(xs.len(), ps.len(), "cdf parts"));
        }
        if xs.windows(2).any(|w| w[0] > w[1]) || ps.windows(2).any(|w| w[0] > w[1]) {
            warn!(n = xs.len(), "cdf parts are not sorted; lookups may be wrong");
        }
        Ok(Self { xs, ps, label: None })
    }

    /// Accumulate a weighted map into a CDF
    ///
    /// Keys are sorted ascending and weights summed into a running total,
    /// then divided by the final total.
    #[instrument(level = "debug", skip(map), fields(n = map.len()))]
    pub fn from_map<W: Weight>(map: &WeightedMap<K, W>) -> Result<Self> {
        let label = map.label().map(str::to_string);
        if map.is_empty() {
            return Ok(Self {
                label,
                ..Self::default()
            });
        }
        let items = map.sorted_items();
        let mut xs = Vec::with_capacity(items.len());
        let mut ps = Vec::with_capacity(items.len());
        let mut running = 0.0;
        for (x, w) in items {
            running += w.to_f64();
            xs.push(x);
            ps.push(running);
        }
        if running == 0.0 {
            return Err(Error::zero_total("cdf"));
        }
        for p in &mut ps {
            *p /= running;
        }
        Ok(Self { xs, ps, label })
    }

    /// CDF of a raw sample
    pub fn from_values<I: IntoIterator<Item = K>>(values: I) -> Result<Self> {
        Self::from_map(Hist::from_values(values).as_map())
    }

    /// CDF of `(value, frequency)` pairs
    pub fn from_items<I: IntoIterator<Item = (K, f64)>>(items: I) -> Result<Self> {
        Self::from_map(&WeightedMap::from_items(items))
    }

    pub fn from_hist(hist: &Hist<K>) -> Result<Self> {
        Self::from_map(hist.as_map())
    }

    pub fn from_pmf(pmf: &Pmf<K>) -> Result<Self> {
        Self::from_map(pmf.as_map())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Sorted values
    pub fn xs(&self) -> &[K] {
        &self.xs
    }

    /// Cumulative probabilities
    pub fn ps(&self) -> &[f64] {
        &self.ps
    }

    /// Copy, optionally relabelled
    pub fn copy(&self, label: Option<&str>) -> Self {
        let mut new = self.clone();
        if let Some(label) = label {
            new.label = Some(label.to_string());
        }
        new
    }

    /// Per-value probabilities recovered by differencing
    pub fn items(&self) -> Vec<(K, f64)> {
        let mut prev = 0.0;
        self.xs
            .iter()
            .zip(&self.ps)
            .map(|(x, &p)| {
                let mass = p - prev;
                prev = p;
                (x.clone(), mass)
            })
            .collect()
    }

    /// Probability mass function with the same law, normalized
    pub fn make_pmf(&self) -> Result<Pmf<K>> {
        let mut pmf = Pmf::from_map(WeightedMap::from_items(self.items()));
        if !pmf.is_empty() {
            pmf.normalize()?;
        }
        pmf.set_label(self.label.clone());
        Ok(pmf)
    }

    /// New CDF with `term` added to every value
    pub fn shift(&self, term: K) -> Self
    where
        K: Add<Output = K>,
    {
        Self {
            xs: self.xs.iter().map(|x| x.clone() + term.clone()).collect(),
            ps: self.ps.clone(),
            label: self.label.clone(),
        }
    }

    /// New CDF with every value multiplied by `factor`
    pub fn scale(&self, factor: K) -> Self
    where
        K: Mul<Output = K>,
    {
        Self {
            xs: self.xs.iter().map(|x| x.clone() * factor.clone()).collect(),
            ps: self.ps.clone(),
            label: self.label.clone(),
        }
    }

    /// `P(X <= x)` as a step function; 0 below the smallest value
    pub fn prob(&self, x: &K) -> f64 {
        let index = self.xs.partition_point(|v| v <= x);
        if index == 0 {
            0.0
        } else {
            self.ps[index - 1]
        }
    }

    pub fn probs(&self, xs: &[K]) -> Vec<f64> {
        xs.iter().map(|x| self.prob(x)).collect()
    }

    /// Smallest value whose cumulative probability reaches `p`
    pub fn value(&self, p: f64) -> Result<K> {
        Error::check_probability(p)?;
        if self.is_empty() {
            return Err(Error::empty_input("cdf value"));
        }
        let index = self.ps.partition_point(|&q| q < p);
        self.xs.get(index).cloned().ok_or_else(|| {
            Error::InvariantViolation(format!(
                "cumulative probabilities end below {p}; cdf is not normalized"
            ))
        })
    }

    /// Inverse CDF at each probability
    pub fn values(&self, ps: &[f64]) -> Result<Vec<K>> {
        ps.iter().map(|&p| self.value(p)).collect()
    }

    /// Value at percentile `p` in [0, 100]
    pub fn percentile(&self, p: f64) -> Result<K> {
        Error::check_percentage(p)?;
        self.value(p / 100.0)
    }

    pub fn percentiles(&self, ps: &[f64]) -> Result<Vec<K>> {
        ps.iter().map(|&p| self.percentile(p)).collect()
    }

    /// Percentile rank of `x` in [0, 100]
    pub fn percentile_rank(&self, x: &K) -> f64 {
        self.prob(x) * 100.0
    }

    pub fn percentile_ranks(&self, xs: &[K]) -> Vec<f64> {
        xs.iter().map(|x| self.percentile_rank(x)).collect()
    }

    /// One draw by inverse transform
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K> {
        self.value(rng.gen::<f64>())
    }

    /// `n` independent draws by inverse transform
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<K>> {
        (0..n).map(|_| self.random(rng)).collect()
    }

    pub fn median(&self) -> Result<K> {
        self.value(0.5)
    }

    /// 25th and 75th percentiles
    pub fn iqr(&self) -> Result<(K, K)> {
        Ok((self.value(0.25)?, self.value(0.75)?))
    }

    /// Central interval holding `percentage` percent of the mass
    pub fn credible_interval(&self, percentage: f64) -> Result<(K, K)> {
        Error::check_percentage(percentage)?;
        let prob = (1.0 - percentage / 100.0) / 2.0;
        Ok((self.value(prob)?, self.value(1.0 - prob)?))
    }

    /// Staircase points for plotting: each value appears twice, first at
    /// the previous cumulative level then at its own
    pub fn render(&self) -> (Vec<K>, Vec<f64>) {
        let mut xs = Vec::with_capacity(2 * self.len());
        let mut ps = Vec::with_capacity(2 * self.len());
        let mut prev = 0.0;
        for (x, &p) in self.xs.iter().zip(&self.ps) {
            xs.push(x.clone());
            ps.push(prev);
            xs.push(x.clone());
            ps.push(p);
            prev = p;
        }
        (xs, ps)
    }

    /// CDF of the maximum of `k` independent draws
    pub fn max(&self, k: i32) -> Self {
        Self {
            xs: self.xs.clone(),
            ps: self.ps.iter().map(|p| p.powi(k)).collect(),
            label: self.label.clone(),
        }
    }
}

impl<K: Key + Ord + Numeric> Cdf<K> {
    /// Mean of the distribution
    pub fn mean(&self) -> f64 {
        self.items()
            .into_iter()
            .map(|(x, p)| p * x.to_f64())
            .sum()
    }
}

impl<K: PartialEq> PartialEq for Cdf<K> {
    fn eq(&self, other: &Self) -> bool {
        self.xs == other.xs && self.ps == other.ps
    }
}
