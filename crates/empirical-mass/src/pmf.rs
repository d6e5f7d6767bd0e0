//! Probability mass functions and their algebra
//!
//! A [`Pmf`] is a [`WeightedMap`] with `f64` weights. Built from a non-empty
//! raw sample it is normalized to sum to 1; [`Pmf::from_map`] wraps a map
//! untouched when the caller wants to keep raw weights.
//!
//! # Algebra
//!
//! `&a + &b`, `&a - &b`, `&a * &b` and `&a / &b` compute the distribution of
//! the arithmetic result on independent draws: every pair `(v1, p1)`,
//! `(v2, p2)` contributes `p1 * p2` to the key `v1 op v2`. The result is not
//! renormalized. With a scalar on the right the keys are shifted or scaled.
//!
//! ```rust
//! use empirical_mass::Pmf;
//!
//! let die = Pmf::from_values(1..=6i64);
//! let two_dice = &die + &die;
//! assert!((two_dice.prob(&7) - 6.0 / 36.0).abs() < 1e-12);
//! ```

use crate::cdf::Cdf;
use crate::hist::Hist;
use crate::weighted::WeightedMap;
use empirical_core::{Error, Key, Numeric, Real, Result};
use ordered_float::OrderedFloat;
use rand::Rng;
use std::ops::{Add, Deref, DerefMut, Div, Mul, Sub};

/// Map from values to probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct Pmf<K: Key> {
    map: WeightedMap<K, f64>,
}

impl<K: Key> Default for Pmf<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> Pmf<K> {
    pub fn new() -> Self {
        Self {
            map: WeightedMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.map = self.map.with_label(label);
        self
    }

    /// Wrap a map as-is, without normalizing
    pub fn from_map(map: WeightedMap<K, f64>) -> Self {
        Self { map }
    }

    /// Normalized relative frequencies of a raw sample
    pub fn from_values<I: IntoIterator<Item = K>>(values: I) -> Self {
        let mut map: WeightedMap<K, f64> = WeightedMap::from_values(values);
        // tallied counts are positive, so the total is zero only when empty
        let n = map.total();
        if n > 0.0 {
            for (_, w) in map.iter_mut() {
                *w /= n;
            }
        }
        Self { map }
    }

    /// Normalized distribution from `(value, weight)` pairs
    pub fn from_items<I: IntoIterator<Item = (K, f64)>>(items: I) -> Result<Self> {
        let mut map = WeightedMap::from_items(items);
        if !map.is_empty() {
            map.normalize()?;
        }
        Ok(Self { map })
    }

    /// Normalized distribution from a histogram, keeping its label
    pub fn from_hist(hist: &Hist<K>) -> Result<Self> {
        let mut map: WeightedMap<K, f64> =
            WeightedMap::from_items(hist.iter().map(|(k, &f)| (k.clone(), f as f64)));
        map.set_label(hist.label().map(str::to_string));
        if !map.is_empty() {
            map.normalize()?;
        }
        Ok(Self { map })
    }

    pub fn as_map(&self) -> &WeightedMap<K, f64> {
        &self.map
    }

    pub fn into_map(self) -> WeightedMap<K, f64> {
        self.map
    }

    /// Probability of `x`, zero when absent
    pub fn prob(&self, x: &K) -> f64 {
        self.map.get(x)
    }

    pub fn probs(&self, xs: &[K]) -> Vec<f64> {
        xs.iter().map(|x| self.prob(x)).collect()
    }

    /// Probability that a draw equals a draw from `other`
    pub fn prob_equal_pmf(&self, other: &Pmf<K>) -> f64 {
        self.map
            .iter()
            .map(|(v, p)| p * other.prob(v))
            .sum()
    }

    /// Pushforward of `op` over independent pairs of draws
    pub fn combine<F>(&self, other: &Pmf<K>, op: F) -> Pmf<K>
    where
        F: Fn(&K, &K) -> K,
    {
        let mut out = Pmf::new();
        for (v1, p1) in self.map.iter() {
            for (v2, p2) in other.map.iter() {
                out.map.incr(op(v1, v2), p1 * p2);
            }
        }
        out
    }

    /// Apply `op` to every key, summing collisions
    pub fn map_keys<F>(&self, op: F) -> Pmf<K>
    where
        F: Fn(&K) -> K,
    {
        let mut out = Pmf::new();
        for (v, &p) in self.map.iter() {
            out.map.incr(op(v), p);
        }
        out.map.set_label(self.map.label().map(str::to_string));
        out
    }

    pub fn add_pmf(&self, other: &Pmf<K>) -> Pmf<K>
    where
        K: Add<Output = K>,
    {
        self.combine(other, |a, b| a.clone() + b.clone())
    }

    pub fn sub_pmf(&self, other: &Pmf<K>) -> Pmf<K>
    where
        K: Sub<Output = K>,
    {
        self.combine(other, |a, b| a.clone() - b.clone())
    }

    pub fn mul_pmf(&self, other: &Pmf<K>) -> Pmf<K>
    where
        K: Mul<Output = K>,
    {
        self.combine(other, |a, b| a.clone() * b.clone())
    }

    /// Distribution of the ratio; integer keys panic on a zero divisor as
    /// integer division does
    pub fn div_pmf(&self, other: &Pmf<K>) -> Pmf<K>
    where
        K: Div<Output = K>,
    {
        self.combine(other, |a, b| a.clone() / b.clone())
    }

    pub fn add_constant(&self, c: K) -> Pmf<K>
    where
        K: Add<Output = K>,
    {
        self.map_keys(|v| v.clone() + c.clone())
    }

    pub fn mul_constant(&self, c: K) -> Pmf<K>
    where
        K: Mul<Output = K>,
    {
        self.map_keys(|v| v.clone() * c.clone())
    }
}

impl<K: Key + PartialOrd> Pmf<K> {
    /// `P(X > x)`
    pub fn prob_greater(&self, x: &K) -> f64 {
        self.map.iter().filter(|(v, _)| *v > x).map(|(_, p)| p).sum()
    }

    /// `P(X < x)`
    pub fn prob_less(&self, x: &K) -> f64 {
        self.map.iter().filter(|(v, _)| *v < x).map(|(_, p)| p).sum()
    }

    /// Probability that a draw exceeds an independent draw from `other`
    pub fn prob_greater_pmf(&self, other: &Pmf<K>) -> f64 {
        self.pairwise(other, |a, b| a > b)
    }

    /// Probability that a draw is below an independent draw from `other`
    pub fn prob_less_pmf(&self, other: &Pmf<K>) -> f64 {
        self.pairwise(other, |a, b| a < b)
    }

    fn pairwise<F: Fn(&K, &K) -> bool>(&self, other: &Pmf<K>, pred: F) -> f64 {
        let mut total = 0.0;
        for (v1, p1) in self.map.iter() {
            for (v2, p2) in other.map.iter() {
                if pred(v1, v2) {
                    total += p1 * p2;
                }
            }
        }
        total
    }
}

impl<K: Key + Ord> Pmf<K> {
    /// Cumulative distribution with the same law
    pub fn make_cdf(&self) -> Result<Cdf<K>> {
        Cdf::from_pmf(self)
    }

    /// One draw by walking the cumulative weight in key order
    ///
    /// Fails if the weights sum to less than the draw, which only happens
    /// when the map was not normalized.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K> {
        let target: f64 = rng.gen();
        let mut total = 0.0;
        for (x, p) in self.map.sorted_items() {
            total += p;
            if total >= target {
                return Ok(x);
            }
        }
        Err(Error::InvariantViolation(format!(
            "random draw {target} exceeds total probability {total}; pmf may not be normalized"
        )))
    }

    /// `n` draws through the CDF
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<K>> {
        self.make_cdf()?.sample(n, rng)
    }

    /// Smallest value whose cumulative probability reaches `percentage / 100`
    pub fn percentile(&self, percentage: f64) -> Result<K> {
        self.make_cdf()?.percentile(percentage)
    }

    pub fn median(&self) -> Result<K> {
        self.make_cdf()?.percentile(50.0)
    }

    /// Value with the highest probability; ties go to the larger value
    pub fn mode(&self) -> Result<K> {
        self.map
            .iter()
            .max_by(|a, b| (OrderedFloat(*a.1), a.0).cmp(&(OrderedFloat(*b.1), b.0)))
            .map(|(k, _)| k.clone())
            .ok_or_else(|| Error::empty_input("mode"))
    }

    /// Maximum a-posteriori value, the mode of a posterior
    pub fn map_estimate(&self) -> Result<K> {
        self.mode()
    }

    /// Peak of a likelihood-only distribution
    pub fn maximum_likelihood(&self) -> Result<K> {
        self.mode()
    }

    /// Central interval holding `percentage` percent of the mass
    pub fn credible_interval(&self, percentage: f64) -> Result<(K, K)> {
        self.make_cdf()?.credible_interval(percentage)
    }

    /// CDF of the maximum of `k` independent draws
    pub fn max(&self, k: i32) -> Result<Cdf<K>> {
        Ok(self.make_cdf()?.max(k))
    }
}

impl<K: Key + Numeric> Pmf<K> {
    pub fn mean(&self) -> f64 {
        self.map.iter().map(|(x, p)| p * x.to_f64()).sum()
    }

    /// Variance around `mu`, or around the mean when `None`
    pub fn var(&self, mu: Option<f64>) -> f64 {
        let mu = mu.unwrap_or_else(|| self.mean());
        self.map
            .iter()
            .map(|(x, p)| {
                let d = x.to_f64() - mu;
                p * d * d
            })
            .sum()
    }

    pub fn std(&self, mu: Option<f64>) -> f64 {
        self.var(mu).sqrt()
    }

    /// Expectation of `func(x)`
    pub fn expect<F: Fn(f64) -> f64>(&self, func: F) -> f64 {
        self.map.iter().map(|(x, p)| p * func(x.to_f64())).sum()
    }
}

impl<K: Key> From<WeightedMap<K, f64>> for Pmf<K> {
    fn from(map: WeightedMap<K, f64>) -> Self {
        Self::from_map(map)
    }
}

impl<K: Key> FromIterator<K> for Pmf<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<K: Key> Deref for Pmf<K> {
    type Target = WeightedMap<K, f64>;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl<K: Key> DerefMut for Pmf<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.map
    }
}

macro_rules! pmf_binary_op {
    ($trait:ident, $method:ident, $pmf_fn:ident) => {
        impl<'a, K: Key + $trait<Output = K>> $trait<&'a Pmf<K>> for &'a Pmf<K> {
            type Output = Pmf<K>;

            fn $method(self, rhs: &'a Pmf<K>) -> Pmf<K> {
                self.$pmf_fn(rhs)
            }
        }
    };
}

pmf_binary_op!(Add, add, add_pmf);
pmf_binary_op!(Sub, sub, sub_pmf);
pmf_binary_op!(Mul, mul, mul_pmf);
pmf_binary_op!(Div, div, div_pmf);

// A scalar right-hand side shifts or scales the keys.
macro_rules! pmf_scalar_ops {
    ($($t:ty),*) => {
        $(
            impl Add<$t> for &Pmf<$t> {
                type Output = Pmf<$t>;

                fn add(self, rhs: $t) -> Pmf<$t> {
                    self.map_keys(|&v| v + rhs)
                }
            }

            impl Sub<$t> for &Pmf<$t> {
                type Output = Pmf<$t>;

                fn sub(self, rhs: $t) -> Pmf<$t> {
                    self.map_keys(|&v| v - rhs)
                }
            }

            impl Mul<$t> for &Pmf<$t> {
                type Output = Pmf<$t>;

                fn mul(self, rhs: $t) -> Pmf<$t> {
                    self.map_keys(|&v| v * rhs)
                }
            }

            impl Div<$t> for &Pmf<$t> {
                type Output = Pmf<$t>;

                fn div(self, rhs: $t) -> Pmf<$t> {
                    self.map_keys(|&v| v / rhs)
                }
            }
        )*
    };
}

pmf_scalar_ops!(i32, i64, u32, u64, usize, Real);
