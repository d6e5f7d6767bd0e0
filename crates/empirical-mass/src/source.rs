//! Construction sources and draws across distributions

use crate::cdf::Cdf;
use crate::hist::Hist;
use crate::pmf::Pmf;
use crate::weighted::WeightedMap;
use empirical_core::{Error, Key, Result};
use rand::Rng;
use std::ops::Add;

/// Anything a [`Pmf`] or [`Cdf`] can be built from
#[derive(Debug, Clone)]
pub enum Source<K: Key> {
    /// Raw sample, tallied
    Values(Vec<K>),
    /// `(value, weight)` pairs
    Items(Vec<(K, f64)>),
    Hist(Hist<K>),
    Pmf(Pmf<K>),
    Cdf(Cdf<K>),
}

impl<K: Key> From<Vec<K>> for Source<K> {
    fn from(values: Vec<K>) -> Self {
        Source::Values(values)
    }
}

impl<K: Key> From<Hist<K>> for Source<K> {
    fn from(hist: Hist<K>) -> Self {
        Source::Hist(hist)
    }
}

impl<K: Key> From<Pmf<K>> for Source<K> {
    fn from(pmf: Pmf<K>) -> Self {
        Source::Pmf(pmf)
    }
}

impl<K: Key> From<Cdf<K>> for Source<K> {
    fn from(cdf: Cdf<K>) -> Self {
        Source::Cdf(cdf)
    }
}

impl<K: Key + Ord> Pmf<K> {
    /// Build from any [`Source`]
    ///
    /// Raw values, items and histograms are normalized. A `Pmf` source is
    /// copied unchanged and a `Cdf` source is differenced back into masses.
    pub fn from_source(source: impl Into<Source<K>>) -> Result<Self> {
        match source.into() {
            Source::Values(values) => Ok(Pmf::from_values(values)),
            Source::Items(items) => Pmf::from_items(items),
            Source::Hist(hist) => Pmf::from_hist(&hist),
            Source::Pmf(pmf) => Ok(pmf),
            Source::Cdf(cdf) => cdf.make_pmf(),
        }
    }
}

impl<K: Key + Ord> Cdf<K> {
    /// Build from any [`Source`]
    pub fn from_source(source: impl Into<Source<K>>) -> Result<Self> {
        match source.into() {
            Source::Values(values) => Cdf::from_values(values),
            Source::Items(items) => Cdf::from_map(&WeightedMap::from_items(items)),
            Source::Hist(hist) => Cdf::from_hist(&hist),
            Source::Pmf(pmf) => Cdf::from_pmf(&pmf),
            Source::Cdf(cdf) => Ok(cdf),
        }
    }
}

/// Distributions that can produce a single random draw
pub trait Sampler<K> {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K>;
}

impl<K: Key + Ord> Sampler<K> for Pmf<K> {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K> {
        self.random(rng)
    }
}

impl<K: Key + Ord> Sampler<K> for Cdf<K> {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<K> {
        self.random(rng)
    }
}

/// Sum of one draw from each distribution
pub fn random_sum<K, D, R>(dists: &[D], rng: &mut R) -> Result<K>
where
    K: Add<Output = K>,
    D: Sampler<K>,
    R: Rng + ?Sized,
{
    let (first, rest) = dists
        .split_first()
        .ok_or_else(|| Error::empty_input("random_sum"))?;
    let mut total = first.draw(rng)?;
    for dist in rest {
        total = total + dist.draw(rng)?;
    }
    Ok(total)
}

/// Distribution of `n` sampled sums
pub fn sample_sum<K, D, R>(dists: &[D], n: usize, rng: &mut R) -> Result<Pmf<K>>
where
    K: Key + Add<Output = K>,
    D: Sampler<K>,
    R: Rng + ?Sized,
{
    let sums = (0..n)
        .map(|_| random_sum(dists, rng))
        .collect::<Result<Vec<K>>>()?;
    Ok(Pmf::from_values(sums))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pmf_from_every_source() {
        let values = vec![1i64, 2, 2];
        let from_values = Pmf::<i64>::from_source(values.clone()).unwrap();
        let from_hist = Pmf::<i64>::from_source(Hist::from_values(values.clone())).unwrap();
        let from_items =
            Pmf::<i64>::from_source(Source::Items(vec![(1, 1.0), (2, 2.0)])).unwrap();
        let from_cdf = Pmf::<i64>::from_source(Cdf::from_values(values).unwrap()).unwrap();

        for pmf in [&from_hist, &from_items, &from_cdf] {
            assert_abs_diff_eq!(pmf.prob(&2), from_values.prob(&2), epsilon = 1e-12);
        }
        assert_eq!(Pmf::<i64>::from_source(from_values.clone()).unwrap(), from_values);
    }

    #[test]
    fn test_cdf_from_every_source() {
        let expected = Cdf::from_values(vec![1i64, 2, 2]).unwrap();
        let from_pmf = Cdf::<i64>::from_source(Pmf::from_values(vec![1i64, 2, 2])).unwrap();
        assert_abs_diff_eq!(from_pmf.prob(&1), expected.prob(&1), epsilon = 1e-12);
        assert_eq!(Cdf::<i64>::from_source(expected.clone()).unwrap(), expected);
    }

    #[test]
    fn test_random_sum_of_point_masses() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dists = vec![Pmf::from_values(vec![2i64]), Pmf::from_values(vec![3i64])];
        assert_eq!(random_sum(&dists, &mut rng).unwrap(), 5);
        let empty: Vec<Pmf<i64>> = Vec::new();
        assert!(random_sum(&empty, &mut rng).is_err());
    }

    #[test]
    fn test_sample_sum_of_dice() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let die = Cdf::from_values(1..=6i64).unwrap();
        let sums = sample_sum(&[die.clone(), die], 2000, &mut rng).unwrap();
        assert_abs_diff_eq!(sums.total(), 1.0, epsilon = 1e-9);
        assert!((sums.mean() - 7.0).abs() < 0.2);
    }
}
