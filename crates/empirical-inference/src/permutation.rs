//! Permutation tests on two groups and on paired sequences

use crate::hypothesis::HypothesisTest;
use empirical_core::stats::{corr, mean, std};
use empirical_core::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Two groups of observations
pub type Groups = (Vec<f64>, Vec<f64>);

/// Both groups pooled, remembering the size of the first
#[derive(Debug, Clone, Default)]
struct Pool {
    values: Vec<f64>,
    n: usize,
}

impl Pool {
    fn build(groups: &Groups) -> Result<Self> {
        let (group1, group2) = groups;
        if group1.is_empty() || group2.is_empty() {
            return Err(Error::empty_input("permutation groups"));
        }
        let mut values = Vec::with_capacity(group1.len() + group2.len());
        values.extend_from_slice(group1);
        values.extend_from_slice(group2);
        Ok(Self {
            values,
            n: group1.len(),
        })
    }

    /// Shuffle the pool and split it back into groups of the original sizes
    fn relabel<R: Rng + ?Sized>(&self, rng: &mut R) -> Groups {
        let mut shuffled = self.values.clone();
        shuffled.shuffle(rng);
        let rest = shuffled.split_off(self.n);
        (shuffled, rest)
    }
}

/// Two-sided test of a difference in means
#[derive(Debug, Clone, Default)]
pub struct DiffMeansPermute {
    pool: Pool,
}

impl DiffMeansPermute {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for DiffMeansPermute {
    type Data = Groups;

    fn make_model(&mut self, data: &Groups) -> Result<()> {
        self.pool = Pool::build(data)?;
        Ok(())
    }

    fn test_statistic(&self, (group1, group2): &Groups) -> Result<f64> {
        Ok((mean(group1) - mean(group2)).abs())
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Groups> {
        Ok(self.pool.relabel(rng))
    }
}

/// One-sided test that the first group has the larger mean
#[derive(Debug, Clone, Default)]
pub struct DiffMeansOneSided {
    pool: Pool,
}

impl DiffMeansOneSided {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for DiffMeansOneSided {
    type Data = Groups;

    fn make_model(&mut self, data: &Groups) -> Result<()> {
        self.pool = Pool::build(data)?;
        Ok(())
    }

    fn test_statistic(&self, (group1, group2): &Groups) -> Result<f64> {
        Ok(mean(group1) - mean(group2))
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Groups> {
        Ok(self.pool.relabel(rng))
    }
}

/// One-sided test that the first group has the larger standard deviation
#[derive(Debug, Clone, Default)]
pub struct DiffStdPermute {
    pool: Pool,
}

impl DiffStdPermute {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for DiffStdPermute {
    type Data = Groups;

    fn make_model(&mut self, data: &Groups) -> Result<()> {
        self.pool = Pool::build(data)?;
        Ok(())
    }

    fn test_statistic(&self, (group1, group2): &Groups) -> Result<f64> {
        Ok(std(group1, 0)? - std(group2, 0)?)
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Groups> {
        Ok(self.pool.relabel(rng))
    }
}

/// Two-sided test of correlation between paired sequences
///
/// The null model permutes `xs` and keeps `ys` in place.
#[derive(Debug, Clone, Default)]
pub struct CorrelationPermute {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CorrelationPermute {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for CorrelationPermute {
    type Data = (Vec<f64>, Vec<f64>);

    fn make_model(&mut self, (xs, ys): &Self::Data) -> Result<()> {
        if xs.len() != ys.len() {
            return Err(Error::size_mismatch(xs.len(), ys.len(), "paired sequences"));
        }
        self.xs = xs.clone();
        self.ys = ys.clone();
        Ok(())
    }

    fn test_statistic(&self, (xs, ys): &Self::Data) -> Result<f64> {
        Ok(corr(xs, ys)?.abs())
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Data> {
        let mut xs = self.xs.clone();
        xs.shuffle(rng);
        Ok((xs, self.ys.clone()))
    }
}
