//! Goodness-of-fit tests against a fair coin, a fair die and a pooled
//! distribution of pregnancy lengths

use crate::hypothesis::HypothesisTest;
use empirical_core::{Error, Result};
use empirical_mass::{Hist, Pmf};
use rand::seq::SliceRandom;
use rand::Rng;

/// Fairness of a coin from `(heads, tails)` counts
///
/// The statistic is `|heads - tails|`.
#[derive(Debug, Clone, Default)]
pub struct CoinTest {
    n: u64,
}

impl CoinTest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for CoinTest {
    type Data = (u64, u64);

    fn make_model(&mut self, &(heads, tails): &(u64, u64)) -> Result<()> {
        self.n = heads + tails;
        Ok(())
    }

    fn test_statistic(&self, &(heads, tails): &(u64, u64)) -> Result<f64> {
        Ok(heads.abs_diff(tails) as f64)
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(u64, u64)> {
        let heads = (0..self.n).filter(|_| rng.gen_bool(0.5)).count() as u64;
        Ok((heads, self.n - heads))
    }
}

const FACES: [u32; 6] = [1, 2, 3, 4, 5, 6];

/// Simulated face counts for `n` rolls of a fair die
fn roll_counts<R: Rng + ?Sized>(n: u64, rng: &mut R) -> Result<Vec<u64>> {
    let mut hist = Hist::new();
    for _ in 0..n {
        let face = FACES
            .choose(rng)
            .ok_or_else(|| Error::empty_input("die faces"))?;
        hist.incr(*face, 1);
    }
    Ok(hist.freqs(&FACES).into_iter().map(|f| f as u64).collect())
}

fn check_faces(observed: &[u64]) -> Result<()> {
    if observed.len() != FACES.len() {
        return Err(Error::size_mismatch(FACES.len(), observed.len(), "die face counts"));
    }
    Ok(())
}

fn expected_per_face(observed: &[u64]) -> f64 {
    observed.iter().sum::<u64>() as f64 / FACES.len() as f64
}

/// Fairness of a six-sided die from its face counts
///
/// The statistic is the total absolute deviation from the expected counts.
#[derive(Debug, Clone, Default)]
pub struct DiceTest {
    n: u64,
}

impl DiceTest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for DiceTest {
    type Data = Vec<u64>;

    fn make_model(&mut self, observed: &Vec<u64>) -> Result<()> {
        check_faces(observed)?;
        self.n = observed.iter().sum();
        Ok(())
    }

    fn test_statistic(&self, observed: &Vec<u64>) -> Result<f64> {
        let expected = expected_per_face(observed);
        Ok(observed.iter().map(|&o| (o as f64 - expected).abs()).sum())
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<u64>> {
        roll_counts(self.n, rng)
    }
}

/// Fairness of a six-sided die by the chi-squared statistic
#[derive(Debug, Clone, Default)]
pub struct DiceChiTest {
    n: u64,
}

impl DiceChiTest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HypothesisTest for DiceChiTest {
    type Data = Vec<u64>;

    fn make_model(&mut self, observed: &Vec<u64>) -> Result<()> {
        check_faces(observed)?;
        self.n = observed.iter().sum();
        if self.n == 0 {
            return Err(Error::empty_input("die rolls"));
        }
        Ok(())
    }

    fn test_statistic(&self, observed: &Vec<u64>) -> Result<f64> {
        let expected = expected_per_face(observed);
        Ok(observed
            .iter()
            .map(|&o| {
                let d = o as f64 - expected;
                d * d / expected
            })
            .sum())
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<u64>> {
        roll_counts(self.n, rng)
    }
}

/// Whether two groups of pregnancy lengths, in weeks, share a distribution
///
/// The statistic sums, over both groups, the chi-squared distance between
/// observed counts and those expected from the pooled distribution. Only
/// weeks 35 to 43 are compared unless [`PregLengthTest::with_values`] says
/// otherwise.
#[derive(Debug, Clone)]
pub struct PregLengthTest {
    values: Vec<i64>,
    expected_probs: Vec<f64>,
    pool: Vec<i64>,
    n: usize,
}

impl Default for PregLengthTest {
    fn default() -> Self {
        Self {
            values: (35..=43).collect(),
            expected_probs: Vec::new(),
            pool: Vec::new(),
            n: 0,
        }
    }
}

impl PregLengthTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare these weeks instead of 35 to 43
    pub fn with_values(mut self, values: Vec<i64>) -> Self {
        self.values = values;
        self
    }

    fn chi_squared(&self, lengths: &[i64]) -> f64 {
        let hist = Hist::from_values(lengths.iter().copied());
        let n = lengths.len() as f64;
        self.values
            .iter()
            .zip(&self.expected_probs)
            .map(|(value, p)| {
                let expected = p * n;
                let d = hist.freq(value) as f64 - expected;
                d * d / expected
            })
            .sum()
    }
}

impl HypothesisTest for PregLengthTest {
    type Data = (Vec<i64>, Vec<i64>);

    fn make_model(&mut self, (firsts, others): &Self::Data) -> Result<()> {
        if firsts.is_empty() || others.is_empty() {
            return Err(Error::empty_input("pregnancy length groups"));
        }
        self.n = firsts.len();
        self.pool = firsts.iter().chain(others).copied().collect();

        let pmf = Pmf::from_values(self.pool.iter().copied());
        self.expected_probs = pmf.probs(&self.values);
        if let Some(value) = self
            .values
            .iter()
            .zip(&self.expected_probs)
            .find_map(|(v, &p)| (p == 0.0).then_some(v))
        {
            return Err(Error::Domain(format!(
                "week {value} never occurs in the pooled data; its expected count is zero"
            )));
        }
        Ok(())
    }

    fn test_statistic(&self, (firsts, others): &Self::Data) -> Result<f64> {
        Ok(self.chi_squared(firsts) + self.chi_squared(others))
    }

    fn run_model<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Data> {
        let mut shuffled = self.pool.clone();
        shuffled.shuffle(rng);
        let rest = shuffled.split_off(self.n);
        Ok((shuffled, rest))
    }
}
