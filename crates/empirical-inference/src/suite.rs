//! Sequential Bayesian updating
//!
//! A [`Suite`] is a [`Pmf`] over hypotheses paired with a model that scores
//! data against each hypothesis. Every update multiplies the prior by the
//! likelihood and renormalizes, so the posterior is the prior for the next
//! round.
//!
//! ```rust
//! use empirical_inference::{likelihood_fn, Suite};
//!
//! // which die was rolled, given the outcome?
//! let model = likelihood_fn(|roll: &u32, sides: &u32| {
//!     if roll > sides { 0.0 } else { 1.0 / *sides as f64 }
//! });
//! let mut suite = Suite::from_values(vec![4u32, 6, 8, 12, 20], model);
//! suite.update(&6u32).unwrap();
//!
//! assert_eq!(suite.prob(&4), 0.0);
//! assert!(suite.prob(&6) > suite.prob(&8));
//! ```

use empirical_core::math::{odds, probability};
use empirical_core::{Key, Result};
use empirical_mass::{Hist, Pmf, WeightedMap};
use std::iter;
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Likelihood of data `D` under hypothesis `H`
pub trait Likelihood<H, D: ?Sized> {
    fn likelihood(&self, data: &D, hypo: &H) -> Result<f64>;
}

/// Log-likelihood of data `D` under hypothesis `H`
pub trait LogLikelihood<H, D: ?Sized> {
    fn log_likelihood(&self, data: &D, hypo: &H) -> Result<f64>;
}

/// Adapter turning a closure `(data, hypo) -> likelihood` into a model
#[derive(Debug, Clone, Copy)]
pub struct FnLikelihood<F>(F);

/// Wrap `f` as a [`Likelihood`]
pub fn likelihood_fn<F>(f: F) -> FnLikelihood<F> {
    FnLikelihood(f)
}

impl<H, D: ?Sized, F> Likelihood<H, D> for FnLikelihood<F>
where
    F: Fn(&D, &H) -> f64,
{
    fn likelihood(&self, data: &D, hypo: &H) -> Result<f64> {
        Ok((self.0)(data, hypo))
    }
}

/// Distribution over hypotheses with a likelihood model
#[derive(Debug, Clone)]
pub struct Suite<H: Key, L> {
    pmf: Pmf<H>,
    model: L,
}

impl<H: Key, L> Suite<H, L> {
    /// Empty suite; add hypotheses with [`WeightedMap::set`]
    pub fn new(model: L) -> Self {
        Self {
            pmf: Pmf::new(),
            model,
        }
    }

    /// Use `prior` as given
    pub fn from_pmf(prior: Pmf<H>, model: L) -> Self {
        Self { pmf: prior, model }
    }

    /// Prior proportional to how often each hypothesis appears
    pub fn from_values<I: IntoIterator<Item = H>>(hypos: I, model: L) -> Self {
        Self::from_pmf(Pmf::from_values(hypos), model)
    }

    pub fn from_hist(hist: &Hist<H>, model: L) -> Result<Self> {
        Ok(Self::from_pmf(Pmf::from_hist(hist)?, model))
    }

    /// Prior from a map of weights, normalized
    pub fn from_map(map: WeightedMap<H, f64>, model: L) -> Result<Self> {
        let mut pmf = Pmf::from_map(map);
        if !pmf.is_empty() {
            pmf.normalize()?;
        }
        Ok(Self::from_pmf(pmf, model))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.pmf = self.pmf.with_label(label);
        self
    }

    pub fn model(&self) -> &L {
        &self.model
    }

    pub fn pmf(&self) -> &Pmf<H> {
        &self.pmf
    }

    pub fn into_pmf(self) -> Pmf<H> {
        self.pmf
    }

    fn hypotheses(&self) -> Vec<H> {
        self.pmf.keys().cloned().collect()
    }

    /// Multiply in the likelihood of `data` and renormalize
    ///
    /// Returns the total before normalizing, the evidence for the model.
    /// If the model fails for any hypothesis the suite is left unchanged.
    pub fn update<D: ?Sized>(&mut self, data: &D) -> Result<f64>
    where
        L: Likelihood<H, D>,
    {
        let factors = self.joint_likelihoods(iter::once(data))?;
        self.apply(factors, |pmf, hypo, like| pmf.mult(hypo, like));
        self.pmf.normalize()
    }

    /// Apply every observation, normalizing once at the end
    #[instrument(level = "debug", skip(self, dataset), fields(n = dataset.len(), hypotheses = self.pmf.len()))]
    pub fn update_set<D>(&mut self, dataset: &[D]) -> Result<f64>
    where
        L: Likelihood<H, D>,
    {
        let factors = self.joint_likelihoods(dataset)?;
        self.apply(factors, |pmf, hypo, like| pmf.mult(hypo, like));
        let evidence = self.pmf.normalize()?;
        debug!(evidence, "posterior normalized");
        Ok(evidence)
    }

    /// Add the log-likelihood of `data` to each weight
    ///
    /// The suite should already be under [`WeightedMap::log`]; nothing is
    /// renormalized, so convert back with [`WeightedMap::exp`] and
    /// normalize when done.
    pub fn log_update<D: ?Sized>(&mut self, data: &D) -> Result<()>
    where
        L: LogLikelihood<H, D>,
    {
        let terms = self.joint_log_likelihoods(iter::once(data))?;
        self.apply(terms, |pmf, hypo, like| pmf.incr(hypo, like));
        Ok(())
    }

    pub fn log_update_set<D>(&mut self, dataset: &[D]) -> Result<()>
    where
        L: LogLikelihood<H, D>,
    {
        let terms = self.joint_log_likelihoods(dataset)?;
        self.apply(terms, |pmf, hypo, like| pmf.incr(hypo, like));
        Ok(())
    }

    /// Likelihood of the whole dataset under each hypothesis
    fn joint_likelihoods<'a, D, I>(&self, dataset: I) -> Result<Vec<(H, f64)>>
    where
        D: ?Sized + 'a,
        I: IntoIterator<Item = &'a D> + Clone,
        L: Likelihood<H, D>,
    {
        self.hypotheses()
            .into_iter()
            .map(|hypo| {
                let mut like = 1.0;
                for data in dataset.clone() {
                    like *= self.model.likelihood(data, &hypo)?;
                }
                Ok((hypo, like))
            })
            .collect()
    }

    fn joint_log_likelihoods<'a, D, I>(&self, dataset: I) -> Result<Vec<(H, f64)>>
    where
        D: ?Sized + 'a,
        I: IntoIterator<Item = &'a D> + Clone,
        L: LogLikelihood<H, D>,
    {
        self.hypotheses()
            .into_iter()
            .map(|hypo| {
                let mut like = 0.0;
                for data in dataset.clone() {
                    like += self.model.log_likelihood(data, &hypo)?;
                }
                Ok((hypo, like))
            })
            .collect()
    }

    fn apply<F>(&mut self, factors: Vec<(H, f64)>, mut op: F)
    where
        F: FnMut(&mut Pmf<H>, H, f64),
    {
        for (hypo, like) in factors {
            op(&mut self.pmf, hypo, like);
        }
    }

    /// Replace probabilities with odds, dropping hypotheses at zero
    ///
    /// A probability of 1 becomes infinite odds.
    pub fn make_odds(&mut self) {
        self.pmf.retain(|_, p| *p != 0.0);
        for hypo in self.hypotheses() {
            let p = self.pmf.prob(&hypo);
            self.pmf.set(hypo, odds(p));
        }
    }

    /// Replace odds with probabilities; infinite odds become 1
    pub fn make_probs(&mut self) {
        for hypo in self.hypotheses() {
            let o = self.pmf.prob(&hypo);
            self.pmf.set(hypo, probability(o));
        }
    }
}

impl<H: Key, L> Deref for Suite<H, L> {
    type Target = Pmf<H>;

    fn deref(&self) -> &Self::Target {
        &self.pmf
    }
}

impl<H: Key, L> DerefMut for Suite<H, L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pmf
    }
}
