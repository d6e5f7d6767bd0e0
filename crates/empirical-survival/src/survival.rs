//! Survival functions
//!
//! `S(t)` is the probability that a lifetime exceeds `t`. The curve is
//! stored as parallel sorted sequences of times and survival fractions and
//! evaluated by linear interpolation, with `S(t) = 1` before the first
//! recorded time.

use crate::hazard::HazardFunction;
use empirical_core::{interpolate, real, reals, Error, Key, Numeric, Real, Result};
use empirical_mass::{Cdf, Hist, Pmf};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Survival fraction at each recorded time
///
/// Equality compares times and fractions only; labels are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurvivalFunction {
    ts: Vec<f64>,
    ss: Vec<f64>,
    label: Option<String>,
}

impl SurvivalFunction {
    /// Wrap ascending times and their survival fractions
    pub fn new(ts: Vec<f64>, ss: Vec<f64>) -> Result<Self> {
        if ts.len() != ss.len() {
            return Err(Error::size_mismatch(ts.len(), ss.len(), "survival function"));
        }
        if ts.iter().any(|t| t.is_nan()) {
            return Err(Error::Data("survival times contain NaN".to_string()));
        }
        if ts.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::Data("survival times must be ascending".to_string()));
        }
        Ok(Self::from_sorted(ts, ss))
    }

    pub(crate) fn from_sorted(ts: Vec<f64>, ss: Vec<f64>) -> Self {
        Self { ts, ss, label: None }
    }

    /// Survival curve of a complete sample, where every lifetime ended
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::empty_input("survival from values"));
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(Error::Data("lifetimes contain NaN".to_string()));
        }
        let hist = Hist::from_values(reals(values));
        let items = hist.sorted_items();
        let n = values.len() as f64;
        let mut running = 0i64;
        let (ts, ss) = items
            .into_iter()
            .map(|(t, freq)| {
                running += freq;
                (t.into_inner(), 1.0 - running as f64 / n)
            })
            .unzip();
        Ok(Self::from_sorted(ts, ss))
    }

    /// Complement of a CDF: `S(x) = 1 - CDF(x)` at each of its values
    pub fn from_cdf<K: Key + Ord + Numeric>(cdf: &Cdf<K>) -> Self {
        let ts = cdf.xs().iter().map(|x| x.to_f64()).collect();
        let ss = cdf.ps().iter().map(|p| 1.0 - p).collect();
        Self {
            ts,
            ss,
            label: cdf.label().map(str::to_string),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.ts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    pub fn ts(&self) -> &[f64] {
        &self.ts
    }

    pub fn ss(&self) -> &[f64] {
        &self.ss
    }

    /// `S(t)` by linear interpolation
    ///
    /// Times before the first recorded time give 1; times after the last
    /// give the last recorded fraction. A NaN time gives NaN.
    pub fn prob(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        match self.ts.first() {
            Some(&first) if t >= first => interpolate(t, &self.ts, &self.ss),
            _ => 1.0,
        }
    }

    pub fn probs(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.prob(t)).collect()
    }

    /// `(time, survival)` pairs, ascending in time
    pub fn items(&self) -> Vec<(f64, f64)> {
        self.ts.iter().copied().zip(self.ss.iter().copied()).collect()
    }

    /// Times and survival fractions as parallel sequences for plotting
    pub fn render(&self) -> (Vec<f64>, Vec<f64>) {
        (self.ts.clone(), self.ss.clone())
    }

    /// Copy, optionally relabelled
    pub fn copy(&self, label: Option<&str>) -> Self {
        let mut new = self.clone();
        if let Some(label) = label {
            new.label = Some(label.to_string());
        }
        new
    }

    /// Same curve with every time multiplied by `factor`
    ///
    /// `factor` must be positive for the times to stay ascending.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            ts: self.ts.iter().map(|t| t * factor).collect(),
            ss: self.ss.clone(),
            label: self.label.clone(),
        }
    }

    /// Approximate hazard by differencing consecutive survival fractions
    ///
    /// `λ(t) = (S(prev) - S(t)) / S(prev)`, starting from `S = 1`. Time
    /// steps are not taken into account, so rates at unevenly spaced times
    /// are not comparable. Once the curve reaches zero every later rate is 1.
    pub fn make_hazard(&self) -> HazardFunction {
        let mut hazard = HazardFunction::new();
        let mut prev = 1.0;
        for (&t, &s) in self.ts.iter().zip(&self.ss) {
            let lam = if prev > 0.0 { (prev - s) / prev } else { 1.0 };
            hazard.insert(t, lam);
            prev = s;
        }
        match &self.label {
            Some(label) => hazard.with_label(label.clone()),
            None => hazard,
        }
    }

    /// Lifetime CDF, `1 - S(t)` at each recorded time
    pub fn make_cdf(&self) -> Result<Cdf<Real>> {
        let ps = self.ss.iter().map(|s| 1.0 - s).collect();
        let cdf = Cdf::from_parts(reals(&self.ts), ps)?;
        Ok(match &self.label {
            Some(label) => cdf.with_label(label.clone()),
            None => cdf,
        })
    }

    /// Lifetime PMF implied by the curve
    ///
    /// The result is not normalized: when the curve never reaches zero the
    /// masses sum to less than 1. Pass `filler` to place the missing mass
    /// at that lifetime instead.
    pub fn make_pmf(&self, filler: Option<f64>) -> Result<Pmf<Real>> {
        let cdf = self.make_cdf()?;
        let mut pmf = Pmf::new();
        for (t, mass) in cdf.items() {
            pmf.set(t, mass);
        }
        if let Some(filler) = filler {
            let cutoff = cdf.ps().last().copied().unwrap_or(0.0);
            pmf.set(real(filler), 1.0 - cutoff);
        }
        pmf.set_label(self.label.clone());
        Ok(pmf)
    }

    /// Time at which the curve first falls to one half, interpolated
    /// between recorded times; `None` if it never does
    pub fn median_survival(&self) -> Option<f64> {
        let i = self.ss.iter().position(|&s| s <= 0.5)?;
        if i == 0 {
            return Some(self.ts[0]);
        }
        let (t0, t1) = (self.ts[i - 1], self.ts[i]);
        let (s0, s1) = (self.ss[i - 1], self.ss[i]);
        Some(t0 + (0.5 - s0) / (s1 - s0) * (t1 - t0))
    }

    /// Remaining lifetime as a function of age
    ///
    /// For every lifetime in the PMF except the largest, in ascending
    /// order, the mass at that age is zeroed (cumulatively, so everything
    /// up to and including the age is gone), the rest is renormalized and
    /// `reducer` summarizes the conditional distribution. The age is
    /// subtracted from the summary.
    pub fn remaining_lifetime<F>(&self, filler: Option<f64>, mut reducer: F) -> Result<Vec<(f64, f64)>>
    where
        F: FnMut(&Pmf<Real>) -> Result<f64>,
    {
        let mut pmf = self.make_pmf(filler)?;
        let mut ages: Vec<Real> = pmf.keys().copied().collect();
        ages.sort();
        ages.pop();

        let mut remaining = Vec::with_capacity(ages.len());
        for age in ages {
            pmf.set(age, 0.0);
            pmf.normalize()?;
            let t = age.into_inner();
            remaining.push((t, reducer(&pmf)? - t));
        }
        debug!(n = remaining.len(), "remaining lifetime computed");
        Ok(remaining)
    }

    /// Expected remaining lifetime at each age
    pub fn remaining_lifetime_mean(&self, filler: Option<f64>) -> Result<Vec<(f64, f64)>> {
        self.remaining_lifetime(filler, |pmf| Ok(pmf.mean()))
    }
}

impl PartialEq for SurvivalFunction {
    fn eq(&self, other: &Self) -> bool {
        self.ts == other.ts && self.ss == other.ss
    }
}

/// Survival of the time beyond `t0`, given the lifetime is at least `t0`
///
/// Lifetimes below `t0` are dropped, the rest are shifted down by `t0` and
/// renormalized.
pub fn conditional_survival<K: Key + Numeric>(pmf: &Pmf<K>, t0: f64) -> Result<SurvivalFunction> {
    let mut cond: Pmf<Real> = Pmf::new();
    for (t, &p) in pmf.iter() {
        let t = t.to_f64();
        if t >= t0 {
            cond.set(real(t - t0), p);
        }
    }
    cond.normalize()?;
    Ok(SurvivalFunction::from_cdf(&cond.make_cdf()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn complete() -> SurvivalFunction {
        SurvivalFunction::from_values(&[1.0, 2.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn test_from_values() {
        let sf = complete();
        assert_eq!(sf.ts(), &[1.0, 2.0, 3.0]);
        assert_eq!(sf.ss(), &[0.75, 0.25, 0.0]);
        assert!(SurvivalFunction::from_values(&[]).is_err());
        assert!(matches!(
            SurvivalFunction::from_values(&[1.0, f64::NAN]),
            Err(Error::Data(_))
        ));
    }

    #[test]
    fn test_prob_interpolates() {
        let sf = complete();
        assert_eq!(sf.prob(0.0), 1.0);
        assert_eq!(sf.prob(1.0), 0.75);
        assert_abs_diff_eq!(sf.prob(1.5), 0.5, epsilon = 1e-12);
        assert_eq!(sf.prob(3.0), 0.0);
        assert_eq!(sf.prob(10.0), 0.0);
        assert_eq!(SurvivalFunction::default().prob(5.0), 1.0);
        assert_eq!(sf.probs(&[0.5, 2.0]), vec![1.0, 0.25]);
    }

    #[test]
    fn test_new_validates() {
        assert!(SurvivalFunction::new(vec![1.0, 2.0], vec![0.5]).is_err());
        assert!(SurvivalFunction::new(vec![2.0, 1.0], vec![0.5, 0.2]).is_err());
        assert!(SurvivalFunction::new(vec![1.0, 2.0], vec![0.5, 0.2]).is_ok());
    }

    #[test]
    fn test_from_cdf() {
        let cdf = Cdf::from_values(vec![1i64, 2, 2, 3]).unwrap().with_label("weeks");
        let sf = SurvivalFunction::from_cdf(&cdf);
        assert_eq!(sf, complete());
        assert_eq!(sf.label(), Some("weeks"));
    }

    #[test]
    fn test_hazard_round_trip() {
        let sf = complete();
        let hf = sf.make_hazard();
        assert_abs_diff_eq!(hf.get(1.0).unwrap(), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(hf.get(2.0).unwrap(), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hf.get(3.0).unwrap(), 1.0, epsilon = 1e-12);
        let back = hf.make_survival();
        for (a, b) in back.ss().iter().zip(sf.ss()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_make_pmf_with_filler() {
        let sf = SurvivalFunction::new(vec![1.0, 2.0], vec![0.5, 0.25]).unwrap();
        let pmf = sf.make_pmf(None).unwrap();
        assert_abs_diff_eq!(pmf.total(), 0.75, epsilon = 1e-12);
        let filled = sf.make_pmf(Some(99.0)).unwrap();
        assert_abs_diff_eq!(filled.prob(&real(99.0)), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(filled.total(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_remaining_lifetime() {
        let sf = complete();
        let remaining = sf.remaining_lifetime_mean(None).unwrap();
        assert_eq!(remaining.len(), 2);
        // past age 1: lifetimes 2, 2, 3
        assert_eq!(remaining[0].0, 1.0);
        assert_abs_diff_eq!(remaining[0].1, 7.0 / 3.0 - 1.0, epsilon = 1e-12);
        // past age 2: only 3 remains
        assert_abs_diff_eq!(remaining[1].1, 1.0, epsilon = 1e-12);

        let medians = sf
            .remaining_lifetime(None, |pmf| Ok(pmf.median()?.into_inner()))
            .unwrap();
        assert_eq!(medians[0], (1.0, 1.0));
    }

    #[test]
    fn test_median_survival() {
        assert_abs_diff_eq!(complete().median_survival().unwrap(), 1.5, epsilon = 1e-12);
        let sf = SurvivalFunction::new(vec![1.0], vec![0.9]).unwrap();
        assert_eq!(sf.median_survival(), None);
    }

    #[test]
    fn test_copy_and_scale_identity() {
        let sf = complete().with_label("a");
        assert_eq!(sf.copy(Some("b")), sf);
        assert_eq!(sf.copy(Some("b")).label(), Some("b"));
        assert_eq!(sf.scale(1.0), sf);
        assert_eq!(sf.scale(2.0).ts(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_conditional_survival() {
        let pmf = Pmf::from_values(vec![1i64, 2, 3, 4]);
        let sf = conditional_survival(&pmf, 3.0).unwrap();
        assert_eq!(sf.ts(), &[0.0, 1.0]);
        assert_abs_diff_eq!(sf.ss()[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sf.ss()[1], 0.0, epsilon = 1e-12);
        assert!(matches!(conditional_survival(&pmf, 10.0), Err(Error::Domain(_))));
    }

    #[test]
    fn test_serialization() {
        let sf = complete().with_label("weeks");
        let json = serde_json::to_string(&sf).unwrap();
        let back: SurvivalFunction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sf);
        assert_eq!(back.label(), Some("weeks"));
    }
}
