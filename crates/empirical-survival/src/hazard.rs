//! Hazard functions
//!
//! `λ(t)` is the fraction of the cases still at risk just before `t` that
//! end at `t`. Times are kept in a sorted map, so splicing and truncation
//! work on contiguous ranges.

use crate::survival::SurvivalFunction;
use empirical_core::{real, Real};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hazard rate at each recorded time
///
/// Equality compares the series only; labels are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HazardFunction {
    series: BTreeMap<Real, f64>,
    label: Option<String>,
}

impl HazardFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(time, hazard)` pairs; a repeated time keeps the last rate
    pub fn from_items<I: IntoIterator<Item = (f64, f64)>>(items: I) -> Self {
        Self {
            series: items.into_iter().map(|(t, h)| (real(t), h)).collect(),
            label: None,
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
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Hazard at exactly `t`, if recorded
    pub fn get(&self, t: f64) -> Option<f64> {
        self.series.get(&real(t)).copied()
    }

    pub(crate) fn insert(&mut self, t: f64, hazard: f64) {
        self.series.insert(real(t), hazard);
    }

    /// Recorded times, ascending
    pub fn times(&self) -> Vec<f64> {
        self.series.keys().map(|t| t.into_inner()).collect()
    }

    /// `(time, hazard)` pairs, ascending in time
    pub fn items(&self) -> Vec<(f64, f64)> {
        self.series.iter().map(|(t, &h)| (t.into_inner(), h)).collect()
    }

    /// Times and hazards as parallel sequences for plotting
    pub fn render(&self) -> (Vec<f64>, Vec<f64>) {
        self.items().into_iter().unzip()
    }

    /// Last recorded time
    pub fn last_time(&self) -> Option<f64> {
        self.series.keys().next_back().map(|t| t.into_inner())
    }

    /// Survival curve: the running product of `1 - λ(τ)` for `τ <= t`
    pub fn make_survival(&self) -> SurvivalFunction {
        let mut survival = 1.0;
        let (ts, ss) = self
            .series
            .iter()
            .map(|(t, h)| {
                survival *= 1.0 - h;
                (t.into_inner(), survival)
            })
            .unzip();
        let sf = SurvivalFunction::from_sorted(ts, ss);
        match &self.label {
            Some(label) => sf.with_label(label.clone()),
            None => sf,
        }
    }

    /// Append the part of `other` that lies strictly after this function's
    /// last time
    ///
    /// An empty function takes everything from `other` after time 0.
    pub fn extend(&mut self, other: &HazardFunction) {
        let last = real(self.last_time().unwrap_or(0.0));
        self.series.extend(
            other
                .series
                .iter()
                .filter(|(t, _)| **t > last)
                .map(|(t, h)| (*t, *h)),
        );
    }

    /// Drop every entry at or after `t`
    pub fn truncate(&mut self, t: f64) {
        let cutoff = real(t);
        self.series.retain(|time, _| *time < cutoff);
    }
}

impl PartialEq for HazardFunction {
    fn eq(&self, other: &Self) -> bool {
        self.series == other.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn hazard() -> HazardFunction {
        HazardFunction::from_items(vec![(1.0, 0.25), (2.0, 2.0 / 3.0), (3.0, 1.0)])
    }

    #[test]
    fn test_make_survival_is_running_product() {
        let sf = hazard().make_survival();
        assert_eq!(sf.ts(), &[1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(sf.ss()[0], 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(sf.ss()[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(sf.ss()[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_get_and_render() {
        let hf = hazard();
        assert_eq!(hf.get(1.0), Some(0.25));
        assert_eq!(hf.get(1.5), None);
        let (ts, hs) = hf.render();
        assert_eq!(ts, vec![1.0, 2.0, 3.0]);
        assert_eq!(hs[0], 0.25);
    }

    #[test]
    fn test_extend_only_takes_later_times() {
        let mut early = HazardFunction::from_items(vec![(1.0, 0.1), (2.0, 0.2)]);
        let late = HazardFunction::from_items(vec![(1.0, 0.9), (2.0, 0.9), (3.0, 0.3), (4.0, 0.4)]);
        early.extend(&late);
        assert_eq!(early.items(), vec![(1.0, 0.1), (2.0, 0.2), (3.0, 0.3), (4.0, 0.4)]);

        let mut empty = HazardFunction::new();
        empty.extend(&late);
        assert_eq!(empty.len(), 4);
    }

    #[test]
    fn test_truncate_drops_cutoff() {
        let mut hf = hazard();
        hf.truncate(2.0);
        assert_eq!(hf.times(), vec![1.0]);
        hf.truncate(0.0);
        assert!(hf.is_empty());
        assert_eq!(hf.last_time(), None);
    }

    #[test]
    fn test_label_carries_to_survival() {
        let sf = hazard().with_label("cohort").make_survival();
        assert_eq!(sf.label(), Some("cohort"));
        assert_eq!(hazard().with_label("a"), hazard());
    }
}
