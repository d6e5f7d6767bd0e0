//! The shared value → weight container
//!
//! [`WeightedMap`] carries everything histograms, probability mass functions
//! and Bayesian suites have in common. The concrete types wrap it and add
//! their own policy on top (integer counts, normalization, updates).

use empirical_core::{Error, Key, Result, Weight};
use std::collections::hash_map;
use std::collections::HashMap;
use std::ops::Mul;
use tracing::warn;

/// Mutable mapping from value to weight
///
/// Equality compares entries only; labels are ignored.
#[derive(Debug, Clone)]
pub struct WeightedMap<K, W> {
    entries: HashMap<K, W>,
    label: Option<String>,
    log_space: bool,
}

impl<K: Key, W: Weight> Default for WeightedMap<K, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, W: Weight> WeightedMap<K, W> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            label: None,
            log_space: false,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Tally occurrences of each value
    pub fn from_values<I: IntoIterator<Item = K>>(values: I) -> Self {
        let mut map = Self::new();
        for v in values {
            map.incr(v, W::one());
        }
        map
    }

    /// Build from `(value, weight)` pairs; later pairs overwrite earlier ones
    pub fn from_items<I: IntoIterator<Item = (K, W)>>(items: I) -> Self {
        let mut map = Self::new();
        for (k, w) in items {
            map.set(k, w);
        }
        map
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Whether the weights are currently log-transformed
    pub fn is_log_space(&self) -> bool {
        self.log_space
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, x: &K) -> bool {
        self.entries.contains_key(x)
    }

    /// Weight of `x`, zero when absent
    pub fn get(&self, x: &K) -> W {
        self.entries.get(x).copied().unwrap_or_else(W::zero)
    }

    pub fn set(&mut self, x: K, w: W) {
        self.entries.insert(x, w);
    }

    /// Add `term` to the weight of `x`
    pub fn incr(&mut self, x: K, term: W) {
        *self.entries.entry(x).or_insert_with(W::zero) += term;
    }

    /// Multiply the weight of `x` by `factor`
    pub fn mult(&mut self, x: K, factor: W) {
        let w = self.entries.entry(x).or_insert_with(W::zero);
        *w = *w * factor;
    }

    /// Remove `x`, returning its weight
    pub fn remove(&mut self, x: &K) -> Option<W> {
        self.entries.remove(x)
    }

    /// Keep only the entries matching `keep`
    pub fn retain<F: FnMut(&K, &mut W) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
    }

    /// Unsorted values
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Unsorted `(value, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&K, &W)> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut W)> {
        self.entries.iter_mut()
    }

    /// Sum of all weights
    pub fn total(&self) -> W {
        let mut total = W::zero();
        for &w in self.entries.values() {
            total += w;
        }
        total
    }

    /// Largest weight, `None` when empty
    pub fn max_like(&self) -> Option<W> {
        self.entries
            .values()
            .copied()
            .fold(None, |best, w| match best {
                Some(b) if b >= w => Some(b),
                _ => Some(w),
            })
    }

    /// Copy, optionally relabelled
    pub fn copy(&self, label: Option<&str>) -> Self {
        let mut new = self.clone();
        if let Some(label) = label {
            new.label = Some(label.to_string());
        }
        new
    }

    /// New map with every value multiplied by `factor`
    ///
    /// Values that collide after scaling have their weights summed.
    pub fn scale(&self, factor: K) -> Self
    where
        K: Mul<Output = K>,
    {
        let mut new = Self {
            entries: HashMap::with_capacity(self.len()),
            label: self.label.clone(),
            log_space: self.log_space,
        };
        for (k, &w) in &self.entries {
            new.incr(k.clone() * factor.clone(), w);
        }
        new
    }

    fn warn_on_nan_keys(&self) {
        if self.entries.keys().any(Key::is_nan) {
            warn!(label = ?self.label, "keys contain NaN, may not sort correctly");
        }
    }
}

impl<K: Key + Ord, W: Weight> WeightedMap<K, W> {
    /// `(value, weight)` pairs sorted by value
    pub fn sorted_items(&self) -> Vec<(K, W)> {
        self.warn_on_nan_keys();
        let mut items: Vec<(K, W)> = self.entries.iter().map(|(k, &w)| (k.clone(), w)).collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items
    }

    /// Sorted values and their weights as parallel sequences for plotting
    pub fn render(&self) -> (Vec<K>, Vec<W>) {
        self.sorted_items().into_iter().unzip()
    }

    /// The `n` largest values with their weights, largest first
    pub fn largest(&self, n: usize) -> Vec<(K, W)> {
        let mut items = self.sorted_items();
        items.reverse();
        items.truncate(n);
        items
    }

    /// The `n` smallest values with their weights, smallest first
    pub fn smallest(&self, n: usize) -> Vec<(K, W)> {
        let mut items = self.sorted_items();
        items.truncate(n);
        items
    }
}

impl<K: Key> WeightedMap<K, f64> {
    /// Scale the weights so they sum to `fraction`, returning the old total
    pub fn normalize_to(&mut self, fraction: f64) -> Result<f64> {
        if self.log_space {
            return Err(Error::Domain(
                "normalize: map is under a log transform".to_string(),
            ));
        }
        let total = self.total();
        if total == 0.0 {
            return Err(Error::zero_total("normalize"));
        }
        let factor = fraction / total;
        for w in self.entries.values_mut() {
            *w *= factor;
        }
        Ok(total)
    }

    /// Scale the weights so they sum to 1, returning the old total
    pub fn normalize(&mut self) -> Result<f64> {
        self.normalize_to(1.0)
    }

    /// Replace every weight `p` by `ln(p / m)`, `m` defaulting to the largest weight
    ///
    /// Zero weights are removed. A map with no positive weight is left
    /// unchanged and reported as a domain error.
    pub fn log(&mut self, m: Option<f64>) -> Result<()> {
        if self.log_space {
            return Err(Error::Domain(
                "log: map is already under a log transform".to_string(),
            ));
        }
        let max = self.max_like().ok_or_else(|| Error::empty_input("log"))?;
        if max <= 0.0 {
            return Err(Error::zero_total("log"));
        }
        let m = m.unwrap_or(max);
        self.log_space = true;
        self.entries.retain(|_, p| *p != 0.0);
        for p in self.entries.values_mut() {
            *p = (*p / m).ln();
        }
        Ok(())
    }

    /// Replace every log weight `p` by `exp(p - m)`, `m` defaulting to the largest
    pub fn exp(&mut self, m: Option<f64>) -> Result<()> {
        if !self.log_space {
            return Err(Error::Domain(
                "exp: map is not under a log transform".to_string(),
            ));
        }
        let m = match m {
            Some(m) => m,
            None => self.max_like().ok_or_else(|| Error::empty_input("exp"))?,
        };
        self.log_space = false;
        for p in self.entries.values_mut() {
            *p = (*p - m).exp();
        }
        Ok(())
    }
}

impl<K: Key, W: Weight> PartialEq for WeightedMap<K, W> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Key, W: Weight> Extend<K> for WeightedMap<K, W> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for v in iter {
            self.incr(v, W::one());
        }
    }
}

impl<K, W> IntoIterator for WeightedMap<K, W> {
    type Item = (K, W);
    type IntoIter = hash_map::IntoIter<K, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use empirical_core::{real, Real};

    #[test]
    fn test_tally_and_access() {
        let map: WeightedMap<i64, i64> = WeightedMap::from_values(vec![1, 2, 2, 3, 5]);
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&2), 2);
        assert_eq!(map.get(&4), 0);
        assert_eq!(map.total(), 5);
        assert_eq!(map.max_like(), Some(2));
        assert!(map.contains(&5));
    }

    #[test]
    fn test_set_incr_mult_remove() {
        let mut map: WeightedMap<&str, f64> = WeightedMap::new();
        map.set("a", 0.5);
        map.incr("a", 0.25);
        map.mult("a", 2.0);
        assert_abs_diff_eq!(map.get(&"a"), 1.5);
        assert_eq!(map.remove(&"a"), Some(1.5));
        assert_eq!(map.remove(&"a"), None);
    }

    #[test]
    fn test_normalize_returns_old_total() {
        let mut map: WeightedMap<i64, f64> = WeightedMap::from_items(vec![(1, 1.0), (2, 3.0)]);
        let total = map.normalize().unwrap();
        assert_eq!(total, 4.0);
        assert_abs_diff_eq!(map.get(&2), 0.75);
    }

    #[test]
    fn test_normalize_zero_total_fails() {
        let mut map: WeightedMap<i64, f64> = WeightedMap::from_items(vec![(1, 0.0)]);
        assert!(matches!(map.normalize(), Err(Error::Domain(_))));
    }

    #[test]
    fn test_log_exp_toggle() {
        let mut map: WeightedMap<i64, f64> =
            WeightedMap::from_items(vec![(1, 0.5), (2, 0.25), (3, 0.0)]);
        map.log(None).unwrap();
        assert!(map.is_log_space());
        assert!(!map.contains(&3));
        assert_abs_diff_eq!(map.get(&1), 0.0);
        assert!(matches!(map.log(None), Err(Error::Domain(_))));
        assert!(matches!(map.normalize(), Err(Error::Domain(_))));

        map.exp(None).unwrap();
        assert_abs_diff_eq!(map.get(&1), 1.0);
        assert_abs_diff_eq!(map.get(&2), 0.5, epsilon = 1e-12);
        assert!(matches!(map.exp(None), Err(Error::Domain(_))));
    }

    #[test]
    fn test_log_of_all_zero_map_is_rejected() {
        let mut map: WeightedMap<i64, f64> = WeightedMap::from_items(vec![(1, 0.0), (2, 0.0)]);
        assert!(matches!(map.log(None), Err(Error::Domain(_))));
        assert!(!map.is_log_space());
        assert_eq!(map.len(), 2);

        assert!(matches!(map.log(Some(1.0)), Err(Error::Domain(_))));
        assert!(!map.is_log_space());

        let mut empty: WeightedMap<i64, f64> = WeightedMap::new();
        assert!(matches!(empty.log(None), Err(Error::Data(_))));
        assert!(!empty.is_log_space());
    }

    #[test]
    fn test_scale_identity_and_collisions() {
        let map: WeightedMap<Real, i64> =
            WeightedMap::from_values(vec![real(1.0), real(2.0), real(2.0)]).with_label("x");
        assert_eq!(map.scale(real(1.0)), map);
        let doubled = map.scale(real(2.0));
        assert_eq!(doubled.get(&real(4.0)), 2);

        let ints: WeightedMap<i64, i64> = WeightedMap::from_values(vec![1, -1]);
        assert_eq!(ints.scale(0).get(&0), 2);
    }

    #[test]
    fn test_equality_ignores_label() {
        let a: WeightedMap<i64, i64> = WeightedMap::from_values(vec![1, 2]).with_label("a");
        let b = a.copy(Some("b"));
        assert_eq!(a, b);
        assert_eq!(b.label(), Some("b"));
    }

    #[test]
    fn test_sorted_views() {
        let map: WeightedMap<i64, i64> = WeightedMap::from_values(vec![3, 1, 2, 2]);
        assert_eq!(map.sorted_items(), vec![(1, 1), (2, 2), (3, 1)]);
        assert_eq!(map.render(), (vec![1, 2, 3], vec![1, 2, 1]));
        assert_eq!(map.largest(2), vec![(3, 1), (2, 2)]);
        assert_eq!(map.smallest(1), vec![(1, 1)]);
    }
}
