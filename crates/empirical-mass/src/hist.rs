//! Integer frequency histograms

use crate::weighted::WeightedMap;
use empirical_core::Key;
use std::ops::{Deref, DerefMut};

/// Map from values to integer frequencies; never normalized
#[derive(Debug, Clone, PartialEq)]
pub struct Hist<K: Key> {
    map: WeightedMap<K, i64>,
}

impl<K: Key> Default for Hist<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> Hist<K> {
    pub fn new() -> Self {
        Self {
            map: WeightedMap::new(),
        }
    }

    /// Count occurrences in a raw sample
    pub fn from_values<I: IntoIterator<Item = K>>(values: I) -> Self {
        Self {
            map: WeightedMap::from_values(values),
        }
    }

    /// Build from `(value, frequency)` pairs
    pub fn from_items<I: IntoIterator<Item = (K, i64)>>(items: I) -> Self {
        Self {
            map: WeightedMap::from_items(items),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.map = self.map.with_label(label);
        self
    }

    /// Frequency of `x`, zero when absent
    pub fn freq(&self, x: &K) -> i64 {
        self.map.get(x)
    }

    pub fn freqs(&self, xs: &[K]) -> Vec<i64> {
        xs.iter().map(|x| self.freq(x)).collect()
    }

    /// Whether every count here is at most the matching count in `other`
    pub fn is_subset(&self, other: &Hist<K>) -> bool {
        self.map.iter().all(|(k, &f)| f <= other.freq(k))
    }

    /// Subtract the counts in `other` from this histogram
    pub fn subtract(&mut self, other: &Hist<K>) {
        for (k, &f) in other.map.iter() {
            self.map.incr(k.clone(), -f);
        }
    }

    pub fn as_map(&self) -> &WeightedMap<K, i64> {
        &self.map
    }

    pub fn into_map(self) -> WeightedMap<K, i64> {
        self.map
    }
}

impl<K: Key> From<WeightedMap<K, i64>> for Hist<K> {
    fn from(map: WeightedMap<K, i64>) -> Self {
        Self { map }
    }
}

impl<K: Key> FromIterator<K> for Hist<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<K: Key> Deref for Hist<K> {
    type Target = WeightedMap<K, i64>;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl<K: Key> DerefMut for Hist<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.map
    }
}
