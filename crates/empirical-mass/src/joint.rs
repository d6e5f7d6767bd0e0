//! Joint distributions over tuples of values

use crate::pmf::Pmf;
use empirical_core::{Error, Key, Result};
use ordered_float::OrderedFloat;
use std::ops::{Deref, DerefMut};

/// Key made of indexable coordinates
pub trait JointKey: Key {
    type Coord: Key;

    /// Coordinate `i`, `None` when out of range
    fn coord(&self, i: usize) -> Option<Self::Coord>;
}

impl<T: Key> JointKey for (T, T) {
    type Coord = T;

    fn coord(&self, i: usize) -> Option<T> {
        match i {
            0 => Some(self.0.clone()),
            1 => Some(self.1.clone()),
            _ => None,
        }
    }
}

impl<T: Key> JointKey for (T, T, T) {
    type Coord = T;

    fn coord(&self, i: usize) -> Option<T> {
        match i {
            0 => Some(self.0.clone()),
            1 => Some(self.1.clone()),
            2 => Some(self.2.clone()),
            _ => None,
        }
    }
}

impl<T: Key, const N: usize> JointKey for [T; N] {
    type Coord = T;

    fn coord(&self, i: usize) -> Option<T> {
        self.get(i).cloned()
    }
}

impl<T: Key> JointKey for Vec<T> {
    type Coord = T;

    fn coord(&self, i: usize) -> Option<T> {
        self.get(i).cloned()
    }
}

/// Probability mass over tuples
#[derive(Debug, Clone, PartialEq)]
pub struct Joint<K: JointKey> {
    pmf: Pmf<K>,
}

impl<K: JointKey> Joint<K> {
    pub fn new() -> Self {
        Self { pmf: Pmf::new() }
    }

    pub fn from_pmf(pmf: Pmf<K>) -> Self {
        Self { pmf }
    }

    pub fn into_pmf(self) -> Pmf<K> {
        self.pmf
    }

    fn coord_of(key: &K, i: usize) -> Result<K::Coord> {
        key.coord(i)
            .ok_or_else(|| Error::OutOfRange(format!("coordinate {i} of joint key {key:?}")))
    }

    /// Distribution of coordinate `i`, summing over the others
    pub fn marginal(&self, i: usize) -> Result<Pmf<K::Coord>> {
        let mut out = Pmf::new();
        for (vs, &p) in self.pmf.iter() {
            out.incr(Self::coord_of(vs, i)?, p);
        }
        Ok(out)
    }

    /// Distribution of coordinate `i` given coordinate `j` equals `val`
    pub fn conditional(&self, i: usize, j: usize, val: &K::Coord) -> Result<Pmf<K::Coord>> {
        let mut out = Pmf::new();
        for (vs, &p) in self.pmf.iter() {
            if Self::coord_of(vs, j)? != *val {
                continue;
            }
            out.incr(Self::coord_of(vs, i)?, p);
        }
        if out.is_empty() {
            return Err(Error::zero_total("conditional"));
        }
        out.normalize()?;
        Ok(out)
    }

    /// Smallest set of keys, highest probability first, whose mass reaches
    /// `percentage` percent
    pub fn max_like_interval(&self, percentage: f64) -> Result<Vec<K>>
    where
        K: Ord,
    {
        Error::check_percentage(percentage)?;
        let mut ranked: Vec<(OrderedFloat<f64>, &K)> =
            self.pmf.iter().map(|(k, &p)| (OrderedFloat(p), k)).collect();
        ranked.sort_by(|a, b| b.cmp(a));

        let mut interval = Vec::new();
        let mut total = 0.0;
        for (p, k) in ranked {
            interval.push(k.clone());
            total += p.into_inner();
            if total >= percentage / 100.0 {
                break;
            }
        }
        Ok(interval)
    }
}

impl<K: JointKey> Default for Joint<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: JointKey> Deref for Joint<K> {
    type Target = Pmf<K>;

    fn deref(&self) -> &Self::Target {
        &self.pmf
    }
}

impl<K: JointKey> DerefMut for Joint<K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pmf
    }
}

/// Joint distribution of independent draws from `pmf1` and `pmf2`
pub fn make_joint<T: Key>(pmf1: &Pmf<T>, pmf2: &Pmf<T>) -> Joint<(T, T)> {
    let mut joint = Joint::new();
    for (v1, p1) in pmf1.iter() {
        for (v2, p2) in pmf2.iter() {
            joint.set((v1.clone(), v2.clone()), p1 * p2);
        }
    }
    joint
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn coin_and_die() -> Joint<(i64, i64)> {
        make_joint(&Pmf::from_values(0..2i64), &Pmf::from_values(1..=6i64))
    }

    #[test]
    fn test_make_joint_is_product() {
        let joint = coin_and_die();
        assert_eq!(joint.len(), 12);
        assert_abs_diff_eq!(joint.prob(&(1, 3)), 1.0 / 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(joint.total(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_marginals_recover_inputs() {
        let joint = coin_and_die();
        let coin = joint.marginal(0).unwrap();
        assert_abs_diff_eq!(coin.prob(&0), 0.5, epsilon = 1e-12);
        let die = joint.marginal(1).unwrap();
        assert_abs_diff_eq!(die.prob(&6), 1.0 / 6.0, epsilon = 1e-12);
        assert!(matches!(joint.marginal(2), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_conditional_renormalizes() {
        let mut joint: Joint<(i64, i64)> = Joint::new();
        joint.set((1, 1), 0.1);
        joint.set((2, 1), 0.3);
        joint.set((2, 2), 0.6);
        let cond = joint.conditional(0, 1, &1).unwrap();
        assert_abs_diff_eq!(cond.prob(&2), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(cond.total(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_conditional_without_match_is_zero_total() {
        let joint = coin_and_die();
        assert!(matches!(joint.conditional(0, 1, &9), Err(Error::Domain(_))));
    }

    #[test]
    fn test_max_like_interval() {
        let mut joint: Joint<[i64; 2]> = Joint::new();
        joint.set([0, 0], 0.5);
        joint.set([0, 1], 0.3);
        joint.set([1, 1], 0.2);
        assert_eq!(joint.max_like_interval(50.0).unwrap(), vec![[0, 0]]);
        assert_eq!(joint.max_like_interval(70.0).unwrap(), vec![[0, 0], [0, 1]]);
    }
}
