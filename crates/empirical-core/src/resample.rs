//! Bootstrap resampling helpers
//!
//! All functions draw from a caller-supplied generator.

use crate::{Error, Result};
use rand::distributions::WeightedIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

/// Draw `n` values from `data` with replacement
pub fn resample<T: Clone, R: Rng + ?Sized>(data: &[T], n: usize, rng: &mut R) -> Result<Vec<T>> {
    if data.is_empty() {
        return Err(Error::empty_input("resample"));
    }
    Ok((0..n)
        .filter_map(|_| data.choose(rng).cloned())
        .collect())
}

/// Draw `data.len()` values with probability proportional to `weights`
pub fn resample_weighted<T: Clone, R: Rng + ?Sized>(
    data: &[T],
    weights: &[f64],
    rng: &mut R,
) -> Result<Vec<T>> {
    if data.len() != weights.len() {
        return Err(Error::size_mismatch(data.len(), weights.len(), "weighted resample"));
    }
    let dist = WeightedIndex::new(weights).map_err(|e| Error::parameter("weights", e))?;
    Ok((0..data.len()).map(|_| data[dist.sample(rng)].clone()).collect())
}

/// Add Gaussian noise with standard deviation `jitter` to every value
pub fn jitter<R: Rng + ?Sized>(values: &[f64], jitter: f64, rng: &mut R) -> Result<Vec<f64>> {
    let noise = Normal::new(0.0, jitter).map_err(|e| Error::parameter("jitter", e))?;
    Ok(values.iter().map(|&v| v + noise.sample(rng)).collect())
}

/// `n` normal variates with lag-1 serial correlation `rho`
pub fn correlated_normal<R: Rng + ?Sized>(
    mu: f64,
    sigma: f64,
    rho: f64,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(-1.0..=1.0).contains(&rho) {
        return Err(Error::OutOfRange(format!("correlation {rho} must be in [-1, 1]")));
    }
    let standard = Normal::new(0.0, 1.0).map_err(|e| Error::parameter("normal", e))?;
    let scale = (1.0 - rho * rho).sqrt();
    let mut out = Vec::with_capacity(n);
    let mut x: f64 = standard.sample(rng);
    for i in 0..n {
        if i > 0 {
            x = x * rho + scale * standard.sample(rng);
        }
        out.push(x * sigma + mu);
    }
    Ok(out)
}

/// Select the row of an already sorted set of rows at percentile `p`
///
/// The index is `int(rows * p / 100)`, truncated toward zero.
pub fn percentile_row<T: Clone>(rows: &[T], p: f64) -> Result<T> {
    Error::check_percentage(p)?;
    let index = (rows.len() as f64 * p / 100.0) as usize;
    rows.get(index).cloned().ok_or_else(|| {
        Error::OutOfRange(format!(
            "percentile {p} selects row {index} of {}",
            rows.len()
        ))
    })
}

/// Pointwise percentile bands over a collection of equal-length series
///
/// Each column is sorted independently, then [`percentile_row`] picks one row
/// per requested percentile. With simulated curves and `percents = [5, 95]`
/// this yields a 90% band.
pub fn percentile_rows(series: &[Vec<f64>], percents: &[f64]) -> Result<Vec<Vec<f64>>> {
    let first = series.first().ok_or_else(|| Error::empty_input("percentile_rows"))?;
    let ncols = first.len();
    if let Some(bad) = series.iter().find(|s| s.len() != ncols) {
        return Err(Error::size_mismatch(ncols, bad.len(), "percentile_rows"));
    }

    let mut columns: Vec<Vec<f64>> = (0..ncols)
        .map(|j| series.iter().map(|s| s[j]).collect())
        .collect();
    for col in &mut columns {
        col.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }

    let nrows = series.len();
    percents
        .iter()
        .map(|&p| {
            Error::check_percentage(p)?;
            let index = (nrows as f64 * p / 100.0) as usize;
            if index >= nrows {
                return Err(Error::OutOfRange(format!(
                    "percentile {p} selects row {index} of {nrows}"
                )));
            }
            Ok(columns.iter().map(|col| col[index]).collect())
        })
        .collect()
}
