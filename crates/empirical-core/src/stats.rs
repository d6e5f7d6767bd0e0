//! Sample statistics over plain slices
//!
//! Variance-like quantities take an explicit `ddof` (delta degrees of freedom);
//! `ddof = 0` is the population form used by the permutation tests.

use crate::{Error, Result};
use std::cmp::Ordering;

/// Sort data and return a new vector
///
/// NaN values are placed at the end.
///
/// ```rust
/// use empirical_core::stats::sorted;
///
/// let data = vec![3.0, 1.0, 5.0, 2.0, 4.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(|a, b| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    });
    out
}

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

fn check_dof(n: usize, ddof: usize) -> Result<()> {
    if n <= ddof {
        return Err(Error::InsufficientData {
            expected: ddof + 1,
            actual: n,
        });
    }
    Ok(())
}

/// Variance around a known mean `mu`
pub fn var_around(data: &[f64], mu: f64, ddof: usize) -> Result<f64> {
    check_dof(data.len(), ddof)?;
    let ss: f64 = data.iter().map(|&x| (x - mu) * (x - mu)).sum();
    Ok(ss / (data.len() - ddof) as f64)
}

/// Variance with `ddof` delta degrees of freedom
pub fn var(data: &[f64], ddof: usize) -> Result<f64> {
    var_around(data, mean(data), ddof)
}

/// Standard deviation with `ddof` delta degrees of freedom
pub fn std(data: &[f64], ddof: usize) -> Result<f64> {
    Ok(var(data, ddof)?.sqrt())
}

/// Mean and variance in one call
pub fn mean_var(data: &[f64], ddof: usize) -> Result<(f64, f64)> {
    let mu = mean(data);
    Ok((mu, var_around(data, mu, ddof)?))
}

/// Drop the smallest and largest `int(p * n)` values
pub fn trim(data: &[f64], p: f64) -> Vec<f64> {
    let n = (p * data.len() as f64) as usize;
    let s = sorted(data);
    if 2 * n >= s.len() {
        return Vec::new();
    }
    s[n..s.len() - n].to_vec()
}

/// Mean after [`trim`]
pub fn trimmed_mean(data: &[f64], p: f64) -> f64 {
    mean(&trim(data, p))
}

/// Mean and population variance after [`trim`]
pub fn trimmed_mean_var(data: &[f64], p: f64) -> Result<(f64, f64)> {
    mean_var(&trim(data, p), 0)
}

/// Cohen's d with pooled sample variance
pub fn cohen_effect_size(group1: &[f64], group2: &[f64]) -> Result<f64> {
    let diff = mean(group1) - mean(group2);
    let (n1, n2) = (group1.len() as f64, group2.len() as f64);
    let pooled = (n1 * var(group1, 1)? + n2 * var(group2, 1)?) / (n1 + n2);
    Ok(diff / pooled.sqrt())
}

fn check_paired(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(Error::size_mismatch(xs.len(), ys.len(), "paired samples"));
    }
    if xs.is_empty() {
        return Err(Error::empty_input("paired statistic"));
    }
    Ok(())
}

/// Population covariance
pub fn cov(xs: &[f64], ys: &[f64]) -> Result<f64> {
    check_paired(xs, ys)?;
    let (mx, my) = (mean(xs), mean(ys));
    let s: f64 = xs.iter().zip(ys).map(|(&x, &y)| (x - mx) * (y - my)).sum();
    Ok(s / xs.len() as f64)
}

/// Pearson correlation coefficient
pub fn corr(xs: &[f64], ys: &[f64]) -> Result<f64> {
    check_paired(xs, ys)?;
    let vx = var(xs, 0)?;
    let vy = var(ys, 0)?;
    Ok(cov(xs, ys)? / (vx * vy).sqrt())
}

/// Correlation between a series and itself shifted by `lag`
pub fn serial_corr(series: &[f64], lag: usize) -> Result<f64> {
    if lag >= series.len() {
        return Err(Error::InsufficientData {
            expected: lag + 1,
            actual: series.len(),
        });
    }
    corr(&series[lag..], &series[..series.len() - lag])
}

/// Ordinal ranks starting at 1; ties keep their input order
pub fn map_to_ranks(data: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..data.len()).collect();
    idx.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));
    let mut ranks = vec![0; data.len()];
    for (rank, i) in idx.into_iter().enumerate() {
        ranks[i] = rank + 1;
    }
    ranks
}

/// Ranks starting at 1 with ties assigned their average rank
pub fn average_ranks(data: &[f64]) -> Vec<f64> {
    let mut idx: Vec<usize> = (0..data.len()).collect();
    idx.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));
    let mut ranks = vec![0.0; data.len()];
    let mut start = 0;
    while start < idx.len() {
        let mut end = start + 1;
        while end < idx.len() && data[idx[end]] == data[idx[start]] {
            end += 1;
        }
        // positions start..end share ranks start+1..=end
        let avg = (start + 1 + end) as f64 / 2.0;
        for &i in &idx[start..end] {
            ranks[i] = avg;
        }
        start = end;
    }
    ranks
}

/// Spearman rank correlation
pub fn spearman_corr(xs: &[f64], ys: &[f64]) -> Result<f64> {
    check_paired(xs, ys)?;
    corr(&average_ranks(xs), &average_ranks(ys))
}

/// Linear least squares fit, returning `(intercept, slope)`
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Result<(f64, f64)> {
    check_paired(xs, ys)?;
    let (mx, vx) = mean_var(xs, 0)?;
    let my = mean(ys);
    let slope = cov(xs, ys)? / vx;
    Ok((my - slope * mx, slope))
}

/// Sorted xs and the fitted line evaluated at them
pub fn fit_line(xs: &[f64], inter: f64, slope: f64) -> (Vec<f64>, Vec<f64>) {
    let fit_xs = sorted(xs);
    let fit_ys = fit_xs.iter().map(|&x| inter + slope * x).collect();
    (fit_xs, fit_ys)
}

/// Residuals of a linear fit
pub fn residuals(xs: &[f64], ys: &[f64], inter: f64, slope: f64) -> Result<Vec<f64>> {
    check_paired(xs, ys)?;
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| y - (inter + slope * x))
        .collect())
}

/// Coefficient of determination (R²) for given residuals
pub fn coef_determination(ys: &[f64], res: &[f64]) -> Result<f64> {
    Ok(1.0 - var(res, 0)? / var(ys, 0)?)
}

/// k-th raw moment
pub fn raw_moment(data: &[f64], k: i32) -> Result<f64> {
    if data.is_empty() {
        return Err(Error::empty_input("raw_moment"));
    }
    Ok(data.iter().map(|x| x.powi(k)).sum::<f64>() / data.len() as f64)
}

/// k-th central moment
pub fn central_moment(data: &[f64], k: i32) -> Result<f64> {
    let mu = raw_moment(data, 1)?;
    Ok(data.iter().map(|x| (x - mu).powi(k)).sum::<f64>() / data.len() as f64)
}

/// k-th standardized moment
pub fn standardized_moment(data: &[f64], k: i32) -> Result<f64> {
    let std = central_moment(data, 2)?.sqrt();
    Ok(central_moment(data, k)? / std.powi(k))
}

/// Sample skewness (third standardized moment)
pub fn skewness(data: &[f64]) -> Result<f64> {
    standardized_moment(data, 3)
}

/// Smallest sample value whose empirical CDF reaches `p`
pub fn quantile_step(data: &[f64], p: f64) -> Result<f64> {
    Error::check_probability(p)?;
    if data.is_empty() {
        return Err(Error::empty_input("quantile"));
    }
    let s = sorted(data);
    let idx = ((p * s.len() as f64).ceil() as usize).saturating_sub(1);
    Ok(s[idx.min(s.len() - 1)])
}

/// Median as the 50th percentile of the empirical CDF
pub fn median(data: &[f64]) -> Result<f64> {
    quantile_step(data, 0.5)
}

/// Pearson's median skewness, `3 (mean - median) / std`
pub fn pearson_median_skewness(data: &[f64]) -> Result<f64> {
    let med = median(data)?;
    let mu = raw_moment(data, 1)?;
    let std = central_moment(data, 2)?.sqrt();
    Ok(3.0 * (mu - med) / std)
}
