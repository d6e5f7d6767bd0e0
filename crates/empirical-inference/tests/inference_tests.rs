//! Suites and resampling tests driven end to end

use approx::assert_abs_diff_eq;
use empirical_core::{Error, RandomContext, Result};
use empirical_inference::{
    student_cdf, CoinTest, CorrelationPermute, Likelihood, ResamplingConfig, ResamplingTest,
    Suite, HIGH_PRECISION_ITERATIONS,
};
use proptest::prelude::*;

/// Locomotive problem: how many trains, given one observed serial number?
struct Train;

impl Likelihood<u32, u32> for Train {
    fn likelihood(&self, data: &u32, hypo: &u32) -> Result<f64> {
        if data == &0 {
            return Err(anyhow::anyhow!("serial numbers start at 1").into());
        }
        Ok(if data > hypo { 0.0 } else { 1.0 / *hypo as f64 })
    }
}

#[test]
fn test_locomotive_posterior() {
    let mut suite = Suite::from_values(1..=1000u32, Train);
    suite.update(&60u32).unwrap();
    assert_eq!(suite.prob(&59), 0.0);
    assert_eq!(suite.mode().unwrap(), 60);
    assert!((suite.mean() - 333.4).abs() < 1.0);

    suite.update_set(&[30u32, 90]).unwrap();
    assert_eq!(suite.prob(&89), 0.0);
    assert_abs_diff_eq!(suite.total(), 1.0, epsilon = 1e-9);
    let (low, high) = suite.credible_interval(90.0).unwrap();
    assert!(low >= 90 && high <= 1000 && low < high);
}

#[test]
fn test_model_failure_surfaces_as_other() {
    let mut suite = Suite::from_values(1..=10u32, Train);
    assert!(matches!(suite.update(&0u32), Err(Error::Other(_))));
}

#[test]
fn test_coin_p_value_is_stable_across_seeds() {
    let p_values: Vec<f64> = (0..3)
        .map(|seed| {
            let mut rng = RandomContext::seeded(seed);
            let mut test = ResamplingTest::new(CoinTest::new(), (55, 45)).unwrap();
            test.p_value(HIGH_PRECISION_ITERATIONS, &mut rng).unwrap()
        })
        .collect();
    for p in &p_values {
        assert!((p - p_values[0]).abs() <= 0.03, "{p_values:?}");
        assert!((p - 0.37).abs() < 0.05);
    }
}

#[test]
fn test_seeded_runs_agree_on_unbalanced_coin() {
    let config = ResamplingConfig::high_precision();
    let p_values: Vec<f64> = (0..4)
        .map(|seed| {
            let mut test = ResamplingTest::new(CoinTest::new(), (55, 45)).unwrap();
            test.run(&config.with_seed(seed)).unwrap().p_value
        })
        .collect();
    let lo = p_values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = p_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(hi - lo <= 0.03, "p-values {p_values:?}");
    assert!((0.3..0.45).contains(&lo), "p-values {p_values:?}");

    let mut again = ResamplingTest::new(CoinTest::new(), (55, 45)).unwrap();
    assert_eq!(again.run(&config.with_seed(0)).unwrap().p_value, p_values[0]);
}

#[test]
fn test_fair_coin_data_has_p_value_one() {
    let config = ResamplingConfig::high_precision().with_seed(5);
    assert_eq!(config.iterations, HIGH_PRECISION_ITERATIONS);
    let mut test = ResamplingTest::new(CoinTest::new(), (50, 50)).unwrap();
    let report = test.run(&config).unwrap();
    assert_eq!(report.p_value, 1.0);
    assert_eq!(report.actual, 0.0);
}

#[test]
fn test_null_correlations_follow_student() {
    let n = 40;
    let xs: Vec<f64> = (0..n).map(|i| ((i * 13) % n) as f64).collect();
    let ys: Vec<f64> = (0..n).map(|i| ((i * 29 + 3) % n) as f64).collect();
    let mut rng = RandomContext::seeded(9);
    let mut test = ResamplingTest::new(CorrelationPermute::new(), (xs, ys)).unwrap();
    test.p_value(2000, &mut rng).unwrap();

    // |r| is simulated; compare P(|r| <= 0.3) with the two-sided model
    let simulated = test.test_cdf().unwrap();
    let model = student_cdf(n).unwrap();
    let r = empirical_core::real(0.3);
    let model_prob = model.prob(&r) - model.prob(&-r);
    assert!((simulated.prob(&r) - model_prob).abs() < 0.05);
}

proptest! {
    #[test]
    fn prop_update_keeps_posterior_normalized(like in prop::collection::vec(0.01f64..10.0, 5)) {
        let model = empirical_inference::likelihood_fn(move |_: &(), h: &usize| like[*h]);
        let mut suite = Suite::from_values(0..5usize, model);
        suite.update(&()).unwrap();
        prop_assert!((suite.total() - 1.0).abs() < 1e-9);
    }
}
