use super::*;
use crate::errors::{CalculatorError, Error};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(start_price: f64, simulations: usize, seed: u64) -> MonteCarloParams {
    MonteCarloParams {
        simulations,
        seed: Some(seed),
        ..MonteCarloParams::new(start_price)
    }
}

#[test]
fn test_defaults_are_applied_when_deserializing() {
    let params: MonteCarloParams = serde_json::from_str(r#"{ "startPrice": 150.0 }"#).unwrap();

    assert_eq!(params, MonteCarloParams::new(150.0));
    assert_eq!(params.mu, 0.10);
    assert_eq!(params.sigma, 0.25);
    assert_eq!(params.months, 12);
    assert_eq!(params.simulations, 1_000);
}

#[test]
fn test_sample_count_matches_and_is_sorted() {
    let result = run_simulation(&seeded(100.0, 1_000, 7), MAX_SIMULATIONS).unwrap();

    assert_eq!(result.samples.len(), 1_000);
    assert!(result.samples.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(result.median, result.samples[500]);
    assert_eq!(result.p90, result.samples[900]);
    assert!(result.p90 >= result.median);
}

#[test]
fn test_same_seed_reproduces_the_run() {
    let a = run_simulation(&seeded(100.0, 200, 42), MAX_SIMULATIONS).unwrap();
    let b = run_simulation(&seeded(100.0, 200, 42), MAX_SIMULATIONS).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_zero_volatility_is_deterministic_drift() {
    let params = MonteCarloParams {
        sigma: 0.0,
        mu: 0.12,
        months: 12,
        ..seeded(100.0, 10, 1)
    };

    let result = run_simulation(&params, MAX_SIMULATIONS).unwrap();

    let expected = 100.0 * (0.12f64).exp();
    assert!(result.samples.iter().all(|s| (s - expected).abs() < 1e-9));
}

#[test]
fn test_single_path_uses_it_for_both_percentiles() {
    let mut rng = StdRng::seed_from_u64(3);
    let result = simulate(&seeded(50.0, 1, 0), MAX_SIMULATIONS, &mut rng).unwrap();

    assert_eq!(result.samples.len(), 1);
    assert_eq!(result.median, result.samples[0]);
    assert_eq!(result.p90, result.samples[0]);
}

#[test]
fn test_unusable_start_price_is_rejected() {
    for price in [0.0, -10.0, f64::NAN] {
        let err = run_simulation(&seeded(price, 10, 1), MAX_SIMULATIONS).unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::InvalidStartPrice(_))
        ));
    }
}

#[test]
fn test_out_of_range_parameters_are_rejected() {
    let too_many = seeded(100.0, 501, 1);
    assert!(matches!(
        run_simulation(&too_many, 500).unwrap_err(),
        Error::Validation(_)
    ));

    let no_paths = seeded(100.0, 0, 1);
    assert!(run_simulation(&no_paths, MAX_SIMULATIONS).is_err());

    let negative_sigma = MonteCarloParams {
        sigma: -0.1,
        ..seeded(100.0, 10, 1)
    };
    assert!(run_simulation(&negative_sigma, MAX_SIMULATIONS).is_err());

    let no_months = MonteCarloParams {
        months: 0,
        ..seeded(100.0, 10, 1)
    };
    assert!(run_simulation(&no_months, MAX_SIMULATIONS).is_err());
}

#[test]
fn test_horizon_is_capped() {
    let longest = MonteCarloParams {
        months: MAX_MONTHS,
        ..seeded(100.0, 1, 1)
    };
    assert!(longest.validate(MAX_SIMULATIONS).is_ok());

    let beyond = MonteCarloParams {
        months: MAX_MONTHS + 1,
        ..seeded(100.0, 1, 1)
    };
    assert!(matches!(
        beyond.validate(MAX_SIMULATIONS).unwrap_err(),
        Error::Validation(_)
    ));

    let unbounded = MonteCarloParams {
        months: u32::MAX,
        ..seeded(100.0, MAX_SIMULATIONS, 1)
    };
    assert!(run_simulation(&unbounded, MAX_SIMULATIONS).is_err());
}

#[test]
fn test_histogram_spreads_samples_over_bins() {
    let samples: Vec<f64> = (0..100).map(f64::from).collect();

    let hist = histogram(&samples, 10);

    assert_eq!(hist.bins.len(), 10);
    assert_eq!(hist.min, 0.0);
    assert_eq!(hist.max, 99.0);
    assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 100);
    // The maximum is clamped into the last bin
    assert!(hist.bins[9].count >= 1);
}

#[test]
fn test_histogram_of_identical_samples_uses_unit_width() {
    let hist = histogram(&[5.0, 5.0, 5.0], DEFAULT_HISTOGRAM_BINS);

    assert_eq!(hist.bin_width, 1.0);
    assert_eq!(hist.bins.len(), 40);
    assert_eq!(hist.bins[0].count, 3);
}

#[test]
fn test_histogram_of_nothing_is_empty() {
    assert!(histogram(&[], DEFAULT_HISTOGRAM_BINS).bins.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_samples_match_requested_count_and_stay_sorted(
        simulations in 1usize..400,
        months in 1u32..36,
        seed in any::<u64>(),
        start_price in 0.01f64..10_000.0,
    ) {
        let params = MonteCarloParams {
            months,
            ..seeded(start_price, simulations, seed)
        };
        let result = run_simulation(&params, MAX_SIMULATIONS).unwrap();

        prop_assert_eq!(result.samples.len(), simulations);
        prop_assert!(result.samples.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(result.samples.iter().all(|s| *s > 0.0));
    }
}
