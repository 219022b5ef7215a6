//! Integration tests for the public growth API
//!
//! These tests drive the library the way the `kelly_sim` binary does:
//! Kelly fraction → scaled fractions → one seeded trajectory per fraction.

use kelly_growth::growth::{
    run_plans, CapitalFloor, RandomSource, ReplaySource, SeededSource, SimulationParameters,
};
use kelly_growth::{kelly_fraction, simulate, simulate_batch, SimulationConfig};

/// Uniform draws that are always below any positive win probability.
struct AlwaysWin;

impl RandomSource for AlwaysWin {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

#[test]
fn test_half_kelly_reference_workflow() {
    let full = kelly_fraction(0.68, 1.3).unwrap();
    assert!((full - 0.433_846_153_846_153_8).abs() < 1e-9);

    let params = SimulationParameters::new(5000.0, full * 0.5, 0.68, 1.3, 0.2, 180);
    let trajectory = simulate(&params, SeededSource::seeded(42)).unwrap();

    assert_eq!(trajectory.len(), 181);
    assert_eq!(trajectory.values()[0], 5000.0);

    let summary = trajectory.summary();
    let expected_pct = (summary.final_capital - 5000.0) / 5000.0 * 100.0;
    assert!((summary.percent_return - expected_pct).abs() < 1e-9);
}

#[test]
fn test_custom_random_source_pure_win() {
    let params = SimulationParameters::new(5000.0, 0.2, 0.68, 1.3, 0.2, 3);
    let trajectory = simulate(&params, AlwaysWin).unwrap();

    let expected = [5000.0, 5300.0, 5618.0, 5955.08];
    for (actual, expected) in trajectory.values().iter().zip(expected) {
        assert!((actual - expected).abs() < 1e-9);
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let params = SimulationParameters::new(5000.0, 0.1, 0.68, 1.3, 0.2, 300);

    let fingerprints: Vec<u64> = (0..5)
        .map(|_| {
            simulate(&params, SeededSource::seeded(2024))
                .unwrap()
                .fingerprint()
        })
        .collect();

    assert!(fingerprints.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_config_plans_through_batch() {
    let config = SimulationConfig {
        kelly_multipliers: vec![0.25, 0.5, 1.0],
        trials: 60,
        ..SimulationConfig::default()
    };

    let plans = config.plans().unwrap();
    let reports = run_plans(&plans, config.seed).unwrap();
    let again = run_plans(&plans, config.seed).unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(reports, again);
    for report in &reports {
        assert_eq!(report.trajectory.len(), 61);
        assert_eq!(report.result.wins + report.result.losses, 60);
    }
}

#[test]
fn test_batch_of_flat_runs() {
    let params = vec![SimulationParameters::new(750.0, 0.0, 0.5, 2.0, 1.0, 40); 4];
    let trajectories = simulate_batch(&params, 3).unwrap();

    for trajectory in trajectories {
        assert!(trajectory.values().iter().all(|&c| c == 750.0));
    }
}

#[test]
fn test_ruin_with_and_without_floor() {
    let draws = ReplaySource::new(vec![0.99, 0.99, 0.0]);
    let unbounded = SimulationParameters::new(100.0, 1.5, 0.5, 2.0, 1.0, 3);
    let floored = unbounded.with_capital_floor(CapitalFloor::Zero);

    let free = simulate(&unbounded, draws.clone()).unwrap();
    let clamped = simulate(&floored, draws).unwrap();

    // 100 -> -50 -> 25 -> 62.5 without a floor
    assert_eq!(free.values(), &[100.0, -50.0, 25.0, 62.5]);
    assert_eq!(clamped.values(), &[100.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_invalid_inputs_surface_as_errors() {
    assert!(kelly_fraction(0.5, 0.0).is_err());
    assert!(SimulationParameters::try_new(100.0, 0.1, 0.5, 2.0, 1.0, -1).is_err());

    let params = SimulationParameters::new(f64::NAN, 0.1, 0.5, 2.0, 1.0, 1);
    let err = simulate(&params, ReplaySource::constant(0.0)).unwrap_err();
    assert!(err.to_string().contains("starting_capital"));
}
