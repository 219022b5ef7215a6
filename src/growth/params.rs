//! Simulation parameters.

use serde::{Deserialize, Serialize};

use super::error::{GrowthResult, SimulationError};

/// What happens when capital would fall below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CapitalFloor {
    /// No floor: capital may go negative and keeps compounding on a negative base.
    #[default]
    Unbounded,
    /// Capital is clamped at zero after each trial (bankroll ruin is absorbing).
    Zero,
}

impl CapitalFloor {
    pub fn apply(self, capital: f64) -> f64 {
        match self {
            Self::Unbounded => capital,
            Self::Zero if capital < 0.0 => 0.0,
            Self::Zero => capital,
        }
    }
}

/// Inputs for one simulated capital trajectory.
///
/// Built once per simulation request and never mutated afterwards. Only the
/// trial count and starting capital are ever rejected (see
/// [`GrowthSimulator::simulate`](super::GrowthSimulator::simulate)); any
/// other combination, however odd economically, is simulated as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    starting_capital: f64,
    bet_fraction: f64,
    win_probability: f64,
    odds: f64,
    stop_loss_factor: f64,
    trial_count: usize,
    #[serde(default)]
    capital_floor: CapitalFloor,
}

impl SimulationParameters {
    pub fn new(
        starting_capital: f64,
        bet_fraction: f64,
        win_probability: f64,
        odds: f64,
        stop_loss_factor: f64,
        trial_count: usize,
    ) -> Self {
        Self {
            starting_capital,
            bet_fraction,
            win_probability,
            odds,
            stop_loss_factor,
            trial_count,
            capital_floor: CapitalFloor::Unbounded,
        }
    }

    /// Like [`new`](Self::new) but takes a signed trial count, as read from
    /// configuration files or the command line.
    ///
    /// # Errors
    /// `InvalidParameter` when `trial_count` is negative.
    pub fn try_new(
        starting_capital: f64,
        bet_fraction: f64,
        win_probability: f64,
        odds: f64,
        stop_loss_factor: f64,
        trial_count: i64,
    ) -> GrowthResult<Self> {
        Ok(Self::new(
            starting_capital,
            bet_fraction,
            win_probability,
            odds,
            stop_loss_factor,
            trial_count_from_signed(trial_count)?,
        ))
    }

    pub fn with_capital_floor(mut self, capital_floor: CapitalFloor) -> Self {
        self.capital_floor = capital_floor;
        self
    }

    pub fn starting_capital(&self) -> f64 {
        self.starting_capital
    }

    pub fn bet_fraction(&self) -> f64 {
        self.bet_fraction
    }

    pub fn win_probability(&self) -> f64 {
        self.win_probability
    }

    pub fn odds(&self) -> f64 {
        self.odds
    }

    pub fn stop_loss_factor(&self) -> f64 {
        self.stop_loss_factor
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn capital_floor(&self) -> CapitalFloor {
        self.capital_floor
    }

    /// Checks the two conditions the simulator refuses to run with.
    pub fn validate(&self) -> GrowthResult<()> {
        if !self.starting_capital.is_finite() {
            return Err(SimulationError::invalid(
                "starting_capital",
                format!("must be finite, got {}", self.starting_capital),
            ));
        }
        Ok(())
    }
}

/// Converts a signed trial count, rejecting negatives.
pub fn trial_count_from_signed(trial_count: i64) -> GrowthResult<usize> {
    usize::try_from(trial_count).map_err(|_| {
        SimulationError::invalid(
            "trial_count",
            format!("must be non-negative, got {}", trial_count),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_unbounded_floor() {
        let params = SimulationParameters::new(5000.0, 0.2, 0.68, 1.3, 0.2, 180);

        assert_eq!(params.starting_capital(), 5000.0);
        assert_eq!(params.bet_fraction(), 0.2);
        assert_eq!(params.win_probability(), 0.68);
        assert_eq!(params.odds(), 1.3);
        assert_eq!(params.stop_loss_factor(), 0.2);
        assert_eq!(params.trial_count(), 180);
        assert_eq!(params.capital_floor(), CapitalFloor::Unbounded);
    }

    #[test]
    fn test_try_new_rejects_negative_trials() {
        let err = SimulationParameters::try_new(5000.0, 0.2, 0.68, 1.3, 0.2, -1).unwrap_err();
        assert_eq!(err.parameter(), "trial_count");

        let ok = SimulationParameters::try_new(5000.0, 0.2, 0.68, 1.3, 0.2, 0).unwrap();
        assert_eq!(ok.trial_count(), 0);
    }

    #[test]
    fn test_validate_rejects_non_finite_capital() {
        for capital in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let params = SimulationParameters::new(capital, 0.2, 0.68, 1.3, 0.2, 10);
            let err = params.validate().unwrap_err();
            assert_eq!(err.parameter(), "starting_capital");
        }
    }

    #[test]
    fn test_validate_accepts_nonsense_economics() {
        // Negative capital, fraction above one, odds below one: all simulated as given
        let params = SimulationParameters::new(-100.0, 1.5, 2.0, 0.5, 3.0, 10);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_capital_floor_apply() {
        assert_eq!(CapitalFloor::Unbounded.apply(-12.5), -12.5);
        assert_eq!(CapitalFloor::Zero.apply(-12.5), 0.0);
        assert_eq!(CapitalFloor::Zero.apply(12.5), 12.5);
    }

    #[test]
    fn test_parameters_json_round_trip_keeps_floor() {
        let params = SimulationParameters::new(5000.0, 0.2, 0.68, 1.3, 0.2, 3)
            .with_capital_floor(CapitalFloor::Zero);

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"capital_floor\":\"zero\""));

        let parsed: SimulationParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
