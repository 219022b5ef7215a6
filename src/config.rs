//! Simulation configuration
//!
//! Scalar inputs for a run, Kelly multipliers to derive bet fractions from,
//! and the seed. Loaded from TOML; every field has a default so a partial
//! file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::growth::{
    kelly_fraction, trial_count_from_signed, CapitalFloor, GrowthResult, RunPlan,
    SimulationError, SimulationParameters,
};

/// Environment variable naming the config file read by [`SimulationConfig::from_env`].
pub const CONFIG_PATH_ENV: &str = "KELLY_SIM_CONFIG_PATH";

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Probability of winning a single bet (0-1)
    #[serde(default = "default_win_probability")]
    pub win_probability: f64,

    /// Payout multiplier on a winning bet
    #[serde(default = "default_odds")]
    pub odds: f64,

    /// Number of bets per run. Signed so that a bad file is reported, not
    /// rejected by the TOML parser.
    #[serde(default = "default_trials")]
    pub trials: i64,

    /// Bankroll at the start of every run
    #[serde(default = "default_starting_capital")]
    pub starting_capital: f64,

    /// Fraction of the stake lost on a losing bet
    #[serde(default = "default_stop_loss")]
    pub stop_loss: f64,

    /// Kelly multipliers, one run each (0.5 = half Kelly)
    #[serde(default = "default_kelly_multipliers")]
    pub kelly_multipliers: Vec<f64>,

    /// Seed for the batch generator
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Behaviour below zero capital
    #[serde(default)]
    pub capital_floor: CapitalFloor,
}

fn default_win_probability() -> f64 {
    0.68
}
fn default_odds() -> f64 {
    1.3
}
fn default_trials() -> i64 {
    180
}
fn default_starting_capital() -> f64 {
    5000.0
}
fn default_stop_loss() -> f64 {
    0.2
}
fn default_kelly_multipliers() -> Vec<f64> {
    vec![0.5]
}
fn default_seed() -> u64 {
    42
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            win_probability: default_win_probability(),
            odds: default_odds(),
            trials: default_trials(),
            starting_capital: default_starting_capital(),
            stop_loss: default_stop_loss(),
            kelly_multipliers: default_kelly_multipliers(),
            seed: default_seed(),
            capital_floor: CapitalFloor::default(),
        }
    }
}

impl SimulationConfig {
    /// Load from TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from environment or default path
    pub fn from_env() -> Self {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "kelly_sim.toml".to_string());

        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Using default simulation config ({}): {}", path, e);
            Self::default()
        })
    }

    /// Save to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject only what the engine cannot run; everything else is simulated as given.
    pub fn validate(&self) -> GrowthResult<()> {
        trial_count_from_signed(self.trials)?;

        if !self.starting_capital.is_finite() {
            return Err(SimulationError::invalid(
                "starting_capital",
                format!("must be finite, got {}", self.starting_capital),
            ));
        }
        if self.kelly_multipliers.is_empty() {
            return Err(SimulationError::invalid(
                "kelly_multipliers",
                "at least one multiplier is required",
            ));
        }
        kelly_fraction(self.win_probability, self.odds)?;
        Ok(())
    }

    /// Full Kelly fraction for the configured bet.
    pub fn full_kelly(&self) -> GrowthResult<f64> {
        kelly_fraction(self.win_probability, self.odds)
    }

    /// One run per multiplier, each betting `multiplier * full_kelly`.
    pub fn plans(&self) -> GrowthResult<Vec<RunPlan>> {
        self.validate()?;
        let full_kelly = self.full_kelly()?;

        self.kelly_multipliers
            .iter()
            .map(|&multiplier| -> GrowthResult<RunPlan> {
                let params = SimulationParameters::try_new(
                    self.starting_capital,
                    full_kelly * multiplier,
                    self.win_probability,
                    self.odds,
                    self.stop_loss,
                    self.trials,
                )?
                .with_capital_floor(self.capital_floor);

                Ok(RunPlan { multiplier, params })
            })
            .collect()
    }
}
