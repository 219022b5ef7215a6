//! Capital Trajectory
//!
//! The ordered capital values of one simulated run together with the outcome
//! of every trial.
//!
//! # Invariants
//!
//! - `capital.len() == outcomes.len() + 1`
//! - `capital[0]` is the starting capital, `capital[i]` the capital after trial `i`.
//!
//! Summary statistics are always derived from the trajectory, never stored:
//!
//! ```text
//! absolute_return = final - starting
//! percent_return  = absolute_return / starting * 100
//! drawdown(i)     = max(capital[..=i]) - capital[i]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::error::SimulationError;

/// Result of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
}

/// Capital path of one simulation run. Immutable once returned.
///
/// Deserialization goes through [`RawTrajectory`] and rejects input that
/// breaks the length invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrajectory")]
pub struct Trajectory {
    capital: Vec<f64>,
    outcomes: Vec<Outcome>,
}

/// Unchecked wire form of a [`Trajectory`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrajectory {
    pub capital: Vec<f64>,
    pub outcomes: Vec<Outcome>,
}

impl TryFrom<RawTrajectory> for Trajectory {
    type Error = SimulationError;

    fn try_from(raw: RawTrajectory) -> Result<Self, Self::Error> {
        if raw.capital.is_empty() {
            return Err(SimulationError::invalid(
                "capital",
                "trajectory needs at least the starting capital",
            ));
        }
        if raw.capital.len() != raw.outcomes.len() + 1 {
            return Err(SimulationError::invalid(
                "outcomes",
                format!(
                    "expected {} outcomes for {} capital values, got {}",
                    raw.capital.len() - 1,
                    raw.capital.len(),
                    raw.outcomes.len()
                ),
            ));
        }
        Ok(Self {
            capital: raw.capital,
            outcomes: raw.outcomes,
        })
    }
}

impl Trajectory {
    pub(crate) fn with_capacity(starting_capital: f64, trial_count: usize) -> Self {
        let mut capital = Vec::with_capacity(trial_count + 1);
        capital.push(starting_capital);
        Self {
            capital,
            outcomes: Vec::with_capacity(trial_count),
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome, capital: f64) {
        self.outcomes.push(outcome);
        self.capital.push(capital);
    }

    /// Capital values, starting capital first.
    pub fn values(&self) -> &[f64] {
        &self.capital
    }

    /// Outcome of each trial, in order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of capital values (trials + 1).
    pub fn len(&self) -> usize {
        self.capital.len()
    }

    /// Never true for a trajectory produced by the simulator.
    pub fn is_empty(&self) -> bool {
        self.capital.is_empty()
    }

    pub fn trial_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn starting_capital(&self) -> f64 {
        self.capital[0]
    }

    pub fn final_capital(&self) -> f64 {
        self.capital[self.capital.len() - 1]
    }

    pub fn into_values(self) -> Vec<f64> {
        self.capital
    }

    /// Hash over the exact bit patterns of every value and outcome.
    ///
    /// Two trajectories with the same fingerprint are byte-identical for all
    /// practical purposes; used to compare reruns of a seed.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for value in &self.capital {
            value.to_bits().hash(&mut hasher);
        }
        self.outcomes.hash(&mut hasher);
        hasher.finish()
    }

    pub fn summary(&self) -> SimulationResult {
        SimulationResult::from_trajectory(self)
    }
}

/// Summary statistics derived from a [`Trajectory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub starting_capital: f64,
    pub final_capital: f64,
    /// final - starting
    pub absolute_return: f64,
    /// absolute_return / starting * 100
    pub percent_return: f64,
    pub peak_capital: f64,
    pub trough_capital: f64,
    /// Largest peak-to-trough decline in capital units.
    pub max_drawdown: f64,
    /// Largest decline relative to its peak, in percent (0 when the peak is not positive).
    pub max_drawdown_pct: f64,
    pub wins: usize,
    pub losses: usize,
}

impl SimulationResult {
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let starting = trajectory.starting_capital();
        let final_capital = trajectory.final_capital();
        let absolute_return = final_capital - starting;

        let mut peak = starting;
        let mut trough = starting;
        let mut max_drawdown = 0.0_f64;
        let mut max_drawdown_pct = 0.0_f64;

        for &capital in trajectory.values() {
            if capital > peak {
                peak = capital;
            }
            if capital < trough {
                trough = capital;
            }

            let drawdown = peak - capital;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
            if peak > 0.0 {
                let pct = drawdown / peak * 100.0;
                if pct > max_drawdown_pct {
                    max_drawdown_pct = pct;
                }
            }
        }

        let wins = trajectory
            .outcomes()
            .iter()
            .filter(|o| **o == Outcome::Win)
            .count();

        Self {
            starting_capital: starting,
            final_capital,
            absolute_return,
            percent_return: absolute_return / starting * 100.0,
            peak_capital: peak,
            trough_capital: trough,
            max_drawdown,
            max_drawdown_pct,
            wins,
            losses: trajectory.trial_count() - wins,
        }
    }
}
