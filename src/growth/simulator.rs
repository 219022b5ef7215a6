//! Growth Simulator
//!
//! Simulates one capital path over a run of independent binary bets. Each
//! trial stakes `bet_fraction` of the *current* capital, so gains and losses
//! compound multiplicatively:
//!
//! ```text
//! bet      = bet_fraction * capital
//! win  (u < p): capital += bet * (odds - 1)
//! loss (else) : capital -= bet * stop_loss_factor
//! ```
//!
//! Exactly one uniform draw is consumed per trial. Negative capital is not an
//! error and keeps compounding under the same formula unless the parameters
//! opt into [`CapitalFloor::Zero`](super::CapitalFloor::Zero). Overflow to
//! infinity or NaN is left to IEEE semantics and only logged.

use tracing::{debug, warn};

use super::error::GrowthResult;
use super::params::SimulationParameters;
use super::random::RandomSource;
use super::trajectory::{Outcome, Trajectory};

/// Single-path simulator. Holds no state between calls, so one instance can
/// be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthSimulator;

impl GrowthSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Run one trajectory.
    ///
    /// # Errors
    /// `InvalidParameter` if the starting capital is not finite.
    pub fn simulate<S: RandomSource>(
        &self,
        params: &SimulationParameters,
        mut source: S,
    ) -> GrowthResult<Trajectory> {
        params.validate()?;

        let trials = params.trial_count();
        let fraction = params.bet_fraction();
        let win_probability = params.win_probability();
        let win_multiplier = params.odds() - 1.0;
        let stop_loss = params.stop_loss_factor();
        let floor = params.capital_floor();

        debug!(
            starting_capital = params.starting_capital(),
            bet_fraction = fraction,
            win_probability,
            odds = params.odds(),
            stop_loss_factor = stop_loss,
            trials,
            ?floor,
            "starting growth simulation"
        );

        let mut trajectory = Trajectory::with_capacity(params.starting_capital(), trials);
        let mut capital = params.starting_capital();
        let mut warned_negative = false;
        let mut warned_non_finite = false;

        for trial in 1..=trials {
            let bet = fraction * capital;

            let outcome = if source.next_unit() < win_probability {
                capital += bet * win_multiplier;
                Outcome::Win
            } else {
                capital -= bet * stop_loss;
                Outcome::Loss
            };
            capital = floor.apply(capital);

            if !warned_non_finite && !capital.is_finite() {
                warn!(trial, capital, "capital is no longer finite");
                warned_non_finite = true;
            } else if !warned_negative && capital < 0.0 {
                warn!(trial, capital, "capital went negative");
                warned_negative = true;
            }

            trajectory.record(outcome, capital);
        }

        debug!(
            final_capital = trajectory.final_capital(),
            trials,
            "growth simulation complete"
        );

        Ok(trajectory)
    }
}

/// Shorthand for `GrowthSimulator::new().simulate(params, source)`.
pub fn simulate<S: RandomSource>(
    params: &SimulationParameters,
    source: S,
) -> GrowthResult<Trajectory> {
    GrowthSimulator::new().simulate(params, source)
}
