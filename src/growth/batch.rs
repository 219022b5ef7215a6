//! Batch runs: one trajectory per parameter set.
//!
//! Each run gets stream `index` of a ChaCha8 generator seeded with the batch
//! seed, so results depend only on `(seed, index, params)` and not on how rayon
//! schedules the work.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::GrowthResult;
use super::params::SimulationParameters;
use super::random::SeededSource;
use super::simulator::GrowthSimulator;
use super::trajectory::{SimulationResult, Trajectory};

/// Simulate every parameter set in parallel, preserving input order.
pub fn simulate_batch(
    params: &[SimulationParameters],
    seed: u64,
) -> GrowthResult<Vec<Trajectory>> {
    let simulator = GrowthSimulator::new();

    let trajectories = params
        .par_iter()
        .enumerate()
        .map(|(index, p)| simulator.simulate(p, SeededSource::with_stream(seed, index as u64)))
        .collect::<GrowthResult<Vec<_>>>()?;

    info!(runs = trajectories.len(), seed, "batch simulation complete");
    Ok(trajectories)
}

/// One planned run: the Kelly multiplier it came from and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPlan {
    pub multiplier: f64,
    pub params: SimulationParameters,
}

/// A finished run, ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub multiplier: f64,
    pub bet_fraction: f64,
    pub params: SimulationParameters,
    pub result: SimulationResult,
    pub fingerprint: u64,
    pub trajectory: Trajectory,
}

impl RunReport {
    pub fn new(plan: &RunPlan, trajectory: Trajectory) -> Self {
        Self {
            multiplier: plan.multiplier,
            bet_fraction: plan.params.bet_fraction(),
            params: plan.params,
            result: trajectory.summary(),
            fingerprint: trajectory.fingerprint(),
            trajectory,
        }
    }
}

/// Run every plan and pair each with its trajectory.
pub fn run_plans(plans: &[RunPlan], seed: u64) -> GrowthResult<Vec<RunReport>> {
    let params: Vec<SimulationParameters> = plans.iter().map(|plan| plan.params).collect();
    let trajectories = simulate_batch(&params, seed)?;

    Ok(plans
        .iter()
        .zip(trajectories)
        .map(|(plan, trajectory)| RunReport::new(plan, trajectory))
        .collect())
}
