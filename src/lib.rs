//! Kelly Growth Library
//!
//! Kelly criterion bet fractions and seeded simulation of bankroll growth
//! under repeated binary bets. Exposes the engine for the `kelly_sim`
//! binary and for tests.

pub mod config;
pub mod growth;

pub use config::SimulationConfig;
pub use growth::{
    kelly_fraction, simulate, simulate_batch, GrowthSimulator, SimulationError,
    SimulationParameters, SimulationResult, Trajectory,
};
