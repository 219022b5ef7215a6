//! Growth Module - Kelly Sizing & Capital Simulation
//!
//! This module handles:
//! 1. Kelly criterion bet fractions for binary bets
//! 2. Single-path capital simulation under fractional betting
//! 3. Seeded batch runs, one per bet fraction
//!
//! # Determinism Guarantees
//!
//! - **RNG**: Injected per call, seeded `ChaCha8Rng` in production
//! - **Batches**: One ChaCha stream per run index, independent of thread scheduling

pub mod batch;
pub mod error;
pub mod kelly;
pub mod params;
pub mod random;
pub mod simulator;
pub mod trajectory;


pub use batch::{run_plans, simulate_batch, RunPlan, RunReport};
pub use error::{GrowthResult, SimulationError};
pub use kelly::{kelly_fraction, KellySizing};
pub use params::{trial_count_from_signed, CapitalFloor, SimulationParameters};
pub use random::{RandomSource, ReplaySource, RngSource, SeededSource};
pub use simulator::{simulate, GrowthSimulator};
pub use trajectory::{Outcome, SimulationResult, Trajectory};
