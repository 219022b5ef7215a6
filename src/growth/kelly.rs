//! Kelly Criterion Bet Sizing
//!
//! The Kelly Criterion determines the fraction of bankroll that maximises the
//! expected log growth of a repeated binary bet.
//! Formula: f* = (bp - q) / b
//! Where:
//!   f* = fraction of bankroll to bet
//!   b = payout odds (a win returns b times the stake)
//!   p = probability of winning
//!   q = probability of losing (1 - p)
//!
//! The fraction is a reference point only. It is never clamped here: a
//! negative value is the "don't bet" signal, and out-of-range inputs
//! (p outside [0, 1], negative b) can push it above 1. Callers usually scale it down
//! (half Kelly = 0.5x) before handing it to the simulator.

use serde::{Deserialize, Serialize};

use super::error::{GrowthResult, SimulationError};

/// Full Kelly fraction for a binary bet.
///
/// # Arguments
/// * `win_probability` - Probability of winning (0.0 to 1.0)
/// * `odds` - Payout multiplier, must be non-zero
///
/// # Errors
/// `InvalidParameter` when `odds == 0`.
pub fn kelly_fraction(win_probability: f64, odds: f64) -> GrowthResult<f64> {
    if odds == 0.0 {
        return Err(SimulationError::invalid(
            "odds",
            "must be non-zero to compute the Kelly fraction",
        ));
    }

    let p = win_probability;
    let q = 1.0 - p;

    Ok((p * odds - q) / odds)
}

/// Kelly fraction scaled by a multiplier, with the reasoning kept alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KellySizing {
    /// Unscaled Kelly fraction
    pub full_kelly_fraction: f64,
    /// Multiplier applied to the full fraction (0.5 = half Kelly)
    pub multiplier: f64,
    /// full_kelly_fraction * multiplier, unclamped
    pub bet_fraction: f64,
    /// Expected edge per unit staked (p * b - q)
    pub edge: f64,
    /// Whether the full Kelly fraction is positive
    pub has_edge: bool,
    /// Reason if not betting
    pub skip_reason: Option<String>,
}

impl KellySizing {
    pub fn new(win_probability: f64, odds: f64, multiplier: f64) -> GrowthResult<Self> {
        let full = kelly_fraction(win_probability, odds)?;
        let edge = win_probability * odds - (1.0 - win_probability);

        let skip_reason = if full > 0.0 {
            None
        } else {
            Some(format!(
                "No edge: p*b {:.4} <= q {:.4}",
                win_probability * odds,
                1.0 - win_probability
            ))
        };

        Ok(Self {
            full_kelly_fraction: full,
            multiplier,
            bet_fraction: full * multiplier,
            edge,
            has_edge: skip_reason.is_none(),
            skip_reason,
        })
    }

    /// Half Kelly, the usual conservative choice.
    pub fn half(win_probability: f64, odds: f64) -> GrowthResult<Self> {
        Self::new(win_probability, odds, 0.5)
    }
}
