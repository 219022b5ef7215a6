//! Errors raised by the growth engine.
//!
//! Only parameter problems are errors. Floating-point overflow, underflow and
//! NaN capital follow IEEE semantics and are left for the caller to interpret.

/// Error returned by the Kelly calculator, the simulator and the config layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A parameter the engine cannot work with.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl SimulationError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{}`: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for SimulationError {}

pub type GrowthResult<T> = Result<T, SimulationError>;
