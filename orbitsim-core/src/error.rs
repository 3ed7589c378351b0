use thiserror::Error;

/// Result alias used throughout the core
pub type SimResult<T> = Result<T, SimError>;

/// Everything that can go wrong while building or stepping a simulation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A body definition is physically meaningless or clashes with the body set
    #[error("invalid body '{name}': {reason}")]
    InvalidBody { name: String, reason: String },

    /// A time step or run length that cannot be integrated
    #[error("invalid timestep: {reason}")]
    InvalidTimestep { reason: String },

    /// Two bodies came closer than the configured minimum separation
    #[error(
        "singularity between '{first}' and '{second}': separation {separation:.6e} m is below the {threshold:.6e} m threshold"
    )]
    Singularity {
        first: String,
        second: String,
        separation: f64,
        threshold: f64,
    },

    /// A configuration value outside its valid range
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl SimError {
    pub fn invalid_body(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_timestep(reason: impl Into<String>) -> Self {
        Self::InvalidTimestep {
            reason: reason.into(),
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
