use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::forcefield::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Energy scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Force field could not be loaded: {source}")]
    ForceFieldLoad {
        #[from]
        source: ParamLoadError,
    },

    #[error("Invalid scoring configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Force field '{id}' is not registered (available: {})", .available.join(", "))]
    UnknownForceField { id: String, available: Vec<String> },

    #[error("A force field identifier is required to choose among: {}", .available.join(", "))]
    ForceFieldNotSelected { available: Vec<String> },
}
