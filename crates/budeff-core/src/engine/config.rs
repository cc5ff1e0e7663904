pub use crate::core::forcefield::energy::DEFAULT_DIELECTRIC;
use crate::core::forcefield::params::ForceFieldTable;
use crate::core::forcefield::scoring::{DegeneratePolicy, Scorer};
use crate::core::spatial::neighbors::SearchStrategy;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {value} (must be finite and positive)")]
    InvalidParameter { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Overrides the force field's own distance cutoff when set.
    pub cutoff: Option<f64>,
    pub dielectric: f64,
    pub strategy: SearchStrategy,
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cutoff: None,
            dielectric: DEFAULT_DIELECTRIC,
            strategy: SearchStrategy::default(),
            degenerate_policy: DegeneratePolicy::default(),
        }
    }
}

impl ScoringConfig {
    /// The cutoff that scoring against `table` will use.
    pub fn effective_cutoff(&self, table: &ForceFieldTable) -> f64 {
        self.cutoff.unwrap_or_else(|| table.distance_cutoff())
    }

    pub fn scorer<'a>(&self, table: &'a ForceFieldTable) -> Scorer<'a> {
        Scorer::new(table)
            .with_cutoff(self.effective_cutoff(table))
            .with_dielectric(self.dielectric)
            .with_strategy(self.strategy)
            .with_degenerate_policy(self.degenerate_policy)
    }
}

#[derive(Default)]
pub struct ScoringConfigBuilder {
    cutoff: Option<f64>,
    dielectric: Option<f64>,
    strategy: Option<SearchStrategy>,
    degenerate_policy: Option<DegeneratePolicy>,
}

impl ScoringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn dielectric(mut self, dielectric: f64) -> Self {
        self.dielectric = Some(dielectric);
        self
    }
    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<ScoringConfig, ConfigError> {
        if let Some(cutoff) = self.cutoff {
            ensure_positive("cutoff", cutoff)?;
        }
        let dielectric = self.dielectric.unwrap_or(DEFAULT_DIELECTRIC);
        ensure_positive("dielectric", dielectric)?;

        Ok(ScoringConfig {
            cutoff: self.cutoff,
            dielectric,
            strategy: self.strategy.unwrap_or_default(),
            degenerate_policy: self.degenerate_policy.unwrap_or_default(),
        })
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
