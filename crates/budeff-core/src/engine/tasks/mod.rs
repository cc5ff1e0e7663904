//! Scoring tasks.
//!
//! Each task takes prepared atom inputs and a force field table, applies a
//! [`ScoringConfig`](crate::engine::config::ScoringConfig) and returns the
//! aggregated result.

pub mod interaction_energy;
pub mod internal_energy;
