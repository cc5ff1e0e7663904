//! # BUDE Force Field Library
//!
//! Empirical free-energy scoring of molecular structures with the BUDE force field:
//! steric packing, non-polar desolvation and charge interactions summed over all
//! atom pairs within a distance cutoff.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout.
//!
//! - **[`core`]: The Foundation.** Immutable force field tables, the pair energy model,
//!   spatial neighbor search and the score aggregator. Nothing here holds state
//!   between calls.
//!
//! - **[`engine`]: The Logic Core.** Validated scoring configuration, the error type
//!   shared by all tasks, and the tasks that compute internal and interaction energies.
//!
//! - **[`workflows`]: The Public API.** Entry points that take structure atoms, resolve
//!   them against a table and return a [`ScoreResult`](core::forcefield::aggregate::ScoreResult).

pub mod core;
pub mod engine;
pub mod workflows;
