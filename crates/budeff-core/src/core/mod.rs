//! # Core Module
//!
//! Stateless building blocks of the scoring kernel.
//!
//! - **Force field** ([`forcefield`]) - Parameter tables, the pair energy model and scoring
//! - **Atom models** ([`models`]) - The atom contract and the kernel's per-atom input
//! - **Spatial search** ([`spatial`]) - Cutoff-bounded pair enumeration

pub mod forcefield;
pub mod models;
pub mod spatial;
