//! # Force Field Module
//!
//! Parameter tables and the pairwise energy model of the BUDE force field.
//!
//! ## Overview
//!
//! A force field is a two-level table mapping a residue class and an atom name to
//! an eight-field record (type label, radius, core radius, well depth, non-polar
//! cutoff, charge, solvation coefficient and a reserved slot). Residue-independent
//! fallbacks live under the `WLD` class. From these records the module evaluates
//! three energy terms for every atom pair inside the global distance cutoff:
//!
//! - **Steric** packing with a repulsive core and an attractive well
//! - **Desolvation** between non-polar atoms in contact
//! - **Charge** interactions as a damped Coulomb term
//!
//! ## Key Components
//!
//! - [`params`] - Table construction, validation and lookup
//! - [`registry`] - Loading a directory of tables by identifier
//! - [`parameterization`] - Resolving structure atoms to table entries
//! - [`scoring`] - Intra- and inter-group scoring
//! - [`aggregate`] - Per-term reduction with pair provenance
//! - [`term`] - The three-term energy value
//!
//! ## Usage
//!
//! ```ignore
//! use budeff::core::forcefield::{parameterization::Parameterizer, scoring::Scorer};
//!
//! let inputs = Parameterizer::new(&table).prepare(&atoms, 0);
//! let result = Scorer::new(&table).score_intra(&inputs)?;
//! println!("{:.2}", result.total_energy);
//! ```

pub mod aggregate;
pub(crate) mod energy;
pub mod parameterization;
pub mod params;
pub(crate) mod potentials;
pub mod registry;
pub mod scoring;
pub mod term;
