//! # Core Models Module
//!
//! Minimal data structures the scoring kernel consumes.
//!
//! ## Overview
//!
//! The hierarchical atom/residue/chain model of a structure belongs to the caller.
//! This module only defines the narrow contract the kernel reads from it
//! ([`atom::StructureAtom`]) and the flat, resolved record the kernel actually
//! scores ([`atom::AtomInput`]).
//!
//! ## Key Components
//!
//! - [`atom`] - The structure-provider contract and the per-atom kernel input
//! - [`ids`] - Atom identities reported in interaction provenance

pub mod atom;
pub mod ids;
