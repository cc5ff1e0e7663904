//! # Workflows Module
//!
//! User-facing entry points. A workflow takes atoms from any structure provider,
//! resolves them against a force field table and runs the matching engine task.
//!
//! - **Scoring** ([`score`]) - Internal energy of one structure and interaction
//!   energy between structures, plus force field loading.

pub mod score;
