//! # Engine Module
//!
//! Orchestration between the stateless core and the public workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated scoring settings and their builder
//! - **Error Handling** ([`error`]) - The error type shared by every task and workflow
//! - **Tasks** (`tasks`) - Internal and interaction energy computations
//!
//! With the `parallel` feature enabled, pair evaluation inside each task runs on
//! the global rayon pool.

pub mod config;
pub mod error;
pub(crate) mod tasks;
