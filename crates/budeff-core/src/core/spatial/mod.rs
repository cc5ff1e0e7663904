//! Spatial pair search over atom coordinates.

pub mod grid;
pub mod neighbors;
