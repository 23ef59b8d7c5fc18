//! Spatial data structures for one solver run
//!
//! This module contains:
//! - Positions, directions and the row-major cell grid
//! - The per-cell possibility state machine

/// Grid slot state machine
pub mod cell;
/// Positions, directions and grid storage
pub mod grid;

pub use cell::{Cell, CellChange};
pub use grid::{Direction, Grid, Position};
