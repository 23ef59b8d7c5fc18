//! Edge-matching wave function collapse over rotatable tile prototypes
//!
//! Each tile prototype carries four typed edges. The solver expands every
//! prototype into its four rotations, fills a rectangular grid where every
//! cell may hold any of them, and repeatedly collapses the least uncertain
//! cell and propagates edge constraints to its neighbors until the grid is
//! complete or a contradiction is found.

#![forbid(unsafe_code)]

/// Solver state machine, propagation and the loops that drive it
pub mod algorithm;
/// Tileset files, result export, configuration and error handling
pub mod io;
/// Weighted sampling and entropy measures
pub mod math;
/// Grid positions, directions and per-cell state
pub mod spatial;
/// Edge types, tile prototypes and their rotations
pub mod tiles;

pub use algorithm::solver::{Outcome, RunConfig, Solver, Status};
pub use io::error::{Result, WfcError};
pub use tiles::{EdgeCatalog, EdgeRef, EdgeType, TilePrototype, TileSet};
