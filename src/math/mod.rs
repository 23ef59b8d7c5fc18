//! Mathematical utilities for the solver

/// Entropy scores used to rank cells
pub mod entropy;
/// Weighted sampling over positive integer weights
pub mod probability;
