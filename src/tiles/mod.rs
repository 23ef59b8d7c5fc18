//! Tile data consumed by the solver
//!
//! This module contains the host-supplied descriptions:
//! - Connector types and their registry
//! - Tile prototypes grouped into tile sets
//! - Rotated possibilities built from prototypes

/// Edge-type registry with add, edit and delete
pub mod catalog;
/// Connector types, edge references and the connection rule
pub mod edge;
/// Rotated placements of prototypes
pub mod possibility;
/// Tile prototypes and tile sets
pub mod prototype;

pub use catalog::EdgeCatalog;
pub use edge::{EdgeRef, EdgeType};
pub use possibility::{Possibility, Rotation};
pub use prototype::{TilePrototype, TileSet};
