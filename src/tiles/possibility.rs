//! Rotated placements of tile prototypes
//!
//! Every prototype yields exactly four possibilities, one per quarter turn.
//! The list is built once per run and shared read-only by every cell, which
//! only ever stores indices into it.

use crate::io::configuration::ROTATIONS;
use crate::io::error::Result;
use crate::math::probability::Weighted;
use crate::spatial::grid::Direction;
use crate::tiles::edge::EdgeRef;
use crate::tiles::prototype::{TilePrototype, TileSet};
use std::fmt;
use std::sync::Arc;

/// Quarter-turn rotation index in `0..4`
///
/// Rotation `i` shifts the edge array `i` places, so the edge that sat east
/// of the prototype faces north after one step. That is a counterclockwise
/// turn when viewed from above, reported as a positive angle of `90° × i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rotation(u8);

impl Rotation {
    /// All four rotations in index order
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Rotation from an index, wrapping modulo four
    pub const fn new(index: usize) -> Self {
        Self((index % ROTATIONS) as u8)
    }

    /// Index in `0..4`
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Counterclockwise placement angle in degrees
    pub const fn degrees(self) -> u16 {
        self.0 as u16 * 90
    }

    /// Counterclockwise placement angle in radians
    pub fn radians(self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// One rotation of one prototype, with its rotated edge signature
#[derive(Clone, Debug)]
pub struct Possibility {
    prototype: Arc<TilePrototype>,
    edge_signature: [EdgeRef; 4],
    rotation: Rotation,
}

impl Possibility {
    /// Rotate a prototype's edges into a new possibility
    pub fn new(prototype: Arc<TilePrototype>, rotation: Rotation) -> Self {
        let mut edge_signature = prototype.edges.clone();
        edge_signature.rotate_left(rotation.index());
        Self {
            prototype,
            edge_signature,
            rotation,
        }
    }

    /// Shared source prototype
    pub fn prototype(&self) -> &TilePrototype {
        &self.prototype
    }

    /// Prototype identifier
    pub fn prototype_id(&self) -> &str {
        &self.prototype.id
    }

    /// Edges after rotation, clockwise from north
    pub const fn edge_signature(&self) -> &[EdgeRef; 4] {
        &self.edge_signature
    }

    /// Edge facing the given direction
    pub const fn edge(&self, direction: Direction) -> &EdgeRef {
        match direction {
            Direction::North => &self.edge_signature[0],
            Direction::East => &self.edge_signature[1],
            Direction::South => &self.edge_signature[2],
            Direction::West => &self.edge_signature[3],
        }
    }

    /// Applied rotation
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }
}

impl Weighted for Possibility {
    fn weight(&self) -> u64 {
        u64::from(self.prototype.weight)
    }
}

impl fmt::Display for Possibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.prototype.id, self.rotation)
    }
}

/// Build the global possibility list for a tile set
///
/// Prototypes appear in input order, each followed by its four rotations,
/// so possibility `4 * p + r` is rotation `r` of prototype `p`.
///
/// # Errors
///
/// Returns `Configuration` if the tile set fails validation
pub fn build_possibilities(tileset: &TileSet) -> Result<Vec<Possibility>> {
    tileset.validate()?;

    let mut possibilities = Vec::with_capacity(tileset.tiles.len() * ROTATIONS);
    for prototype in &tileset.tiles {
        let shared = Arc::new(prototype.clone());
        for rotation in Rotation::ALL {
            possibilities.push(Possibility::new(Arc::clone(&shared), rotation));
        }
    }
    Ok(possibilities)
}
