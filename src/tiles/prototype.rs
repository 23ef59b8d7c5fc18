//! Tile prototypes and the tile sets that group them with a catalog

use crate::io::error::{Result, WfcError, configuration_error, invalid_parameter};
use crate::tiles::catalog::EdgeCatalog;
use crate::tiles::edge::{EdgeRef, EdgeType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Edge slot names in clockwise order, matching `TilePrototype::edges`
pub const EDGE_NAMES: [&str; 4] = ["north", "east", "south", "west"];

/// A placeable tile: identity, sampling weight and four edges
///
/// Edges are ordered clockwise N, E, S, W. The order matters: rotations are
/// produced by rotating this array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePrototype {
    /// Identifier reported back to the host on resolution
    pub id: String,
    /// Sampling mass during collapse (must be positive)
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Edge references, clockwise from north
    pub edges: [EdgeRef; 4],
}

const fn default_weight() -> u32 {
    1
}

impl TilePrototype {
    /// Create a prototype with weight 1
    pub fn new(id: impl Into<String>, edges: [EdgeRef; 4]) -> Self {
        Self {
            id: id.into(),
            weight: 1,
            edges,
        }
    }

    /// Create a prototype whose four edges all reference one type
    pub fn uniform(id: impl Into<String>, edge_type: &str) -> Self {
        Self::new(id, std::array::from_fn(|_| EdgeRef::new(edge_type)))
    }

    /// Builder-style weight override
    #[must_use]
    pub const fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// Edge catalog plus the prototypes that reference it
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    /// Registered connector types
    #[serde(default)]
    pub edge_types: EdgeCatalog,
    /// Tile prototypes in input order
    #[serde(default)]
    pub tiles: Vec<TilePrototype>,
}

impl TileSet {
    /// Group a catalog with its prototypes
    pub const fn new(edge_types: EdgeCatalog, tiles: Vec<TilePrototype>) -> Self {
        Self { edge_types, tiles }
    }

    /// Look up a prototype by id
    pub fn tile(&self, id: &str) -> Option<&TilePrototype> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Check that the tile set can be handed to the solver
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the set has no prototypes, edge type or
    /// prototype ids repeat, a prototype has zero weight, or an edge is
    /// unassigned or references a type missing from the catalog
    pub fn validate(&self) -> Result<()> {
        if self.tiles.is_empty() {
            return Err(configuration_error(&"tile set contains no prototypes"));
        }

        let mut edge_ids = HashSet::with_capacity(self.edge_types.len());
        for edge_type in self.edge_types.types() {
            if !edge_ids.insert(edge_type.id.as_str()) {
                return Err(configuration_error(&format!(
                    "duplicate edge type id '{}'",
                    edge_type.id
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.tiles.len());
        for tile in &self.tiles {
            if !seen.insert(tile.id.as_str()) {
                return Err(configuration_error(&format!(
                    "duplicate tile prototype id '{}'",
                    tile.id
                )));
            }
            if tile.weight == 0 {
                return Err(configuration_error(&format!(
                    "tile '{}' has zero weight",
                    tile.id
                )));
            }
            for (edge, name) in tile.edges.iter().zip(EDGE_NAMES) {
                match edge.type_id() {
                    None => {
                        return Err(configuration_error(&format!(
                            "tile '{}' has no edge type on its {name} edge",
                            tile.id
                        )));
                    }
                    Some(id) if !self.edge_types.contains(id) => {
                        return Err(configuration_error(&format!(
                            "tile '{}' references unknown edge type '{id}' on its {name} edge",
                            tile.id
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Replace an edge type and rewrite every tile edge that referenced it
    ///
    /// Returns the number of tile edges rewritten.
    ///
    /// # Errors
    ///
    /// Same as `EdgeCatalog::edit`
    pub fn rename_edge_type(&mut self, existing_id: &str, edge_type: EdgeType) -> Result<usize> {
        let new_id = edge_type.id.clone();
        self.edge_types.edit(existing_id, edge_type)?;
        if new_id == existing_id {
            return Ok(0);
        }
        Ok(self.rewrite_edges(existing_id, Some(&new_id)))
    }

    /// Remove an edge type and unassign every tile edge that referenced it
    ///
    /// Returns the number of tile edges cleared.
    ///
    /// # Errors
    ///
    /// Same as `EdgeCatalog::delete`
    pub fn delete_edge_type(&mut self, id: &str) -> Result<usize> {
        self.edge_types.delete(id)?;
        Ok(self.rewrite_edges(id, None))
    }

    /// Set a prototype's sampling weight
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero weight, or `NotFound` if no
    /// prototype has the id
    pub fn set_weight(&mut self, tile_id: &str, weight: u32) -> Result<()> {
        if weight == 0 {
            return Err(invalid_parameter(
                "weight",
                &weight,
                &"tile weights must be positive",
            ));
        }
        let tile = self
            .tiles
            .iter_mut()
            .find(|t| t.id == tile_id)
            .ok_or_else(|| WfcError::NotFound {
                kind: "tile prototype",
                id: tile_id.to_string(),
            })?;
        tile.weight = weight;
        Ok(())
    }

    fn rewrite_edges(&mut self, old_id: &str, new_id: Option<&str>) -> usize {
        let mut rewritten = 0;
        for edge in self.tiles.iter_mut().flat_map(|t| t.edges.iter_mut()) {
            if edge.type_id() == Some(old_id) {
                edge.edge_type = new_id.map(str::to_string);
                if new_id.is_none() {
                    edge.reversed = false;
                }
                rewritten += 1;
            }
        }
        rewritten
    }
}
