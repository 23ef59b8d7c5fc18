//! Registry of connector types

use crate::io::error::{Result, WfcError};
use crate::tiles::edge::{EdgeRef, EdgeType, can_connect};
use serde::{Deserialize, Serialize};

/// Ordered collection of edge types with unique ids
///
/// Mutations never touch tiles that reference an id; renaming or removing a
/// type that is in use is the caller's concern (see `TileSet` for the
/// cascading variants). Documents are read through `from_types`, so a
/// duplicated id fails to deserialize.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EdgeType>", into = "Vec<EdgeType>")]
pub struct EdgeCatalog {
    types: Vec<EdgeType>,
}

impl EdgeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate ids
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if two types share an id
    pub fn from_types(types: impl IntoIterator<Item = EdgeType>) -> Result<Self> {
        let mut catalog = Self::new();
        for edge_type in types {
            catalog.add(edge_type)?;
        }
        Ok(catalog)
    }

    /// Register a new edge type
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the id is already registered
    pub fn add(&mut self, edge_type: EdgeType) -> Result<()> {
        if self.contains(&edge_type.id) {
            return Err(duplicate(&edge_type.id));
        }
        self.types.push(edge_type);
        Ok(())
    }

    /// Replace an existing edge type, possibly under a new id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `existing_id` isn't registered, or `DuplicateId`
    /// if the replacement's id belongs to another registered type
    pub fn edit(&mut self, existing_id: &str, edge_type: EdgeType) -> Result<()> {
        let index = self.position(existing_id)?;
        if edge_type.id != existing_id && self.contains(&edge_type.id) {
            return Err(duplicate(&edge_type.id));
        }
        if let Some(slot) = self.types.get_mut(index) {
            *slot = edge_type;
        }
        Ok(())
    }

    /// Remove an edge type
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id isn't registered
    pub fn delete(&mut self, id: &str) -> Result<EdgeType> {
        let index = self.position(id)?;
        Ok(self.types.remove(index))
    }

    /// Look up an edge type by id
    pub fn get(&self, id: &str) -> Option<&EdgeType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Whether an id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Registered types in insertion order
    pub fn types(&self) -> &[EdgeType] {
        &self.types
    }

    /// Number of registered types
    pub const fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no types
    pub const fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check whether two facing edges connect under this catalog
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if an assigned edge references an unknown type
    pub fn connects(&self, a: &EdgeRef, b: &EdgeRef) -> Result<bool> {
        for id in [a.type_id(), b.type_id()].into_iter().flatten() {
            if !self.contains(id) {
                return Err(not_found(id));
            }
        }
        let symmetrical = a
            .type_id()
            .and_then(|id| self.get(id))
            .is_none_or(|t| t.symmetrical);
        Ok(can_connect(a, b, symmetrical))
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.types
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))
    }
}

impl TryFrom<Vec<EdgeType>> for EdgeCatalog {
    type Error = WfcError;

    fn try_from(types: Vec<EdgeType>) -> Result<Self> {
        Self::from_types(types)
    }
}

impl From<EdgeCatalog> for Vec<EdgeType> {
    fn from(catalog: EdgeCatalog) -> Self {
        catalog.types
    }
}

fn duplicate(id: &str) -> WfcError {
    WfcError::DuplicateId {
        kind: "edge type",
        id: id.to_string(),
    }
}

fn not_found(id: &str) -> WfcError {
    WfcError::NotFound {
        kind: "edge type",
        id: id.to_string(),
    }
}
