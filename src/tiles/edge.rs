//! Connector types and the per-edge references tiles carry

use serde::{Deserialize, Serialize};

/// A registered connector type
///
/// Symmetrical types connect to any edge of the same type. Asymmetric types
/// have a direction along the edge, so two facing edges only connect when
/// exactly one of them is marked reversed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeType {
    /// Unique identifier within a catalog
    pub id: String,
    /// Whether the connector reads the same in both directions
    #[serde(default = "default_symmetrical")]
    pub symmetrical: bool,
}

const fn default_symmetrical() -> bool {
    true
}

impl EdgeType {
    /// Create a symmetrical edge type
    pub fn symmetrical(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symmetrical: true,
        }
    }

    /// Create a directional edge type
    pub fn asymmetrical(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symmetrical: false,
        }
    }
}

/// One side of a tile: which connector it uses and in which direction
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    /// Referenced edge type id, `None` while unassigned
    #[serde(rename = "type")]
    pub edge_type: Option<String>,
    /// Direction flag for asymmetric connectors
    #[serde(default)]
    pub reversed: bool,
}

impl EdgeRef {
    /// Reference an edge type in its natural direction
    pub fn new(edge_type: impl Into<String>) -> Self {
        Self {
            edge_type: Some(edge_type.into()),
            reversed: false,
        }
    }

    /// Reference an edge type in reversed direction
    pub fn reversed(edge_type: impl Into<String>) -> Self {
        Self {
            edge_type: Some(edge_type.into()),
            reversed: true,
        }
    }

    /// An edge with no connector assigned yet
    pub const fn unassigned() -> Self {
        Self {
            edge_type: None,
            reversed: false,
        }
    }

    /// Whether a connector has been assigned
    pub const fn is_assigned(&self) -> bool {
        self.edge_type.is_some()
    }

    /// Referenced type id, if assigned
    pub fn type_id(&self) -> Option<&str> {
        self.edge_type.as_deref()
    }
}

/// Whether two facing edges can sit against each other
///
/// `symmetrical` is the symmetry flag of the shared edge type; it is only
/// consulted once both edges are known to reference the same type.
/// Unassigned edges never connect.
pub fn can_connect(a: &EdgeRef, b: &EdgeRef, symmetrical: bool) -> bool {
    match (a.type_id(), b.type_id()) {
        (Some(left), Some(right)) if left == right => symmetrical || a.reversed != b.reversed,
        _ => false,
    }
}
