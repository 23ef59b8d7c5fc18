use crate::algorithm::bitset::PossibilitySet;
use crate::io::error::Result;
use crate::spatial::grid::Direction;
use crate::tiles::catalog::EdgeCatalog;
use crate::tiles::possibility::Possibility;

/// Precomputed edge compatibility between every pair of possibilities
///
/// For possibility `p` and direction `d`, `supports(p, d)` is the set of
/// possibilities whose `d.opposite()` edge can sit against `p`'s `d` edge.
/// Depends only on the catalog and the prototypes, so it is built once
/// before any grid exists.
#[derive(Clone, Debug)]
pub struct AdjacencyRules {
    supports: Vec<[PossibilitySet; 4]>,
    count: usize,
}

impl AdjacencyRules {
    /// Build the compatibility table for a possibility list
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if an edge references a type missing from the catalog
    pub fn new(possibilities: &[Possibility], catalog: &EdgeCatalog) -> Result<Self> {
        let count = possibilities.len();
        let mut supports = Vec::with_capacity(count);

        for possibility in possibilities {
            let mut per_direction: [PossibilitySet; 4] =
                std::array::from_fn(|_| PossibilitySet::new(count));
            for direction in Direction::ALL {
                let edge = possibility.edge(direction);
                let Some(set) = per_direction.get_mut(direction.index()) else {
                    continue;
                };
                for (index, other) in possibilities.iter().enumerate() {
                    if catalog.connects(edge, other.edge(direction.opposite()))? {
                        set.insert(index);
                    }
                }
            }
            supports.push(per_direction);
        }

        Ok(Self { supports, count })
    }

    /// Number of possibilities covered
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether the table covers no possibilities
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Possibilities that may sit in direction `direction` of `possibility`
    pub fn supports(&self, possibility: usize, direction: Direction) -> Option<&PossibilitySet> {
        self.supports
            .get(possibility)
            .and_then(|per_direction| per_direction.get(direction.index()))
    }

    /// Whether `neighbor` may sit in direction `direction` of `possibility`
    pub fn compatible(&self, possibility: usize, direction: Direction, neighbor: usize) -> bool {
        self.supports(possibility, direction)
            .is_some_and(|set| set.contains(neighbor))
    }

    /// Union of what any member of `set` allows in direction `direction`
    pub fn allowed_neighbors(&self, set: &PossibilitySet, direction: Direction) -> PossibilitySet {
        let mut allowed = PossibilitySet::new(self.count);
        for possibility in set.iter() {
            if let Some(supported) = self.supports(possibility, direction) {
                allowed.union_with(supported);
            }
            if allowed.is_full() {
                break;
            }
        }
        allowed
    }
}
