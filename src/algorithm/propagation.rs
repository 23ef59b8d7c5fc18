use crate::algorithm::bitset::PossibilitySet;
use crate::algorithm::rules::AdjacencyRules;
use crate::io::error::Result;
use crate::spatial::cell::CellChange;
use crate::spatial::grid::{Direction, Grid, Position};

/// A neighbor whose possibility set shrank during propagation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborChange {
    /// Position of the constrained neighbor
    pub position: Position,
    /// Row-major index of the constrained neighbor
    pub index: usize,
    /// Direction of the neighbor as seen from the source cell
    pub direction: Direction,
    /// What happened to the neighbor
    pub change: CellChange,
}

/// Constrain the neighbors of `source` by what its remaining possibilities allow
///
/// For each adjacent cell, removes the neighbor possibilities whose facing
/// edge is incompatible with every possibility still held by `source`.
/// Only neighbors are mutated; the source cell is read. Neighbors are
/// visited clockwise from north and every one whose set shrank is reported
/// in that order.
///
/// # Errors
///
/// Returns `Contradiction` as soon as a neighbor is left with no possibilities
pub fn propagate(
    grid: &mut Grid,
    rules: &AdjacencyRules,
    source: Position,
) -> Result<Vec<NeighborChange>> {
    let mut changes = Vec::with_capacity(4);
    propagate_into(grid, rules, source, &mut changes)?;
    Ok(changes)
}

/// Same as `propagate`, recording changes into a caller-owned buffer
///
/// Neighbors constrained before a contradiction stay mutated in the grid,
/// and their changes are still in `changes` when the error is returned.
///
/// # Errors
///
/// Returns `Contradiction` as soon as a neighbor is left with no possibilities
pub fn propagate_into(
    grid: &mut Grid,
    rules: &AdjacencyRules,
    source: Position,
    changes: &mut Vec<NeighborChange>,
) -> Result<()> {
    let Some(source_set) = grid.cell(source).map(|c| c.possibilities().clone()) else {
        return Ok(());
    };
    if source_set.is_full() {
        return Ok(());
    }

    let neighbors: Vec<(Direction, Position)> = grid.neighbors(source).collect();
    for (direction, position) in neighbors {
        let allowed = rules.allowed_neighbors(&source_set, direction);
        let Some(neighbor) = grid.cell_mut(position) else {
            continue;
        };

        let incompatible = neighbor.possibilities().difference(&allowed);
        if incompatible.is_empty() {
            continue;
        }

        let change = neighbor.remove_possibilities(&incompatible)?;
        if change.changed() {
            changes.push(NeighborChange {
                position,
                index: neighbor.index(),
                direction,
                change,
            });
        }
    }

    Ok(())
}

/// Possibilities of the cell at `position` that no neighbor rules out
///
/// Reports, without mutating anything, which members of the cell's set are
/// compatible with at least one possibility of every adjacent cell.
pub fn supported_possibilities(
    grid: &Grid,
    rules: &AdjacencyRules,
    position: Position,
) -> Option<PossibilitySet> {
    let mut supported = grid.cell(position)?.possibilities().clone();
    for (direction, neighbor) in grid.neighbors(position) {
        let Some(cell) = grid.cell(neighbor) else {
            continue;
        };
        let allowed = rules.allowed_neighbors(cell.possibilities(), direction.opposite());
        supported.intersect_with(&allowed);
    }
    Some(supported)
}

/// Whether every cell keeps at least one possibility supported by all of its neighbors
///
/// A fully resolved grid passing this check has matching connectors on
/// every shared edge.
pub fn is_consistent(grid: &Grid, rules: &AdjacencyRules) -> bool {
    grid.cells().all(|cell| {
        supported_possibilities(grid, rules, cell.position()).is_some_and(|s| !s.is_empty())
    })
}
