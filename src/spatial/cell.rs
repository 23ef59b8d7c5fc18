//! Grid slot holding the shrinking set of possibilities still allowed there
//!
//! A cell moves from untouched (every possibility present) through
//! constrained to either resolved (one left) or failed (none left). Sets
//! only ever shrink, and a failed cell is never mutated again.
//!
//! Mutations report what happened as a `CellChange` instead of calling back
//! into the host; the solver turns those into resolution and update events.

use crate::algorithm::bitset::PossibilitySet;
use crate::io::error::{Result, WfcError};
use crate::math::entropy::{cardinality_entropy, weighted_entropy};
use crate::math::probability::Weighted;
use crate::spatial::grid::Position;
use crate::tiles::possibility::Possibility;
use tracing::debug;

/// Observable effect of a cell mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellChange {
    /// Nothing was removed
    Unchanged,
    /// The set shrank but more than one possibility remains
    Updated {
        /// Remaining possibility count
        entropy: usize,
    },
    /// Exactly one possibility remains
    Resolved {
        /// Index of the remaining possibility
        possibility: usize,
    },
}

impl CellChange {
    /// Whether the mutation removed anything
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// One slot of the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    index: usize,
    possibilities: PossibilitySet,
}

impl Cell {
    /// Create a cell with an initial possibility set
    pub const fn new(position: Position, index: usize, possibilities: PossibilitySet) -> Self {
        Self {
            position,
            index,
            possibilities,
        }
    }

    /// Grid position
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Row-major index
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Remaining possibilities
    pub const fn possibilities(&self) -> &PossibilitySet {
        &self.possibilities
    }

    /// Number of remaining possibilities
    pub fn entropy(&self) -> usize {
        cardinality_entropy(self.possibilities.count())
    }

    /// Weighted Shannon entropy of the remaining possibilities
    ///
    /// `all` is the global list the set indexes into.
    pub fn weighted_entropy(&self, all: &[Possibility]) -> f64 {
        weighted_entropy(
            self.possibilities
                .iter()
                .filter_map(|i| all.get(i))
                .map(Weighted::weight),
        )
    }

    /// Exactly one possibility remains
    pub fn is_resolved(&self) -> bool {
        self.entropy() == 1
    }

    /// No possibility remains
    pub fn is_failed(&self) -> bool {
        self.possibilities.is_empty()
    }

    /// Every possibility of the global list is still present
    pub fn is_untouched(&self) -> bool {
        self.possibilities.capacity() > 0 && self.possibilities.is_full()
    }

    /// The single remaining possibility of a resolved cell
    pub fn resolved_possibility(&self) -> Option<usize> {
        if self.is_resolved() {
            self.possibilities.first()
        } else {
            None
        }
    }

    /// Remove one possibility
    ///
    /// Removing an absent possibility is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` if the cell is resolved, or `Contradiction`
    /// if the cell has failed or the removal empties it
    pub fn remove_possibility(&mut self, possibility: usize) -> Result<CellChange> {
        self.ensure_mutable()?;
        if !self.possibilities.remove(possibility) {
            return Ok(CellChange::Unchanged);
        }
        self.settle()
    }

    /// Remove a batch of possibilities
    ///
    /// Members of the batch that are already absent are logged and skipped,
    /// since overlapping constraint passes can ask for the same removal
    /// twice. Resolved cells are accepted here: a batch that leaves their
    /// single possibility alone is a no-op, one that removes it fails.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if the cell has already failed or ends up
    /// with no possibilities
    pub fn remove_possibilities(&mut self, batch: &PossibilitySet) -> Result<CellChange> {
        if self.is_failed() {
            return Err(self.contradiction());
        }

        let mut removed = 0_usize;
        for possibility in batch.iter() {
            if self.possibilities.remove(possibility) {
                removed += 1;
            } else {
                debug!(
                    cell = %self.position,
                    possibility,
                    "possibility already absent during batch removal"
                );
            }
        }

        if removed == 0 {
            return Ok(CellChange::Unchanged);
        }
        self.settle()
    }

    /// Collapse the cell to a single possibility
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` if the cell is resolved, `NotFound` if the
    /// possibility isn't in the current set, or `Contradiction` if the cell
    /// has failed
    pub fn resolve_to(&mut self, possibility: usize) -> Result<CellChange> {
        self.ensure_mutable()?;
        if !self.possibilities.contains(possibility) {
            return Err(WfcError::NotFound {
                kind: "possibility",
                id: possibility.to_string(),
            });
        }
        self.possibilities.retain_only(possibility);
        self.settle()
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.is_failed() {
            return Err(self.contradiction());
        }
        if self.is_resolved() {
            return Err(WfcError::AlreadyResolved {
                position: self.position,
            });
        }
        Ok(())
    }

    fn settle(&self) -> Result<CellChange> {
        match self.entropy() {
            0 => Err(self.contradiction()),
            1 => Ok(CellChange::Resolved {
                possibility: self.possibilities.first().unwrap_or_default(),
            }),
            entropy => Ok(CellChange::Updated { entropy }),
        }
    }

    const fn contradiction(&self) -> WfcError {
        WfcError::Contradiction {
            position: self.position,
            iteration: 0,
        }
    }
}
