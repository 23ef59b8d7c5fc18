use bitvec::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::trace;

/// Heap entry ordering queued cells by entropy, then by a random tiebreak
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueEntry {
    entropy: usize,
    tiebreak: u64,
    cell: usize,
}

/// Deduplicating set of cells waiting to propagate their constraints
///
/// Pops the queued cell with the lowest entropy. Ties are broken by a key
/// the caller draws from the solver's random stream at push time, so order
/// never depends on insertion position. Backed by a binary heap, so pops are
/// O(log n).
///
/// A queued cell's entropy can drop while it waits. `update` pushes a fresh
/// heap entry for it and the stale one is discarded when it surfaces: pops
/// skip entries whose recorded entropy no longer matches the cell. Entropy
/// only decreases, so a stale entry never matches again.
#[derive(Clone, Debug)]
pub struct PropagationQueue {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    queued: BitVec,
    len: usize,
}

impl PropagationQueue {
    /// Create an empty queue for a grid of `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            queued: bitvec![0; cell_count],
            len: 0,
        }
    }

    /// Enqueue a cell unless it is already waiting
    ///
    /// Returns `false` and leaves the queue untouched if the cell is queued
    /// or out of range.
    pub fn push(&mut self, cell: usize, entropy: usize, tiebreak: u64) -> bool {
        if cell >= self.queued.len() || self.contains(cell) {
            return false;
        }
        self.queued.set(cell, true);
        self.len += 1;
        self.heap.push(Reverse(QueueEntry {
            entropy,
            tiebreak,
            cell,
        }));
        true
    }

    /// Enqueue a cell, or refresh its priority if it is already waiting
    ///
    /// Returns `true` if the cell was newly queued.
    pub fn update(&mut self, cell: usize, entropy: usize, tiebreak: u64) -> bool {
        if self.push(cell, entropy, tiebreak) {
            return true;
        }
        if self.contains(cell) {
            trace!(cell, entropy, "refreshing queued cell priority");
            self.heap.push(Reverse(QueueEntry {
                entropy,
                tiebreak,
                cell,
            }));
        }
        false
    }

    /// Bulk push of `(cell, entropy, tiebreak)` triples
    ///
    /// Returns how many cells were newly queued.
    pub fn insert(&mut self, cells: impl IntoIterator<Item = (usize, usize, u64)>) -> usize {
        cells
            .into_iter()
            .filter(|&(cell, entropy, tiebreak)| self.push(cell, entropy, tiebreak))
            .count()
    }

    /// Remove and return the queued cell with the lowest current entropy
    ///
    /// `entropy_of` reports a cell's current entropy and is used to discard
    /// stale heap entries.
    pub fn pop(&mut self, entropy_of: impl Fn(usize) -> usize) -> Option<usize> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if !self.contains(entry.cell) || entropy_of(entry.cell) != entry.entropy {
                continue;
            }
            self.queued.set(entry.cell, false);
            self.len -= 1;
            return Some(entry.cell);
        }
        // Only reachable if a queued cell's entropy changed without `update`
        self.queued.fill(false);
        self.len = 0;
        None
    }

    /// Whether a cell is waiting
    pub fn contains(&self, cell: usize) -> bool {
        self.queued.get(cell).as_deref() == Some(&true)
    }

    /// Whether no cells are waiting
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct cells waiting
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Drop every queued cell
    pub fn clear(&mut self) {
        self.heap.clear();
        self.queued.fill(false);
        self.len = 0;
    }
}
