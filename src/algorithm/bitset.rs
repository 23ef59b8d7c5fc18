use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over indices into the global possibility list
///
/// Each cell's remaining possibilities are one of these, so membership
/// tests are O(1) and a cell never copies `Possibility` values.
/// Indices are 0-based positions in the list built by `build_possibilities`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PossibilitySet {
    bits: BitVec,
}

impl PossibilitySet {
    /// Create a set with no possibilities present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every possibility
    pub fn full(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Create a set from explicit indices, ignoring out-of-range ones
    pub fn from_indices(capacity: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Size of the global list this set indexes into
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert an index, returning whether it was newly added
    pub fn insert(&mut self, index: usize) -> bool {
        if index < self.bits.len() {
            !self.bits.replace(index, true)
        } else {
            false
        }
    }

    /// Remove an index, returning whether it was present
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.bits.len() {
            self.bits.replace(index, false)
        } else {
            false
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Reduce the set to a single index
    pub fn retain_only(&mut self, index: usize) {
        self.bits.fill(false);
        self.insert(index);
    }

    /// Add every member of another set in-place
    pub fn union_with(&mut self, other: &Self) {
        for index in other.bits.iter_ones() {
            self.insert(index);
        }
    }

    /// Keep only members also present in another set
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= other.bits.as_bitslice();
    }

    /// Members of this set that are absent from another
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for index in other.bits.iter_ones() {
            result.remove(index);
        }
        result
    }

    /// Test if no possibilities are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Test if every possibility is present
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Count possibilities in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest member, if any
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PossibilitySet({} of {}: {:?})",
            self.count(),
            self.capacity(),
            self.to_vec()
        )
    }
}
