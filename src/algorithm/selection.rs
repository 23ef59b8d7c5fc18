use crate::io::configuration::ENTROPY_TIE_TOLERANCE;
use crate::math::probability::{Weighted, weighted_index};
use crate::spatial::cell::Cell;
use crate::spatial::grid::{Grid, Position};
use crate::tiles::possibility::Possibility;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Owner of the run's single random stream
///
/// Every draw the solver makes goes through here, in the fixed order of the
/// step loop, so a seed fully determines a run.
#[derive(Clone, Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Random key used to order equal-entropy queue entries
    pub fn tiebreak(&mut self) -> u64 {
        self.rng.random()
    }

    /// Index drawn proportionally to integer weights
    pub fn weighted_choice(&mut self, weights: &[u64]) -> Option<usize> {
        weighted_index(weights, &mut self.rng)
    }
}

/// Choose the next cell to collapse
///
/// While no unresolved cell has been touched by propagation, the pick is
/// uniform among unresolved cells. Otherwise it is the touched cell with the
/// lowest weighted entropy, with ties drawn uniformly. Returns `None` when
/// every cell is resolved.
pub fn select_cell(
    grid: &Grid,
    possibilities: &[Possibility],
    selector: &mut RandomSelector,
) -> Option<Position> {
    let unresolved: Vec<&Cell> = grid.cells().filter(|c| c.entropy() > 1).collect();
    if unresolved.is_empty() {
        return None;
    }

    let touched: Vec<&Cell> = unresolved
        .iter()
        .copied()
        .filter(|c| !c.is_untouched())
        .collect();

    if touched.is_empty() {
        return selector
            .uniform_index(unresolved.len())
            .and_then(|i| unresolved.get(i))
            .map(|c| c.position());
    }

    let scored: Vec<(f64, Position)> = touched
        .iter()
        .map(|c| (c.weighted_entropy(possibilities), c.position()))
        .collect();
    let minimum = scored
        .iter()
        .map(|&(score, _)| score)
        .fold(f64::INFINITY, f64::min);
    let candidates: Vec<Position> = scored
        .into_iter()
        .filter(|&(score, _)| score - minimum <= ENTROPY_TIE_TOLERANCE)
        .map(|(_, position)| position)
        .collect();

    selector
        .uniform_index(candidates.len())
        .and_then(|i| candidates.get(i))
        .copied()
}

/// Draw one of a cell's remaining possibilities, weighted by prototype weight
pub fn sample_possibility(
    cell: &Cell,
    possibilities: &[Possibility],
    selector: &mut RandomSelector,
) -> Option<usize> {
    let members = cell.possibilities().to_vec();
    let weights: Vec<u64> = members
        .iter()
        .map(|&i| possibilities.get(i).map_or(0, Weighted::weight))
        .collect();

    selector
        .weighted_choice(&weights)
        .and_then(|i| members.get(i))
        .copied()
}
