//! Weighted random sampling over positive integer weights

use rand::Rng;

/// Anything that carries a sampling mass
pub trait Weighted {
    /// Positive sampling weight
    fn weight(&self) -> u64;
}

impl Weighted for u64 {
    fn weight(&self) -> u64 {
        *self
    }
}

impl Weighted for u32 {
    fn weight(&self) -> u64 {
        u64::from(*self)
    }
}

/// Pick an index with probability proportional to its weight
///
/// Draws a uniform integer in `[0, Σweight)` and scans the weights, returning
/// the first index at which the running total exceeds the draw. Equal weights
/// reduce this to a uniform choice. Returns `None` when the total is zero.
pub fn weighted_index<R>(weights: &[u64], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return None;
    }

    let draw = rng.random_range(0..total);
    let mut running = 0_u64;
    weights.iter().position(|&weight| {
        running += weight;
        running > draw
    })
}

/// Pick one item with probability proportional to its weight
///
/// Returns `None` for an empty slice or a zero total weight.
pub fn weighted_sample<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    let weights: Vec<u64> = items.iter().map(Weighted::weight).collect();
    weighted_index(&weights, rng).and_then(|index| items.get(index))
}

/// Observed selection ratio of each weight over repeated draws
///
/// Used to check that sampling follows the weight distribution.
pub fn sampling_ratios<R>(weights: &[u64], draws: usize, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let mut tally = vec![0_usize; weights.len()];
    for _ in 0..draws {
        if let Some(count) = weighted_index(weights, rng).and_then(|i| tally.get_mut(i)) {
            *count += 1;
        }
    }

    if draws == 0 {
        return vec![0.0; weights.len()];
    }
    tally
        .into_iter()
        .map(|count| count as f64 / draws as f64)
        .collect()
}
