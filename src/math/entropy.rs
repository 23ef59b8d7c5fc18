//! Entropy measures over remaining possibilities

/// Plain entropy: the number of remaining possibilities
pub const fn cardinality_entropy(remaining: usize) -> usize {
    remaining
}

/// Weighted Shannon entropy of a set of sampling weights
///
/// Computes `ln(ΣW) − (Σ w·ln w) / ΣW`. Lower values mean the set is
/// dominated by a few heavy options, so it is closer to certain. A single
/// option scores zero and `n` equal weights score `ln n`. An empty set also
/// scores zero.
pub fn weighted_entropy<I>(weights: I) -> f64
where
    I: IntoIterator<Item = u64>,
{
    let mut sum = 0.0_f64;
    let mut sum_w_log_w = 0.0_f64;
    for weight in weights {
        if weight == 0 {
            continue;
        }
        let w = weight as f64;
        sum += w;
        sum_w_log_w = w.mul_add(w.ln(), sum_w_log_w);
    }

    if sum <= 0.0 {
        return 0.0;
    }
    sum.ln() - sum_w_log_w / sum
}
