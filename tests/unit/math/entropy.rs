//! Tests for entropy measures

#[cfg(test)]
mod tests {
    use tilecollapse::math::entropy::{cardinality_entropy, weighted_entropy};

    // Tests cardinality entropy is the remaining count
    // Verified by returning remaining - 1
    #[test]
    fn test_cardinality_entropy() {
        assert_eq!(cardinality_entropy(0), 0);
        assert_eq!(cardinality_entropy(7), 7);
    }

    // Tests equal weights score ln(n) and a single option scores zero
    // Verified by omitting the ln(ΣW) term
    #[test]
    fn test_weighted_entropy_reference_values() {
        assert!(weighted_entropy([5]).abs() < 1e-12);
        assert!((weighted_entropy([2, 2, 2, 2]) - 4.0_f64.ln()).abs() < 1e-12);
        assert!(weighted_entropy(std::iter::empty()).abs() < f64::EPSILON);
    }

    // Tests skewed weights score below uniform weights of the same size
    // Verified by flipping the sign of the Σ w ln w term
    #[test]
    fn test_weighted_entropy_prefers_dominated_sets() {
        let uniform = weighted_entropy([1, 1]);
        let skewed = weighted_entropy([1, 9]);
        assert!(skewed < uniform);
        assert!(skewed > 0.0);
    }

    // Tests zero weights are ignored
    // Verified by including zero weights in the sum
    #[test]
    fn test_weighted_entropy_ignores_zero() {
        assert!((weighted_entropy([0, 3, 3]) - weighted_entropy([3, 3])).abs() < 1e-12);
    }
}
