//! Tests for solver constants and defaults

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::solver::RunConfig;
    use tilecollapse::io::configuration::{
        DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_SPEED, DEFAULT_WIDTH, ENTROPY_TIE_TOLERANCE,
        MAX_GRID_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS, OUTPUT_SUFFIX, PROGRESS_BAR_WIDTH,
        ROTATIONS, TILESET_EXTENSION,
    };

    // Tests default dimensions fit under the grid limit
    // Verified by raising the defaults above the maximum
    #[test]
    fn test_default_dimensions() {
        assert_eq!((DEFAULT_WIDTH, DEFAULT_HEIGHT), (16, 16));
        assert!(DEFAULT_WIDTH <= MAX_GRID_DIMENSION);
        assert!(DEFAULT_HEIGHT <= MAX_GRID_DIMENSION);
    }

    // Tests the run configuration defaults mirror the constants
    // Verified by starting runs paused by default
    #[test]
    fn test_run_config_default() {
        let config = RunConfig::default();

        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.seed, None);
        assert!(config.speed.abs() < f64::EPSILON);
        assert!(DEFAULT_SPEED.abs() < f64::EPSILON);
        assert!(!config.break_at_iteration);
        assert!(!config.start_paused);
    }

    // Tests quarter turns and tie tolerance
    // Verified by changing the rotation count
    #[test]
    fn test_solver_constants() {
        assert_eq!(ROTATIONS, 4);
        assert!(ENTROPY_TIE_TOLERANCE > 0.0 && ENTROPY_TIE_TOLERANCE < 1e-6);
        assert!(DEFAULT_ATTEMPTS >= 1);
    }

    // Tests progress bar settings
    // Verified by changing width value
    #[test]
    fn test_progress_settings() {
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert_eq!(PROGRESS_BAR_WIDTH, 50);
    }

    // Tests filesystem safety of the output naming
    // Verified by adding special character
    #[test]
    fn test_output_naming() {
        assert!(OUTPUT_SUFFIX.starts_with('_'));
        for ch in OUTPUT_SUFFIX.chars() {
            assert!(
                ch.is_alphanumeric() || ch == '_' || ch == '-',
                "Output suffix contains invalid character: {ch}"
            );
        }
        assert_eq!(TILESET_EXTENSION, "json");
    }
}
