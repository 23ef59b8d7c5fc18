//! Solver constants and runtime configuration defaults

// Grid defaults used by the CLI when no dimensions are given
/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 16;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 16;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 4_096;

/// Seconds between steps; zero runs the solver synchronously
pub const DEFAULT_SPEED: f64 = 0.0;

/// Number of seeds tried per tileset before giving up on contradictions
pub const DEFAULT_ATTEMPTS: usize = 10;

/// Number of rotations generated for every tile prototype
pub const ROTATIONS: usize = 4;

// Weighted entropy is a float; scores closer than this are ties
/// Tolerance when comparing weighted entropy scores
pub const ENTROPY_TIE_TOLERANCE: f64 = 1e-9;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of tileset and result documents
pub const TILESET_EXTENSION: &str = "json";
