/// Command-line interface and batch processing
pub mod cli;
/// Solver constants and runtime configuration defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// Result documents and text rendering
pub mod export;
/// Progress bars for batch runs
pub mod progress;
/// Tileset loading and saving
pub mod tileset;
