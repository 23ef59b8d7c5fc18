//! CLI entry point for the edge-matching tile solver

use clap::Parser;
use tilecollapse::io::cli::{Cli, FileProcessor};
use tilecollapse::io::error::configuration_error;
use tracing_subscriber::EnvFilter;

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    let summary = processor.process()?;
    if summary.failed > 0 {
        return Err(configuration_error(&format!(
            "{} of {} tilesets could not be solved (base seed {})",
            summary.failed,
            summary.solved + summary.failed,
            processor.base_seed()
        )));
    }
    Ok(())
}
