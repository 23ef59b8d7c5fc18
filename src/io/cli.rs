//! Command-line interface for batch solving tileset documents

use crate::algorithm::driver::{run_paced, run_turbo};
use crate::algorithm::solver::{RunConfig, Solver, Status, StepReport};
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_SPEED, DEFAULT_WIDTH, OUTPUT_SUFFIX,
    TILESET_EXTENSION,
};
use crate::io::error::{Result, WfcError, configuration_error, file_system_error};
use crate::io::export::{RunResult, render_ascii};
use crate::io::progress::ProgressManager;
use crate::io::tileset::{is_tileset_path, load_tileset};
use clap::Parser;
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Fill a grid with rotatable tiles whose edges match"
)]
/// Command-line arguments for the tile solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tileset JSON file or directory of tilesets
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible runs (random when omitted or zero)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Grid width in cells (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Seeds to try per tileset before giving up on contradictions
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Seconds between steps; zero solves without pausing
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f64,

    /// Log and pause each time a propagation wavefront settles
    #[arg(long)]
    pub break_at_iteration: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process tilesets even if a result exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log solver decisions at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print each solved grid as text
    #[arg(long)]
    pub ascii: bool,
}

impl Cli {
    /// Check if existing results should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid size, square when only one side is given
    pub fn dimensions(&self) -> (usize, usize) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w),
            (None, Some(h)) => (h, h),
            (None, None) => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }
}

/// Counts of how a batch went
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Tilesets with a written result
    pub solved: usize,
    /// Tilesets that hit a contradiction on every attempt
    pub failed: usize,
}

/// Solves every tileset a `Cli` targets and writes result documents
pub struct FileProcessor {
    cli: Cli,
    base_seed: u64,
    progress_manager: Option<ProgressManager>,
    cancel: AtomicBool,
}

impl FileProcessor {
    /// Create a processor, fixing the base seed for the whole batch
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let base_seed = match cli.seed {
            Some(seed) if seed != 0 => seed,
            _ => rand::rng().random_range(1..u64::MAX),
        };

        Self {
            cli,
            base_seed,
            progress_manager,
            cancel: AtomicBool::new(false),
        }
    }

    /// Seed used for the first attempt on every tileset
    pub const fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Process tilesets according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid, a tileset can't be read or
    /// is rejected by the solver, or a result can't be written
    pub fn process(&mut self) -> Result<BatchSummary> {
        let files = self.collect_files()?;
        let mut summary = BatchSummary::default();

        if files.is_empty() {
            return Ok(summary);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            if self.process_file(file, index)? {
                summary.solved += 1;
            } else {
                summary.failed += 1;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_tileset_path(target) {
                return Err(configuration_error(&format!(
                    "target file must be a .{TILESET_EXTENSION} tileset"
                )));
            }
            return Ok(self
                .should_process_file(target)
                .then(|| target.clone())
                .into_iter()
                .collect());
        }

        if target.is_dir() {
            let entries = std::fs::read_dir(target)
                .map_err(|e| file_system_error(target, "read directory", e))?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system_error(target, "read directory entry", e))?
                    .path();
                if is_tileset_path(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            return Ok(files);
        }

        Err(configuration_error(
            &"target must be a tileset file or directory",
        ))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (result exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Returns whether a result was written
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<bool> {
        let tileset = load_tileset(input_path)?;
        let (width, height) = self.cli.dimensions();

        for attempt in 0..self.cli.attempts.max(1) {
            let seed = self.base_seed.wrapping_add(attempt as u64);
            let config = RunConfig {
                width,
                height,
                seed: Some(seed),
                speed: self.cli.speed,
                break_at_iteration: self.cli.break_at_iteration,
                start_paused: false,
            };

            if let Some(ref mut pm) = self.progress_manager {
                pm.start_file(index, input_path, width * height, attempt + 1);
            }

            let mut solver = Solver::new();
            solver.run(&tileset, config)?;

            match self.drive(&mut solver, index) {
                Ok(_) => {
                    self.finish_file(&solver, input_path, index)?;
                    return Ok(true);
                }
                Err(WfcError::Contradiction {
                    position,
                    iteration,
                }) => {
                    info!(
                        path = %input_path.display(),
                        seed,
                        %position,
                        iteration,
                        "attempt failed, retrying with next seed"
                    );
                }
                Err(other) => return Err(other),
            }
        }

        warn!(
            path = %input_path.display(),
            attempts = self.cli.attempts,
            "no attempt produced a complete grid"
        );
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, false);
        }
        Ok(false)
    }

    fn drive(&mut self, solver: &mut Solver, index: usize) -> Result<Status> {
        let paced = solver.preferred_interval().is_some();
        loop {
            let progress = &mut self.progress_manager;
            let on_step = |report: &StepReport| {
                if let Some(pm) = progress.as_mut() {
                    pm.update_cells(index, report.resolved);
                }
            };
            let status = if paced {
                run_paced(solver, &self.cancel, std::thread::sleep, on_step)?
            } else {
                run_turbo(solver, &self.cancel, on_step)?
            };

            if status != Status::Paused {
                return Ok(status);
            }
            info!(
                iteration = solver.stats().iterations,
                resolved = solver.stats().resolved,
                "wavefront settled"
            );
            solver.resume();
        }
    }

    fn finish_file(&mut self, solver: &Solver, input_path: &Path, index: usize) -> Result<()> {
        let result = RunResult::from_solver(solver)?;
        result.save(&output_path(input_path))?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, result.completed);
        }

        if self.cli.ascii {
            print_grid(solver, input_path, result.seed);
        }
        Ok(())
    }
}

// Allow print for the requested text rendering
#[allow(clippy::print_stdout)]
fn print_grid(solver: &Solver, input_path: &Path, seed: u64) {
    if let Some(grid) = solver.grid() {
        println!("{} (seed {seed})", input_path.display());
        print!("{}", render_ascii(grid, solver.possibilities()));
    }
}

/// Result document path for a tileset, `<stem>_result.json` beside it
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{OUTPUT_SUFFIX}.{TILESET_EXTENSION}",
        stem.to_string_lossy()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
