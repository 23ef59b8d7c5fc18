//! Solver state machine and step loop
//!
//! A `Solver` owns everything for one run: the shared possibility list, the
//! compatibility table, the grid, the propagation queue and the random
//! stream. Hosts drive it one `step` at a time, either from their own timer
//! or through the loops in `algorithm::driver`. A step never suspends, so
//! pausing and stopping only take effect between steps.

use crate::algorithm::bitset::PossibilitySet;
use crate::algorithm::propagation::{NeighborChange, propagate_into};
use crate::algorithm::queue::PropagationQueue;
use crate::algorithm::rules::AdjacencyRules;
use crate::algorithm::selection::{RandomSelector, sample_possibility, select_cell};
use crate::io::configuration::{DEFAULT_HEIGHT, DEFAULT_SPEED, DEFAULT_WIDTH, MAX_GRID_DIMENSION};
use crate::io::error::{Result, WfcError, WithContext, configuration_error, invalid_parameter};
use crate::spatial::cell::{Cell, CellChange};
use crate::spatial::grid::{Grid, Position};
use crate::tiles::possibility::{Possibility, Rotation, build_possibilities};
use crate::tiles::prototype::TileSet;
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Parameters of one run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Random seed; `None` or `Some(0)` draws a fresh one
    pub seed: Option<u64>,
    /// Preferred seconds between steps; zero means run synchronously
    pub speed: f64,
    /// Pause whenever a propagation wavefront has fully settled
    pub break_at_iteration: bool,
    /// Enter `Paused` instead of `Running`
    pub start_paused: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            speed: DEFAULT_SPEED,
            break_at_iteration: false,
            start_paused: false,
        }
    }
}

impl RunConfig {
    /// Configuration for a grid size with every other field at its default
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Builder-style seed override
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How a stopped run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every cell resolved
    Completed,
    /// A contradiction ended the run
    Failed,
    /// Stopped by the host before either of the above
    Cancelled,
}

/// Solver lifecycle state
///
/// A stopped run ends `Completed` or `Failed`, or `Cancelled` when the host
/// stops it before either happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// No run has been started
    Idle,
    /// Steps are expected to be driven
    Running,
    /// Waiting for `resume` or a manual `step`
    Paused,
    /// Terminal; a new run must be started
    Stopped(Outcome),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Stopped(Outcome::Completed) => write!(f, "stopped (completed)"),
            Self::Stopped(Outcome::Failed) => write!(f, "stopped (failed)"),
            Self::Stopped(Outcome::Cancelled) => write!(f, "stopped (cancelled)"),
        }
    }
}

/// A cell reaching a single possibility
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Cell position
    pub position: Position,
    /// Chosen prototype id
    pub prototype_id: String,
    /// Applied rotation
    pub rotation: Rotation,
    /// Index into the global possibility list
    pub possibility: usize,
    /// Step in which the cell resolved
    pub iteration: usize,
}

/// A cell's possibility set shrinking without resolving
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Update {
    /// Cell position
    pub position: Position,
    /// Remaining possibility count
    pub entropy: usize,
    /// Size of the global possibility list
    pub max_entropy: usize,
}

impl Update {
    /// Remaining share of the global list, in `(0, 1]`
    ///
    /// Hosts use this to pick a partial-entropy indicator.
    pub fn fraction(&self) -> f64 {
        if self.max_entropy == 0 {
            return 0.0;
        }
        self.entropy as f64 / self.max_entropy as f64
    }
}

/// Host hooks for solver side effects
///
/// Both methods default to doing nothing.
pub trait SolverObserver {
    /// A cell resolved; the host places geometry for it
    fn resolved(&mut self, _resolution: &Resolution) {}

    /// A cell's set shrank; the host may redraw an entropy indicator
    fn updated(&mut self, _update: &Update) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SolverObserver for NullObserver {}

/// What a single step did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Collapsed a new cell and propagated from it
    Collapse(Position),
    /// Propagated from a previously changed cell
    Propagate(Position),
    /// Found every cell resolved
    Complete,
    /// The run had already stopped
    Finished,
}

/// Result of one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Work performed
    pub kind: StepKind,
    /// Solver status after the step
    pub status: Status,
    /// Step counter after the step
    pub iteration: usize,
    /// Cells resolved so far
    pub resolved: usize,
}

/// Counters for a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Steps executed
    pub iterations: usize,
    /// Cells collapsed by weighted sampling
    pub collapses: usize,
    /// Propagation passes started from queued cells
    pub propagations: usize,
    /// Neighbor sets shrunk by propagation
    pub constrained: usize,
    /// Cells holding a single possibility
    pub resolved: usize,
}

/// Everything owned by a single run
struct RunState {
    config: RunConfig,
    seed: u64,
    possibilities: Vec<Possibility>,
    rules: AdjacencyRules,
    grid: Grid,
    queue: PropagationQueue,
    selector: RandomSelector,
    resolutions: Vec<Resolution>,
    stats: SolverStats,
    contradiction: Option<Position>,
}

/// Edge-matching wave function collapse solver
pub struct Solver {
    status: Status,
    run: Option<RunState>,
    observer: Box<dyn SolverObserver>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("status", &self.status)
            .field("seed", &self.seed())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Solver {
    /// Create an idle solver with no observer
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
            run: None,
            observer: Box::new(NullObserver),
        }
    }

    /// Create an idle solver that reports events to `observer`
    pub fn with_observer(observer: Box<dyn SolverObserver>) -> Self {
        Self {
            observer,
            ..Self::new()
        }
    }

    /// Replace the event observer
    pub fn set_observer(&mut self, observer: Box<dyn SolverObserver>) {
        self.observer = observer;
    }

    /// Start a new run, discarding any previous grid and queue
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for a zero or oversized dimension, an empty
    /// or invalid tile set, and `InvalidParameter` for a negative or
    /// non-finite speed. Nothing is allocated and the previous run is kept
    /// when validation fails.
    pub fn run(&mut self, tileset: &TileSet, config: RunConfig) -> Result<Status> {
        validate_dimensions(config.width, config.height)?;
        validate_speed(config.speed)?;

        let possibilities = build_possibilities(tileset)?;
        let rules = AdjacencyRules::new(&possibilities, &tileset.edge_types)?;

        let seed = match config.seed {
            Some(seed) if seed != 0 => seed,
            _ => rand::rng().random(),
        };

        let full = PossibilitySet::full(possibilities.len());
        let grid = Grid::new(config.width, config.height, &full);
        let queue = PropagationQueue::new(grid.len());

        info!(
            seed,
            width = config.width,
            height = config.height,
            prototypes = tileset.tiles.len(),
            possibilities = possibilities.len(),
            "starting run"
        );

        self.run = Some(RunState {
            config,
            seed,
            possibilities,
            rules,
            grid,
            queue,
            selector: RandomSelector::new(seed),
            resolutions: Vec::new(),
            stats: SolverStats::default(),
            contradiction: None,
        });
        self.status = if config.start_paused {
            Status::Paused
        } else {
            Status::Running
        };
        Ok(self.status)
    }

    /// Execute one atomic unit of work
    ///
    /// Pops a queued cell and propagates from it, or when the queue is empty
    /// collapses a new cell and propagates from that. Works while running or
    /// paused, so a paused host can advance manually.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if no run was started. Returns `Contradiction`
    /// when a cell runs out of possibilities; the solver is then paused and
    /// every further step returns the same contradiction.
    pub fn step(&mut self) -> Result<StepReport> {
        let Some(run) = self.run.as_mut() else {
            return Err(WfcError::InvalidState {
                operation: "step",
                status: self.status,
            });
        };

        if let Status::Stopped(_) = self.status {
            return Ok(StepReport {
                kind: StepKind::Finished,
                status: self.status,
                iteration: run.stats.iterations,
                resolved: run.stats.resolved,
            });
        }

        if let Some(position) = run.contradiction {
            return Err(WfcError::Contradiction {
                position,
                iteration: run.stats.iterations,
            });
        }

        run.stats.iterations += 1;
        let iteration = run.stats.iterations;

        let kind = match run.advance(&mut *self.observer).at_iteration(iteration) {
            Ok(kind) => kind,
            Err(error) => {
                if let WfcError::Contradiction { position, .. } = &error {
                    run.contradiction = Some(*position);
                    info!(%position, iteration, seed = run.seed, "contradiction");
                }
                self.status = Status::Paused;
                return Err(error);
            }
        };

        if run.queue.is_empty() {
            if run.grid.is_complete() {
                info!(iteration, seed = run.seed, "run completed");
                self.status = Status::Stopped(Outcome::Completed);
            } else if run.config.break_at_iteration && self.status == Status::Running {
                debug!(iteration, "wavefront settled, pausing");
                self.status = Status::Paused;
            }
        }

        trace!(?kind, iteration, queued = run.queue.len(), "step");

        Ok(StepReport {
            kind,
            status: self.status,
            iteration,
            resolved: run.stats.resolved,
        })
    }

    /// Suspend stepping until `resume`
    pub fn pause(&mut self) -> Status {
        if self.status == Status::Running {
            self.status = Status::Paused;
        }
        self.status
    }

    /// Continue a paused run
    pub fn resume(&mut self) -> Status {
        if self.status == Status::Paused {
            self.status = Status::Running;
        }
        self.status
    }

    /// End the run; repeated calls keep the first outcome
    pub fn stop(&mut self) -> Status {
        if let Status::Running | Status::Paused = self.status {
            let outcome = match &self.run {
                Some(run) if run.contradiction.is_some() => Outcome::Failed,
                Some(run) if run.grid.is_complete() => Outcome::Completed,
                _ => Outcome::Cancelled,
            };
            self.status = Status::Stopped(outcome);
        }
        self.status
    }

    /// Change the preferred interval between steps
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a negative or non-finite speed
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        validate_speed(speed)?;
        if let Some(run) = self.run.as_mut() {
            run.config.speed = speed;
        }
        Ok(())
    }

    /// Preferred pause between steps, `None` in turbo mode
    pub fn preferred_interval(&self) -> Option<Duration> {
        self.run
            .as_ref()
            .map(|run| run.config.speed)
            .filter(|&speed| speed > 0.0)
            .map(Duration::from_secs_f64)
    }

    /// Current lifecycle state
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Seed of the active run
    pub fn seed(&self) -> Option<u64> {
        self.run.as_ref().map(|run| run.seed)
    }

    /// Configuration of the active run
    pub fn config(&self) -> Option<&RunConfig> {
        self.run.as_ref().map(|run| &run.config)
    }

    /// Grid of the active run
    pub fn grid(&self) -> Option<&Grid> {
        self.run.as_ref().map(|run| &run.grid)
    }

    /// Shared possibility list of the active run
    pub fn possibilities(&self) -> &[Possibility] {
        self.run
            .as_ref()
            .map_or(&[], |run| run.possibilities.as_slice())
    }

    /// Compatibility table of the active run
    pub fn rules(&self) -> Option<&AdjacencyRules> {
        self.run.as_ref().map(|run| &run.rules)
    }

    /// Resolutions in the order they happened
    pub fn resolutions(&self) -> &[Resolution] {
        self.run
            .as_ref()
            .map_or(&[], |run| run.resolutions.as_slice())
    }

    /// Counters of the active run
    pub fn stats(&self) -> SolverStats {
        self.run.as_ref().map(|run| run.stats).unwrap_or_default()
    }

    /// Number of cells waiting to propagate
    pub fn queue_len(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.queue.len())
    }

    /// Position of the cell that failed, if the run hit a contradiction
    pub fn contradiction(&self) -> Option<Position> {
        self.run.as_ref().and_then(|run| run.contradiction)
    }

    /// Possibility a resolved cell holds
    pub fn resolved_at(&self, position: Position) -> Option<&Possibility> {
        let run = self.run.as_ref()?;
        let index = run.grid.cell(position)?.resolved_possibility()?;
        run.possibilities.get(index)
    }
}

impl RunState {
    fn advance(&mut self, observer: &mut dyn SolverObserver) -> Result<StepKind> {
        let grid = &self.grid;
        if let Some(index) = self
            .queue
            .pop(|i| grid.cell_at(i).map_or(0, Cell::entropy))
        {
            let position = self
                .grid
                .position_of(index)
                .ok_or_else(|| configuration_error(&format!("queued cell {index} is off-grid")))?;
            self.stats.propagations += 1;
            self.propagate_from(position, observer)?;
            return Ok(StepKind::Propagate(position));
        }

        let Some(position) = select_cell(&self.grid, &self.possibilities, &mut self.selector)
        else {
            return Ok(StepKind::Complete);
        };

        let cell = self
            .grid
            .cell_mut(position)
            .ok_or_else(|| configuration_error(&format!("selected cell {position} is off-grid")))?;
        let Some(choice) = sample_possibility(cell, &self.possibilities, &mut self.selector) else {
            return Err(WfcError::Contradiction {
                position,
                iteration: 0,
            });
        };
        let change = cell.resolve_to(choice)?;
        self.stats.collapses += 1;
        self.emit(position, change, observer);

        self.propagate_from(position, observer)?;
        Ok(StepKind::Collapse(position))
    }

    fn propagate_from(&mut self, position: Position, observer: &mut dyn SolverObserver) -> Result<()> {
        let mut changes = Vec::with_capacity(4);
        let outcome = propagate_into(&mut self.grid, &self.rules, position, &mut changes);
        let settled = outcome.is_ok();

        // Neighbors narrowed before a contradiction are reported too
        for NeighborChange {
            position: neighbor,
            index,
            change,
            ..
        } in changes
        {
            self.stats.constrained += 1;
            self.emit(neighbor, change, observer);
            if !settled {
                continue;
            }

            // Newly resolved neighbors still constrain their own neighbors
            let entropy = match change {
                CellChange::Updated { entropy } => entropy,
                CellChange::Resolved { .. } => 1,
                CellChange::Unchanged => continue,
            };
            let tiebreak = self.selector.tiebreak();
            self.queue.update(index, entropy, tiebreak);
        }
        outcome
    }

    fn emit(&mut self, position: Position, change: CellChange, observer: &mut dyn SolverObserver) {
        match change {
            CellChange::Resolved { possibility } => {
                let Some(chosen) = self.possibilities.get(possibility) else {
                    return;
                };
                let resolution = Resolution {
                    position,
                    prototype_id: chosen.prototype_id().to_string(),
                    rotation: chosen.rotation(),
                    possibility,
                    iteration: self.stats.iterations,
                };
                debug!(%position, tile = %chosen, "resolved");
                self.stats.resolved += 1;
                observer.resolved(&resolution);
                self.resolutions.push(resolution);
            }
            CellChange::Updated { entropy } => {
                observer.updated(&Update {
                    position,
                    entropy,
                    max_entropy: self.possibilities.len(),
                });
            }
            CellChange::Unchanged => {}
        }
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    for (name, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(configuration_error(&format!("grid {name} must be positive")));
        }
        if value > MAX_GRID_DIMENSION {
            return Err(configuration_error(&format!(
                "grid {name} {value} exceeds the maximum of {MAX_GRID_DIMENSION}"
            )));
        }
    }
    Ok(())
}

fn validate_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(invalid_parameter(
            "speed",
            &speed,
            &"must be a finite number of seconds, zero or greater",
        ));
    }
    Ok(())
}
