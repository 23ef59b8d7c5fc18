//! Host-side loops that drive a `Solver`
//!
//! The solver never owns a timer. These drivers cover the two ways a host
//! advances it: a tight synchronous loop for turbo mode and a paced loop
//! where the host supplies the clock and the sleep.

use crate::algorithm::solver::{Solver, Status, StepReport};
use crate::io::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Step the solver with no suspension until it leaves `Running`
///
/// `cancel` is polled once per step; when set, the run is stopped before the
/// next step starts. Returns the status the loop ended in, which is `Paused`
/// when the run asked to break once its wavefront settled.
///
/// # Errors
///
/// Propagates the first step error, typically a contradiction
pub fn run_turbo(
    solver: &mut Solver,
    cancel: &AtomicBool,
    mut on_step: impl FnMut(&StepReport),
) -> Result<Status> {
    while solver.status() == Status::Running {
        if cancel.load(Ordering::Relaxed) {
            debug!("turbo run cancelled");
            return Ok(solver.stop());
        }
        let report = solver.step()?;
        on_step(&report);
    }
    Ok(solver.status())
}

/// Timer-paced stepping for interactive hosts
///
/// The host calls `tick` from its own timer with the current time; a step
/// happens only once the solver's preferred interval has elapsed since the
/// previous one. The interval is re-read on every tick, so `set_speed`
/// takes effect at the next step.
#[derive(Debug, Default, Clone, Copy)]
pub struct PacedDriver {
    last_step: Option<Instant>,
}

impl PacedDriver {
    /// Create a driver that steps on its first tick
    pub const fn new() -> Self {
        Self { last_step: None }
    }

    /// Instant the next step becomes due, if one has already run
    pub fn next_due(&self, solver: &Solver) -> Option<Instant> {
        let interval = solver.preferred_interval().unwrap_or(Duration::ZERO);
        self.last_step.map(|last| last + interval)
    }

    /// Step once if the solver is running and a step is due
    ///
    /// # Errors
    ///
    /// Propagates the step error
    pub fn tick(&mut self, solver: &mut Solver, now: Instant) -> Result<Option<StepReport>> {
        if solver.status() != Status::Running {
            return Ok(None);
        }
        if self.next_due(solver).is_some_and(|due| now < due) {
            return Ok(None);
        }
        self.last_step = Some(now);
        solver.step().map(Some)
    }
}

/// Step the solver at its preferred interval until it leaves `Running`
///
/// `sleep` is called between steps with the interval to wait; tests pass a
/// no-op. `cancel` is polled once per step.
///
/// # Errors
///
/// Propagates the first step error
pub fn run_paced(
    solver: &mut Solver,
    cancel: &AtomicBool,
    mut sleep: impl FnMut(Duration),
    mut on_step: impl FnMut(&StepReport),
) -> Result<Status> {
    while solver.status() == Status::Running {
        if cancel.load(Ordering::Relaxed) {
            debug!("paced run cancelled");
            return Ok(solver.stop());
        }
        let report = solver.step()?;
        on_step(&report);
        if report.status == Status::Running {
            sleep(solver.preferred_interval().unwrap_or(Duration::ZERO));
        }
    }
    Ok(solver.status())
}
