//! Tests for turbo and paced solver loops

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::time::{Duration, Instant};
    use tilecollapse::algorithm::driver::{PacedDriver, run_paced, run_turbo};
    use tilecollapse::algorithm::solver::{Outcome, RunConfig, Solver, Status};
    use tilecollapse::tiles::catalog::EdgeCatalog;
    use tilecollapse::tiles::edge::EdgeType;
    use tilecollapse::tiles::prototype::{TilePrototype, TileSet};

    fn meadow() -> TileSet {
        let catalog = EdgeCatalog::from_types([EdgeType::symmetrical("grass")]).unwrap();
        TileSet::new(catalog, vec![TilePrototype::uniform("grass", "grass")])
    }

    fn solver(config: RunConfig) -> Solver {
        let mut solver = Solver::new();
        solver.run(&meadow(), config).unwrap();
        solver
    }

    // Tests turbo runs to completion and reports every step
    // Verified by breaking out of the loop after one step
    #[test]
    fn test_turbo_completes() {
        let mut solver = solver(RunConfig::new(3, 2).with_seed(4));
        let cancel = AtomicBool::new(false);
        let mut steps = 0;

        let status = run_turbo(&mut solver, &cancel, |_| steps += 1).unwrap();

        assert_eq!(status, Status::Stopped(Outcome::Completed));
        assert_eq!(steps, 6);
    }

    // Tests a raised cancel flag stops the run before the next step
    // Verified by polling the flag after stepping
    #[test]
    fn test_turbo_cancel() {
        let mut solver = solver(RunConfig::new(3, 3).with_seed(4));
        let cancel = AtomicBool::new(true);
        let mut steps = 0;

        let status = run_turbo(&mut solver, &cancel, |_| steps += 1).unwrap();

        assert_eq!(status, Status::Stopped(Outcome::Cancelled));
        assert_eq!(steps, 0);
    }

    // Tests turbo hands control back when the run pauses itself
    // Verified by resuming inside run_turbo
    #[test]
    fn test_turbo_returns_on_pause() {
        let config = RunConfig {
            break_at_iteration: true,
            ..RunConfig::new(3, 3).with_seed(4)
        };
        let mut solver = solver(config);
        let cancel = AtomicBool::new(false);

        let status = run_turbo(&mut solver, &cancel, |_| {}).unwrap();

        assert_eq!(status, Status::Paused);
        assert_eq!(solver.stats().iterations, 1);
    }

    // Tests the paced loop sleeps the preferred interval between steps
    // Verified by sleeping after the final step as well
    #[test]
    fn test_paced_sleeps_between_steps() {
        let config = RunConfig {
            speed: 0.5,
            ..RunConfig::new(2, 2).with_seed(4)
        };
        let mut solver = solver(config);
        let cancel = AtomicBool::new(false);
        let mut sleeps = Vec::new();

        let status = run_paced(&mut solver, &cancel, |d| sleeps.push(d), |_| {}).unwrap();

        assert_eq!(status, Status::Stopped(Outcome::Completed));
        assert_eq!(sleeps, vec![Duration::from_millis(500); 3]);
    }

    // Tests ticks only step once the interval has elapsed
    // Verified by stepping on every tick
    #[test]
    fn test_paced_driver_ticks() {
        let config = RunConfig {
            speed: 1.0,
            ..RunConfig::new(3, 3).with_seed(4)
        };
        let mut solver = solver(config);
        let mut driver = PacedDriver::new();
        let start = Instant::now();

        assert!(driver.tick(&mut solver, start).unwrap().is_some());
        assert!(driver.tick(&mut solver, start + Duration::from_millis(400)).unwrap().is_none());
        assert_eq!(driver.next_due(&solver), Some(start + Duration::from_secs(1)));
        assert!(driver.tick(&mut solver, start + Duration::from_secs(1)).unwrap().is_some());

        solver.pause();
        assert!(driver.tick(&mut solver, start + Duration::from_secs(5)).unwrap().is_none());
        assert_eq!(solver.stats().iterations, 2);
    }
}
