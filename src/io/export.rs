//! Result documents and text rendering of solved grids

use crate::algorithm::solver::{Outcome, Solver, Status};
use crate::io::error::{Result, WfcError, configuration_error, file_system_error};
use crate::spatial::cell::Cell;
use crate::spatial::grid::Grid;
use crate::tiles::possibility::Possibility;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One resolved cell in a result document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Column
    pub x: usize,
    /// Row, growing northward
    pub y: usize,
    /// Prototype id
    pub tile: String,
    /// Rotation index in `0..4`
    pub rotation: usize,
    /// Counterclockwise angle in degrees
    pub degrees: u16,
}

/// Serializable summary of a finished run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Seed that reproduces the run
    pub seed: u64,
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,
    /// Whether every cell resolved
    pub completed: bool,
    /// Steps executed
    pub iterations: usize,
    /// Resolved cells in row-major order
    pub placements: Vec<Placement>,
}

impl RunResult {
    /// Capture the current grid of a solver
    ///
    /// Unresolved cells are left out of `placements`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no run was started
    pub fn from_solver(solver: &Solver) -> Result<Self> {
        let (Some(grid), Some(seed)) = (solver.grid(), solver.seed()) else {
            return Err(configuration_error(&"no run to export"));
        };
        let possibilities = solver.possibilities();
        let placements = grid
            .cells()
            .filter_map(|cell| placement(cell, possibilities))
            .collect();

        Ok(Self {
            seed,
            width: grid.width(),
            height: grid.height(),
            completed: solver.status() == Status::Stopped(Outcome::Completed),
            iterations: solver.stats().iterations,
            placements,
        })
    }

    /// Write the document as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `Parse` if serialization fails and `FileSystem` if the file
    /// can't be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create output directory", e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| WfcError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| file_system_error(path, "write result", e))
    }
}

fn placement(cell: &Cell, possibilities: &[Possibility]) -> Option<Placement> {
    let chosen = possibilities.get(cell.resolved_possibility()?)?;
    let position = cell.position();
    Some(Placement {
        x: position.x,
        y: position.y,
        tile: chosen.prototype_id().to_string(),
        rotation: chosen.rotation().index(),
        degrees: chosen.rotation().degrees(),
    })
}

/// Text rendering of a grid with north at the top
///
/// Resolved cells show the first character of their prototype id followed
/// by the rotation index. Unresolved cells show `..` and failed cells `!!`.
pub fn render_ascii(grid: &Grid, possibilities: &[Possibility]) -> String {
    let mut out = String::with_capacity(grid.len() * 3 + grid.height());
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let Some(cell) = grid.cell_at(y * grid.width() + x) else {
                continue;
            };
            if x > 0 {
                out.push(' ');
            }
            let glyph = cell
                .resolved_possibility()
                .and_then(|i| possibilities.get(i))
                .map(|p| {
                    let initial = p.prototype_id().chars().next().unwrap_or('#');
                    format!("{initial}{}", p.rotation().index())
                });
            match glyph {
                Some(glyph) => out.push_str(&glyph),
                None if cell.is_failed() => out.push_str("!!"),
                None => out.push_str(".."),
            }
        }
        out.push('\n');
    }
    out
}
