//! Per-tileset progress bars counting resolved cells

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;

/// Display state of one tileset being solved
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FileState {
    name: String,
    resolved: usize,
    cells: usize,
    attempt: usize,
}

/// Progress display for a batch of tilesets
///
/// Shows one bar per tileset for small batches. Larger batches get an extra
/// overall bar and a rolling window over the most recent tilesets.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_style() -> ProgressStyle {
    let template = format!("{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
}

fn batch_style() -> ProgressStyle {
    let template =
        format!("[{{elapsed_precise}}] Tilesets: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

impl ProgressManager {
    /// Create an empty progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Allocate bars for `file_count` tilesets
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(batch_style());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let style = cell_style();
        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(style.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Begin an attempt on a tileset with `cells` cells to resolve
    pub fn start_file(&mut self, index: usize, path: &Path, cells: usize, attempt: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                resolved: 0,
                cells,
                attempt,
            };
        }
        self.update_bars();
    }

    /// Report how many cells are resolved so far
    pub fn update_cells(&mut self, index: usize, resolved: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.resolved = resolved;
        }
        self.update_bars();
    }

    /// Mark a tileset as finished, marking failures with a cross
    pub fn complete_file(&mut self, index: usize, solved: bool) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.file_states.get_mut(index) {
            let mark = if solved { '✓' } else { '✗' };
            state.name = format!("{mark} {}", state.name);
            if solved {
                state.resolved = state.cells;
            }
        }
        self.update_bars();
    }

    /// Clear all bars from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All tilesets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Number of individual bars allocated
    pub fn bar_count(&self) -> usize {
        self.file_bars.len()
    }

    /// Whether the overall batch bar is shown
    pub const fn has_batch_bar(&self) -> bool {
        self.batch_bar.is_some()
    }

    // Rolling window over the most recently started tilesets
    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, state) in visible.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_index) {
                bar.set_length(state.cells as u64);
                bar.set_position(state.resolved as u64);
                bar.set_prefix(state.name.clone());
                let width = state.cells.to_string().len();
                bar.set_message(format!(
                    "{:>width$}/{} cells (attempt {})",
                    state.resolved, state.cells, state.attempt
                ));
            }
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
