//! CSV export and import of the schedule grid.
//!
//! One row per anchored event with the columns `Day,Time,Title,Subtitle,ColSpan`.
//! `ColSpan` holds the span along the grid's merge axis.

mod export;
mod import;
mod utils;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::services::grid::ScheduleGrid;

pub(crate) const HEADER: [&str; 5] = ["Day", "Time", "Title", "Subtitle", "ColSpan"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("CSV must contain a '{0}' column")]
    MissingColumn(String),
    #[error("line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// Render every event in `grid` as CSV text.
pub fn export(grid: &ScheduleGrid) -> String {
    export::to_string(grid)
}

/// Replace the events of `grid` with the rows in `text`.
///
/// Day and time labels are matched against the grid's axes; labels the grid
/// does not know yet are appended. Axis labels and the heading are otherwise
/// kept. Any bad row rejects the whole import and leaves `grid` unchanged.
/// Returns the number of imported events.
pub fn import(grid: &mut ScheduleGrid, text: &str) -> Result<usize, CsvError> {
    import::into_grid(grid, text)
}

pub fn export_to_file(grid: &ScheduleGrid, path: &Path) -> Result<()> {
    fs::write(path, export(grid)).with_context(|| format!("Failed to write CSV file: {:?}", path))
}

pub fn import_from_file(grid: &mut ScheduleGrid, path: &Path) -> Result<usize> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read CSV file: {:?}", path))?;
    let count = import(grid, &content).with_context(|| format!("Failed to import {:?}", path))?;
    Ok(count)
}
