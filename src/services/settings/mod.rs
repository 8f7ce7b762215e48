//! Settings persistence and the grid a fresh session starts from.

mod service;

pub use service::SettingsService;

use anyhow::{anyhow, Result};

use crate::models::axis::Axis;
use crate::models::schedule::{sample_events, ScheduleData, ScheduleState};
use crate::models::settings::Settings;
use crate::services::grid::ScheduleGrid;

/// Build the starting grid described by `settings`.
pub fn initial_grid(settings: &Settings) -> Result<ScheduleGrid> {
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;
    let time_slots = settings
        .time_slot_labels()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;

    let mut grid = ScheduleGrid::new(
        Axis::default(),
        Axis::default(),
        settings.merge_axis,
    );
    let schedule = if settings.seed_sample_events {
        sample_events()
    } else {
        ScheduleData::new()
    };
    let dropped = grid.replace_all(ScheduleState {
        schedule,
        days: settings.days.clone(),
        time_slots,
        heading_text: settings.heading_text.clone(),
    });
    if !dropped.is_empty() {
        log::info!("{} sample events do not fit the configured grid", dropped.len());
    }

    Ok(grid)
}
