//! Serializable schedule state and the seed data a fresh grid starts from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::coordinate::Coordinate;
use crate::models::event::ScheduleEvent;

/// Anchored events keyed by cell. Covered cells of merged blocks never appear.
pub type ScheduleData = BTreeMap<Coordinate, ScheduleEvent>;

pub const DEFAULT_HEADING: &str = "My Weekly Schedule";

pub const DEFAULT_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Everything a share token carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub schedule: ScheduleData,
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
    pub heading_text: String,
}

/// A decoded token where any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialState {
    pub schedule: Option<ScheduleData>,
    pub days: Option<Vec<String>>,
    pub time_slots: Option<Vec<String>>,
    pub heading_text: Option<String>,
}

impl PartialState {
    pub fn is_empty(&self) -> bool {
        self.schedule.is_none()
            && self.days.is_none()
            && self.time_slots.is_none()
            && self.heading_text.is_none()
    }

    /// Fills missing fields from `base`.
    pub fn merged_over(self, base: ScheduleState) -> ScheduleState {
        ScheduleState {
            schedule: self.schedule.unwrap_or(base.schedule),
            days: self.days.unwrap_or(base.days),
            time_slots: self.time_slots.unwrap_or(base.time_slots),
            heading_text: self.heading_text.unwrap_or(base.heading_text),
        }
    }
}

impl From<ScheduleState> for PartialState {
    fn from(state: ScheduleState) -> Self {
        Self {
            schedule: Some(state.schedule),
            days: Some(state.days),
            time_slots: Some(state.time_slots),
            heading_text: Some(state.heading_text),
        }
    }
}

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState<'a> {
    Anchor { event: &'a ScheduleEvent, span: u32 },
    Covered { anchor: Coordinate },
    Empty,
}

impl CellState<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }
}

/// Sample events shown on first launch.
pub fn sample_events() -> ScheduleData {
    let entries = [
        ((1, 1), "Quantum Physics", "Room 101"),
        ((1, 3), "Advanced Calculus", "Prof. Smith"),
        ((2, 2), "Literary Analysis", "Room 203"),
        ((3, 0), "History of Art", "Auditorium B"),
        ((3, 4), "Organic Chemistry", "Lab 3"),
        ((4, 1), "Computer Science 101", "Room 404"),
        ((0, 3), "Philosophy", "Room 101"),
    ];

    entries
        .into_iter()
        .filter_map(|((day, time), title, subtitle)| {
            ScheduleEvent::builder()
                .title(title)
                .subtitle(subtitle)
                .build()
                .ok()
                .map(|event| (Coordinate::new(day, time), event))
        })
        .collect()
}
