//! Schedule grid model.
//!
//! `ScheduleGrid` is the only owner of the event map. Merged blocks are
//! stored as a single anchor whose span runs along the grid's merge axis;
//! the cells it covers never hold their own entry. A coverage index mapping
//! each covered cell to its anchor is kept in step with every mutation, so
//! cell queries never have to scan backwards.
//!
//! Mutations take `&mut self` and are atomic: they either apply completely
//! or return a [`GridError`] with the grid unchanged.

mod axes;
mod merge;
mod moves;
mod queries;

use std::collections::HashMap;
use thiserror::Error;

use crate::models::axis::Axis;
use crate::models::coordinate::{AxisKind, Coordinate};
use crate::models::event::ScheduleEvent;
use crate::models::schedule::{ScheduleData, ScheduleState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coordinate),
    #[error("no event at cell {0}")]
    NoEvent(Coordinate),
    #[error("cell {key} is covered by the event at {anchor}")]
    CellCovered { key: Coordinate, anchor: Coordinate },
    #[error("cell {0} is already occupied")]
    CellOccupied(Coordinate),
    #[error("a span of {span} starting at {key} does not fit the grid")]
    SpanOutOfBounds { key: Coordinate, span: u32 },
    #[error("covered cells passed for {key} are not the {} cells following it", .span.saturating_sub(1))]
    CoveredKeysMismatch { key: Coordinate, span: u32 },
    #[error("event at {0} is not merged")]
    NotMerged(Coordinate),
    #[error("cannot move to {destination}: cell {blocked} is not empty")]
    DestinationOccupied {
        destination: Coordinate,
        blocked: Coordinate,
    },
    #[error("selection must be a gap-free run of cells along the {}", .0.name())]
    NonContiguousSelection(AxisKind),
    #[error("invalid event: {0}")]
    InvalidEvent(String),
    #[error("invalid label: {0}")]
    InvalidLabel(String),
    #[error("{} index {index} is out of range", .axis.name())]
    AxisIndexOutOfRange { axis: AxisKind, index: usize },
}

#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    days: Axis,
    time_slots: Axis,
    heading_text: String,
    merge_axis: AxisKind,
    events: ScheduleData,
    // covered cell -> anchor
    coverage: HashMap<Coordinate, Coordinate>,
}

impl ScheduleGrid {
    /// Create an empty grid over the given axes.
    pub fn new(days: Axis, time_slots: Axis, merge_axis: AxisKind) -> Self {
        Self {
            days,
            time_slots,
            heading_text: String::new(),
            merge_axis,
            events: ScheduleData::new(),
            coverage: HashMap::new(),
        }
    }

    /// Build a grid from a decoded or imported state.
    ///
    /// Returns the grid together with the keys that had to be dropped, see
    /// [`ScheduleGrid::replace_all`].
    pub fn from_state(state: ScheduleState, merge_axis: AxisKind) -> (Self, Vec<Coordinate>) {
        let mut grid = Self::new(Axis::default(), Axis::default(), merge_axis);
        let dropped = grid.replace_all(state);
        (grid, dropped)
    }

    pub fn days(&self) -> &Axis {
        &self.days
    }

    pub fn time_slots(&self) -> &Axis {
        &self.time_slots
    }

    pub fn axis(&self, kind: AxisKind) -> &Axis {
        match kind {
            AxisKind::Days => &self.days,
            AxisKind::TimeSlots => &self.time_slots,
        }
    }

    fn axis_mut(&mut self, kind: AxisKind) -> &mut Axis {
        match kind {
            AxisKind::Days => &mut self.days,
            AxisKind::TimeSlots => &mut self.time_slots,
        }
    }

    pub fn merge_axis(&self) -> AxisKind {
        self.merge_axis
    }

    pub fn heading_text(&self) -> &str {
        &self.heading_text
    }

    pub fn set_heading_text(&mut self, text: impl Into<String>) {
        self.heading_text = text.into();
    }

    /// Anchored events. Covered cells are not included.
    pub fn events(&self) -> &ScheduleData {
        &self.events
    }

    pub fn event(&self, key: Coordinate) -> Option<&ScheduleEvent> {
        self.events.get(&key)
    }

    pub fn in_bounds(&self, key: Coordinate) -> bool {
        key.day < self.days.len() && key.time < self.time_slots.len()
    }

    /// Serializable copy of the whole state.
    pub fn snapshot(&self) -> ScheduleState {
        ScheduleState {
            schedule: self.events.clone(),
            days: self.days.labels().to_vec(),
            time_slots: self.time_slots.labels().to_vec(),
            heading_text: self.heading_text.clone(),
        }
    }

    /// Replace axes, heading and events in one step.
    ///
    /// The state may come from an untrusted token, so it is normalized
    /// rather than rejected: anchors outside the axes, invalid events and
    /// anchors that fall inside an earlier block are dropped, spans on the
    /// other axis are cleared and spans running past the axis are clamped.
    /// Each fix is logged. Returns the dropped keys.
    pub fn replace_all(&mut self, state: ScheduleState) -> Vec<Coordinate> {
        let axis = self.merge_axis;
        let mut next = Self::new(Axis::new(state.days), Axis::new(state.time_slots), axis);
        next.heading_text = state.heading_text;

        let mut dropped = Vec::new();
        for (key, event) in state.schedule {
            if !next.in_bounds(key) {
                log::warn!("Dropping event at {}: outside the {}x{} grid", key, next.days.len(), next.time_slots.len());
                dropped.push(key);
                continue;
            }
            if let Err(e) = event.validate() {
                log::warn!("Dropping event at {}: {}", key, e);
                dropped.push(key);
                continue;
            }
            if let Some(anchor) = next.coverage.get(&key) {
                log::warn!("Dropping event at {}: covered by the event at {}", key, anchor);
                dropped.push(key);
                continue;
            }

            let mut normalized = event.normalized_for(axis);
            if normalized != event {
                log::warn!("Clearing span on the wrong axis for event at {}", key);
            }
            let room = (next.axis(axis).len() - key.along(axis)) as u32;
            let span = normalized.span(axis);
            if span > room {
                log::warn!("Clamping span of event at {} from {} to {}", key, span, room);
                normalized.set_span(axis, room);
            }

            next.insert_anchor(key, normalized);
        }

        log::info!(
            "Loaded schedule with {} events on {} days x {} time slots ({} dropped)",
            next.events.len(),
            next.days.len(),
            next.time_slots.len(),
            dropped.len()
        );

        *self = next;
        dropped
    }

    /// Check the structural invariants. Intended for tests and debug tooling.
    pub fn validate_invariants(&self) -> Result<(), String> {
        let mut expected: HashMap<Coordinate, Coordinate> = HashMap::new();

        for (&key, event) in &self.events {
            if !self.in_bounds(key) {
                return Err(format!("anchor {} is outside the grid", key));
            }
            let span = event.span(self.merge_axis) as usize;
            if key.along(self.merge_axis) + span > self.axis(self.merge_axis).len() {
                return Err(format!("span of {} at {} runs past the axis", span, key));
            }
            if event.span(self.merge_axis.other()) != 1 {
                return Err(format!("event at {} has a span on the fixed axis", key));
            }
            for cell in key.following(self.merge_axis, span - 1) {
                if self.events.contains_key(&cell) {
                    return Err(format!("cell {} is covered by {} but holds its own event", cell, key));
                }
                if let Some(other) = expected.insert(cell, key) {
                    return Err(format!("cell {} is covered by both {} and {}", cell, other, key));
                }
            }
        }

        if expected != self.coverage {
            return Err("coverage index is out of date".to_string());
        }
        Ok(())
    }

    fn ensure_in_bounds(&self, key: Coordinate) -> Result<(), GridError> {
        if self.in_bounds(key) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(key))
        }
    }

    /// The `span - 1` cells after `key` on the merge axis, if they fit.
    fn block_after(&self, key: Coordinate, span: u32) -> Result<Vec<Coordinate>, GridError> {
        let start = key.along(self.merge_axis);
        let span_len = span.max(1) as usize;
        if start + span_len > self.axis(self.merge_axis).len() {
            return Err(GridError::SpanOutOfBounds { key, span });
        }
        Ok(key.following(self.merge_axis, span_len - 1))
    }

    fn insert_anchor(&mut self, key: Coordinate, event: ScheduleEvent) {
        self.unindex(key);
        let span = event.span(self.merge_axis) as usize;
        for cell in key.following(self.merge_axis, span - 1) {
            self.coverage.insert(cell, key);
        }
        self.events.insert(key, event);
    }

    fn remove_anchor(&mut self, key: Coordinate) -> Option<ScheduleEvent> {
        self.unindex(key);
        self.events.remove(&key)
    }

    fn unindex(&mut self, key: Coordinate) {
        let covered = match self.events.get(&key) {
            Some(event) => key.following(self.merge_axis, event.span(self.merge_axis) as usize - 1),
            None => return,
        };
        for cell in covered {
            self.coverage.remove(&cell);
        }
    }

    fn rebuild_coverage(&mut self) {
        self.coverage.clear();
        for (&key, event) in &self.events {
            let span = event.span(self.merge_axis) as usize;
            for cell in key.following(self.merge_axis, span - 1) {
                self.coverage.insert(cell, key);
            }
        }
    }
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::new(Axis::default(), Axis::default(), AxisKind::default())
    }
}
