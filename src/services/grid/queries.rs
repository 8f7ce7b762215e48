use crate::models::coordinate::Coordinate;
use crate::models::schedule::CellState;

use super::ScheduleGrid;

impl ScheduleGrid {
    /// What a cell shows: the start of a block, part of another cell's
    /// block, or nothing.
    pub fn cell_state(&self, key: Coordinate) -> CellState<'_> {
        if let Some(event) = self.events.get(&key) {
            return CellState::Anchor {
                event,
                span: event.span(self.merge_axis),
            };
        }
        match self.coverage.get(&key) {
            Some(&anchor) => CellState::Covered { anchor },
            None => CellState::Empty,
        }
    }

    /// Cells covered by the event anchored at `key`, excluding `key` itself.
    /// Empty when there is no event or it spans a single cell.
    pub fn coordinates_covered_by(&self, key: Coordinate) -> Vec<Coordinate> {
        match self.events.get(&key) {
            Some(event) => key.following(self.merge_axis, event.span(self.merge_axis) as usize - 1),
            None => Vec::new(),
        }
    }

    /// Anchor of the block that covers `key`, if another cell's event does.
    ///
    /// Anchors and empty cells are not covered by anything and yield `None`.
    pub fn find_anchor_covering(&self, key: Coordinate) -> Option<Coordinate> {
        self.coverage.get(&key).copied()
    }
}
