use crate::models::coordinate::Coordinate;
use crate::models::event::ScheduleEvent;
use crate::models::schedule::CellState;

use super::{GridError, ScheduleGrid};

impl ScheduleGrid {
    /// Insert or overwrite the event anchored at `key`.
    ///
    /// The event keeps whatever span it carries on the merge axis; the cells
    /// that span covers must already be empty (or belong to the block being
    /// replaced). Nothing is removed implicitly.
    pub fn place_or_replace(&mut self, key: Coordinate, event: ScheduleEvent) -> Result<(), GridError> {
        event.validate().map_err(GridError::InvalidEvent)?;
        self.ensure_in_bounds(key)?;
        if let Some(anchor) = self.find_anchor_covering(key) {
            return Err(GridError::CellCovered { key, anchor });
        }

        let event = event.normalized_for(self.merge_axis);
        let covered = self.block_after(key, event.span(self.merge_axis))?;
        for cell in covered {
            match self.cell_state(cell) {
                CellState::Empty => {}
                CellState::Covered { anchor } if anchor == key => {}
                _ => return Err(GridError::CellOccupied(cell)),
            }
        }

        log::debug!("Placing \"{}\" at {}", event.title, key);
        self.insert_anchor(key, event);
        Ok(())
    }

    /// Anchor `event` at `key` with `span` cells and drop every key in
    /// `covered_keys_to_remove` in the same step.
    ///
    /// `covered_keys_to_remove` must be exactly the `span - 1` cells after
    /// `key` on the merge axis (in any order). Anything else is a bug in the
    /// caller and is rejected without touching the grid.
    pub fn place_with_span(
        &mut self,
        key: Coordinate,
        event: ScheduleEvent,
        span: u32,
        covered_keys_to_remove: &[Coordinate],
    ) -> Result<(), GridError> {
        event.validate().map_err(GridError::InvalidEvent)?;
        self.ensure_in_bounds(key)?;
        if span == 0 {
            return Err(GridError::InvalidEvent("Event span must be at least 1".to_string()));
        }

        let expected = self.block_after(key, span).map_err(|e| {
            log::error!("place_with_span called with a span past the axis: {}", e);
            e
        })?;

        let mut given = covered_keys_to_remove.to_vec();
        given.sort();
        if given != expected {
            log::error!(
                "place_with_span at {} with span {} got covered keys {:?}",
                key,
                span,
                covered_keys_to_remove
            );
            return Err(GridError::CoveredKeysMismatch { key, span });
        }

        if let Some(anchor) = self.find_anchor_covering(key) {
            return Err(GridError::CellCovered { key, anchor });
        }

        for cell in &expected {
            if let Some(displaced) = self.remove_anchor(*cell) {
                log::debug!("Merge at {} replaces \"{}\" at {}", key, displaced.title, cell);
            }
        }

        let mut event = event.normalized_for(self.merge_axis);
        event.set_span(self.merge_axis, span);
        log::debug!("Placing \"{}\" at {} spanning {} cells", event.title, key, span);
        self.insert_anchor(key, event);
        Ok(())
    }

    /// Delete the event anchored at `key`. Cells it covered become empty.
    pub fn remove(&mut self, key: Coordinate) -> Option<ScheduleEvent> {
        let removed = self.remove_anchor(key);
        if let Some(event) = &removed {
            log::debug!("Removed \"{}\" from {}", event.title, key);
        }
        removed
    }

    /// Split a merged block back to a single cell and return the freed cells.
    ///
    /// The freed cells are left empty; no events are created for them.
    pub fn unmerge(&mut self, key: Coordinate) -> Result<Vec<Coordinate>, GridError> {
        let event = self.events.get(&key).ok_or(GridError::NoEvent(key))?;
        if event.span(self.merge_axis) <= 1 {
            return Err(GridError::NotMerged(key));
        }

        let freed = self.coordinates_covered_by(key);
        let mut event = event.clone();
        event.set_span(self.merge_axis, 1);
        self.insert_anchor(key, event);
        Ok(freed)
    }

    /// Merge a selection of cells into one block holding `event`.
    ///
    /// The cells must share the same position on the fixed axis and form a
    /// gap-free run along the merge axis. Returns the anchor of the block.
    pub fn merge_selection(
        &mut self,
        cells: &[Coordinate],
        event: ScheduleEvent,
    ) -> Result<Coordinate, GridError> {
        let axis = self.merge_axis;
        let fixed_axis = axis.other();
        let not_contiguous = GridError::NonContiguousSelection(axis);

        let Some(first) = cells.first() else {
            return Err(not_contiguous);
        };
        let fixed = first.along(fixed_axis);
        if cells.iter().any(|cell| cell.along(fixed_axis) != fixed) {
            return Err(not_contiguous);
        }

        let mut positions: Vec<usize> = cells.iter().map(|cell| cell.along(axis)).collect();
        positions.sort_unstable();
        if positions.windows(2).any(|pair| pair[1] != pair[0] + 1) {
            return Err(not_contiguous);
        }

        let anchor = Coordinate::from_axes(axis, positions[0], fixed);
        let span = positions.len() as u32;
        let covered = anchor.following(axis, positions.len() - 1);
        self.place_with_span(anchor, event, span, &covered)?;
        Ok(anchor)
    }

    /// Apply a save from the event dialog.
    ///
    /// `None` deletes the event at `key` along with any keys in
    /// `covered_keys_to_remove`. With covered keys the event is placed as a
    /// merged block, otherwise it is placed or replaced in a single step.
    pub fn commit(
        &mut self,
        key: Coordinate,
        event: Option<ScheduleEvent>,
        covered_keys_to_remove: &[Coordinate],
    ) -> Result<(), GridError> {
        match event {
            None => {
                self.remove(key);
                for cell in covered_keys_to_remove {
                    self.remove(*cell);
                }
                Ok(())
            }
            Some(event) if !covered_keys_to_remove.is_empty() => {
                let span = covered_keys_to_remove.len() as u32 + 1;
                self.place_with_span(key, event, span, covered_keys_to_remove)
            }
            Some(event) => self.place_or_replace(key, event),
        }
    }
}
