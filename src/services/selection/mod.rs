//! Pointer-driven cell selection.
//!
//! A selection starts on pointer down, follows the pointer along the grid's
//! merge axis and resolves on pointer up into either a single-cell edit or a
//! merge candidate. The engine holds no grid state of its own; the grid is
//! only consulted when a selection resolves.

use crate::models::coordinate::{AxisKind, Coordinate};
use crate::services::grid::ScheduleGrid;

/// In-progress selection. `anchor` and `cursor` always share the same
/// position on the fixed axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Coordinate,
    pub cursor: Coordinate,
}

impl Selection {
    /// Number of cells selected along `axis`.
    pub fn span(&self, axis: AxisKind) -> u32 {
        self.anchor.along(axis).abs_diff(self.cursor.along(axis)) as u32 + 1
    }

    /// Lowest selected cell along `axis`.
    pub fn start(&self, axis: AxisKind) -> Coordinate {
        if self.cursor.along(axis) < self.anchor.along(axis) {
            self.cursor
        } else {
            self.anchor
        }
    }

    /// Selected cells in order along `axis`.
    pub fn cells(&self, axis: AxisKind) -> Vec<Coordinate> {
        let start = self.start(axis);
        let mut cells = vec![start];
        cells.extend(start.following(axis, self.span(axis) as usize - 1));
        cells
    }

    pub fn contains(&self, axis: AxisKind, key: Coordinate) -> bool {
        let fixed = axis.other();
        if key.along(fixed) != self.anchor.along(fixed) {
            return false;
        }
        let low = self.anchor.along(axis).min(self.cursor.along(axis));
        let high = self.anchor.along(axis).max(self.cursor.along(axis));
        (low..=high).contains(&key.along(axis))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting(Selection),
}

/// What the editor should do once a selection is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionIntent {
    /// Open the event at `key`. A click on a covered cell edits its anchor.
    EditCell { key: Coordinate },
    /// Merge `span` cells starting at `anchor`; `covered` lists the cells
    /// after it in order.
    Merge {
        anchor: Coordinate,
        span: u32,
        covered: Vec<Coordinate>,
    },
}

#[derive(Debug, Clone)]
pub struct SelectionEngine {
    merge_axis: AxisKind,
    state: SelectionState,
}

impl SelectionEngine {
    pub fn new(merge_axis: AxisKind) -> Self {
        Self {
            merge_axis,
            state: SelectionState::Idle,
        }
    }

    /// Engine selecting along the merge axis of `grid`.
    pub fn for_grid(grid: &ScheduleGrid) -> Self {
        Self::new(grid.merge_axis())
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn active(&self) -> Option<Selection> {
        match self.state {
            SelectionState::Selecting(selection) => Some(selection),
            SelectionState::Idle => None,
        }
    }

    /// Whether `key` should be highlighted as part of the current selection.
    pub fn is_selected(&self, key: Coordinate) -> bool {
        self.active()
            .is_some_and(|selection| selection.contains(self.merge_axis, key))
    }

    /// Start a selection at `key`, dropping any selection in flight.
    pub fn pointer_down(&mut self, key: Coordinate) {
        self.state = SelectionState::Selecting(Selection {
            anchor: key,
            cursor: key,
        });
    }

    /// Extend the selection to `key` if it lies on the anchor's row or
    /// column. Returns whether the cursor moved.
    pub fn pointer_enter(&mut self, key: Coordinate) -> bool {
        let fixed = self.merge_axis.other();
        match &mut self.state {
            SelectionState::Selecting(selection)
                if key.along(fixed) == selection.anchor.along(fixed) =>
            {
                selection.cursor = key;
                true
            }
            _ => false,
        }
    }

    /// Finish the selection and return to idle.
    ///
    /// Also used when the pointer is released outside the grid, in which
    /// case the last accepted cursor position is used.
    pub fn pointer_up(&mut self, grid: &ScheduleGrid) -> Option<SelectionIntent> {
        let selection = match std::mem::take(&mut self.state) {
            SelectionState::Selecting(selection) => selection,
            SelectionState::Idle => return None,
        };

        let axis = self.merge_axis;
        let span = selection.span(axis);
        if span == 1 {
            let key = grid
                .find_anchor_covering(selection.anchor)
                .unwrap_or(selection.anchor);
            return Some(SelectionIntent::EditCell { key });
        }

        let anchor = selection.start(axis);
        let covered = anchor.following(axis, span as usize - 1);
        log::debug!("Selection resolved to a {}-cell merge at {}", span, anchor);
        Some(SelectionIntent::Merge {
            anchor,
            span,
            covered,
        })
    }
}
