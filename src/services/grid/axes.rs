use crate::models::axis::validate_label;
use crate::models::coordinate::{AxisKind, Coordinate};
use crate::models::event::ScheduleEvent;
use crate::models::schedule::ScheduleData;

use super::{GridError, ScheduleGrid};

impl ScheduleGrid {
    /// Append a label to `kind` and return its index.
    pub fn add_axis_entry(&mut self, kind: AxisKind, label: &str) -> Result<usize, GridError> {
        self.check_label(kind, label, None)?;
        let index = self.axis_mut(kind).push(label.trim());
        log::info!("Added {} entry \"{}\" at {}", kind.name(), label.trim(), index);
        Ok(index)
    }

    pub fn relabel_axis_entry(&mut self, kind: AxisKind, index: usize, label: &str) -> Result<(), GridError> {
        self.check_label(kind, label, Some(index))?;
        if self.axis_mut(kind).relabel(index, label.trim()) {
            Ok(())
        } else {
            Err(GridError::AxisIndexOutOfRange { axis: kind, index })
        }
    }

    // Labels on one axis stay distinct
    fn check_label(&self, kind: AxisKind, label: &str, index: Option<usize>) -> Result<(), GridError> {
        validate_label(label).map_err(GridError::InvalidLabel)?;
        match self.axis(kind).position(label) {
            Some(existing) if Some(existing) != index => Err(GridError::InvalidLabel(format!(
                "\"{}\" is already used on the {} axis",
                label.trim(),
                kind.name()
            ))),
            _ => Ok(()),
        }
    }

    /// Remove the entry at `index` from `kind` and shift later entries down.
    ///
    /// On the fixed axis every event in the removed row is dropped. On the
    /// merge axis blocks crossing the index lose one cell and a single-cell
    /// event at the index is dropped. Returns the dropped events with the
    /// keys they had before the removal.
    pub fn remove_axis_entry(
        &mut self,
        kind: AxisKind,
        index: usize,
    ) -> Result<Vec<(Coordinate, ScheduleEvent)>, GridError> {
        if index >= self.axis(kind).len() {
            return Err(GridError::AxisIndexOutOfRange { axis: kind, index });
        }

        let merge_axis = self.merge_axis;
        let mut kept = ScheduleData::new();
        let mut dropped = Vec::new();

        for (key, mut event) in std::mem::take(&mut self.events) {
            let position = key.along(kind);

            if kind != merge_axis {
                match position.cmp(&index) {
                    std::cmp::Ordering::Less => {
                        kept.insert(key, event);
                    }
                    std::cmp::Ordering::Equal => dropped.push((key, event)),
                    std::cmp::Ordering::Greater => {
                        kept.insert(key.with(kind, position - 1), event);
                    }
                }
                continue;
            }

            let span = event.span(merge_axis) as usize;
            if position > index {
                kept.insert(key.with(kind, position - 1), event);
            } else if position + span <= index {
                kept.insert(key, event);
            } else if span == 1 {
                dropped.push((key, event));
            } else {
                event.set_span(merge_axis, span as u32 - 1);
                kept.insert(key, event);
            }
        }

        let label = self.axis_mut(kind).remove(index);
        self.events = kept;
        self.rebuild_coverage();

        log::info!(
            "Removed {} entry {:?} at {}, dropping {} events",
            kind.name(),
            label.unwrap_or_default(),
            index,
            dropped.len()
        );
        Ok(dropped)
    }
}
