use crate::models::coordinate::Coordinate;

use super::{GridError, ScheduleGrid};

impl ScheduleGrid {
    /// Move the event anchored at `source` to `destination`, keeping its span.
    ///
    /// Every cell the block would occupy at the destination must be empty,
    /// including cells the event itself occupies at the source. Moving an
    /// event onto itself is accepted and changes nothing.
    pub fn move_event(&mut self, source: Coordinate, destination: Coordinate) -> Result<(), GridError> {
        let event = self.events.get(&source).ok_or(GridError::NoEvent(source))?;
        if source == destination {
            return Ok(());
        }
        self.ensure_in_bounds(destination)?;

        let span = event.span(self.merge_axis);
        let mut footprint = vec![destination];
        footprint.extend(self.block_after(destination, span)?);

        if let Some(blocked) = footprint
            .into_iter()
            .find(|cell| !self.cell_state(*cell).is_empty())
        {
            return Err(GridError::DestinationOccupied { destination, blocked });
        }

        if let Some(event) = self.remove_anchor(source) {
            log::debug!("Moving \"{}\" from {} to {}", event.title, source, destination);
            self.insert_anchor(destination, event);
        }
        Ok(())
    }
}
