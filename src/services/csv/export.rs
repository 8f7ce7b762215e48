use crate::services::grid::ScheduleGrid;

use super::utils::write_record;
use super::HEADER;

pub(super) fn to_string(grid: &ScheduleGrid) -> String {
    let mut csv = String::new();
    write_record(&mut csv, &HEADER);

    let axis = grid.merge_axis();
    for (key, event) in grid.events() {
        let day = grid.days().label(key.day).unwrap_or_default();
        let time = grid.time_slots().label(key.time).unwrap_or_default();
        let span = event.span(axis).to_string();
        write_record(&mut csv, &[day, time, &event.title, &event.subtitle, &span]);
    }

    csv
}
