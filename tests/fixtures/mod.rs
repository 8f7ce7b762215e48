// Test fixtures - reusable test data
// Provides consistent grids and events across all test files
#![allow(dead_code)]

use timetable_weaver::models::axis::Axis;
use timetable_weaver::models::coordinate::{AxisKind, Coordinate};
use timetable_weaver::models::event::ScheduleEvent;
use timetable_weaver::services::grid::ScheduleGrid;

/// Parses a `"day-time"` key
pub fn key(s: &str) -> Coordinate {
    s.parse().unwrap()
}

pub fn event(title: &str) -> ScheduleEvent {
    ScheduleEvent::new(title).unwrap()
}

/// Workweek of five days with eight hourly slots
pub fn workweek() -> ScheduleGrid {
    let mut grid = ScheduleGrid::new(
        Axis::new(["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
        Axis::new([
            "8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM",
            "3:00 PM",
        ]),
        AxisKind::TimeSlots,
    );
    grid.set_heading_text("Term Timetable");
    grid
}

/// Workweek with a handful of events, one of them merged over three slots
pub fn populated_workweek() -> ScheduleGrid {
    let mut grid = workweek();
    let physics = ScheduleEvent::builder()
        .title("Quantum Physics")
        .subtitle("Room 101")
        .build()
        .unwrap();
    grid.place_with_span(key("0-1"), physics, 3, &[key("0-2"), key("0-3")])
        .unwrap();
    grid.place_or_replace(key("1-0"), event("Advanced Calculus")).unwrap();
    grid.place_or_replace(key("2-5"), event("Literary Analysis")).unwrap();
    grid.place_with_span(key("4-6"), event("Lab"), 2, &[key("4-7")]).unwrap();
    grid
}
