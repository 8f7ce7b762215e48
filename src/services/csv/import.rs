use crate::models::axis::validate_label;
use crate::models::coordinate::{AxisKind, Coordinate};
use crate::models::event::ScheduleEvent;
use crate::services::grid::ScheduleGrid;

use super::utils::{parse_records, Record};
use super::CsvError;

struct Columns {
    day: usize,
    time: usize,
    title: usize,
    subtitle: Option<usize>,
    span: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, CsvError> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| CsvError::MissingColumn(name.to_string()));
        Ok(Self {
            day: require("Day")?,
            time: require("Time")?,
            title: require("Title")?,
            subtitle: find("Subtitle"),
            span: find("ColSpan"),
        })
    }
}

struct Row {
    line: usize,
    day: String,
    time: String,
    event: ScheduleEvent,
}

/// Parse `text` and swap the result into `grid`.
///
/// Rows are placed onto a staged copy of the grid, so `grid` is only
/// touched once every row has been accepted.
pub(super) fn into_grid(grid: &mut ScheduleGrid, text: &str) -> Result<usize, CsvError> {
    let mut records = parse_records(text)?.into_iter();
    let header = records
        .next()
        .ok_or_else(|| CsvError::MissingColumn("Day".to_string()))?;
    let columns = Columns::from_header(&header.fields)?;

    let rows = records
        .map(|record| parse_row(&columns, record, grid.merge_axis()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut staged = grid.clone();
    for row in &rows {
        for (kind, label) in [(AxisKind::Days, &row.day), (AxisKind::TimeSlots, &row.time)] {
            if staged.axis(kind).position(label).is_none() {
                staged
                    .add_axis_entry(kind, label)
                    .map_err(|e| invalid(row.line, e.to_string()))?;
            }
        }
    }
    for key in staged.events().keys().copied().collect::<Vec<_>>() {
        staged.remove(key);
    }

    for row in rows {
        let day = staged.days().position(&row.day);
        let time = staged.time_slots().position(&row.time);
        let (Some(day), Some(time)) = (day, time) else {
            return Err(invalid(row.line, "label could not be resolved".to_string()));
        };
        let key = Coordinate::new(day, time);
        if staged.event(key).is_some() {
            return Err(invalid(row.line, format!("duplicate entry for {} {}", row.day, row.time)));
        }
        staged
            .place_or_replace(key, row.event)
            .map_err(|e| invalid(row.line, e.to_string()))?;
    }

    let count = staged.events().len();
    *grid = staged;
    log::info!("Imported {} events from CSV", count);
    Ok(count)
}

fn parse_row(
    columns: &Columns,
    record: Record,
    merge_axis: AxisKind,
) -> Result<Row, CsvError> {
    let line = record.line;
    let field = |index: usize| record.fields.get(index).map(String::as_str).unwrap_or_default();

    let day = field(columns.day).trim();
    let time = field(columns.time).trim();
    for label in [day, time] {
        validate_label(label).map_err(|e| invalid(line, e))?;
    }

    let span = match columns.span.map(|index| field(index).trim()).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|&span| span >= 1)
            .ok_or_else(|| invalid(line, format!("ColSpan '{}' is not a positive number", raw)))?,
        None => 1,
    };

    let event = ScheduleEvent::builder()
        .title(field(columns.title))
        .subtitle(columns.subtitle.map(field).unwrap_or_default())
        .span(merge_axis, span)
        .build()
        .map_err(|e| invalid(line, e))?;

    Ok(Row {
        line,
        day: day.to_string(),
        time: time.to_string(),
        event,
    })
}

fn invalid(line: usize, reason: String) -> CsvError {
    CsvError::InvalidRow { line, reason }
}
