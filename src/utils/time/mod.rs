// Time utility functions

use chrono::{Duration, NaiveTime};

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Format a time of day the way slot labels are shown, e.g. `8:00 AM`.
pub fn format_slot_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Generate `count` consecutive slot labels starting at `first` (`HH:MM`),
/// `minutes` apart. Labels wrap past midnight, but together they may span
/// at most one day.
pub fn generate_slot_labels(first: &str, minutes: u32, count: usize) -> Result<Vec<String>, String> {
    let start = NaiveTime::parse_from_str(first.trim(), "%H:%M")
        .map_err(|e| format!("Invalid first slot '{}': {}", first, e))?;
    if minutes == 0 {
        return Err("Slot length must be at least one minute".to_string());
    }
    let total = u64::try_from(count)
        .unwrap_or(u64::MAX)
        .saturating_mul(u64::from(minutes));
    if total > MINUTES_PER_DAY {
        return Err(format!(
            "{} slots of {} minutes do not fit in one day",
            count, minutes
        ));
    }

    let step = Duration::minutes(i64::from(minutes));
    let labels = std::iter::successors(Some(start), |t| Some(t.overflowing_add_signed(step).0))
        .take(count)
        .map(format_slot_label)
        .collect();
    Ok(labels)
}
