// Settings module
// User configuration stored as TOML

use serde::{Deserialize, Serialize};

use crate::models::coordinate::AxisKind;
use crate::models::schedule::{DEFAULT_DAYS, DEFAULT_HEADING};
use crate::utils::time::generate_slot_labels;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub heading_text: String,
    pub days: Vec<String>,
    /// Explicit time slot labels. When unset, labels are generated from
    /// `first_slot`, `slot_minutes` and `slot_count`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<Vec<String>>,
    /// Start of the first generated slot, `HH:MM` 24-hour.
    pub first_slot: String,
    pub slot_minutes: u32,
    pub slot_count: usize,
    pub merge_axis: AxisKind,
    pub share_base_url: String,
    pub seed_sample_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            heading_text: DEFAULT_HEADING.to_string(),
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            time_slots: None,
            first_slot: "08:00".to_string(),
            slot_minutes: 60,
            slot_count: 10,
            merge_axis: AxisKind::TimeSlots,
            share_base_url: "http://localhost:3000/".to_string(),
            seed_sample_events: true,
        }
    }
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.days.is_empty() {
            return Err("At least one day is required".to_string());
        }
        if self.slot_minutes == 0 {
            return Err("Slot length must be at least one minute".to_string());
        }
        if self.share_base_url.trim().is_empty() {
            return Err("Share base URL cannot be empty".to_string());
        }
        self.time_slot_labels().map(|_| ())
    }

    /// Resolved time slot labels.
    pub fn time_slot_labels(&self) -> Result<Vec<String>, String> {
        match &self.time_slots {
            Some(labels) => Ok(labels.clone()),
            None => generate_slot_labels(&self.first_slot, self.slot_minutes, self.slot_count),
        }
    }
}
