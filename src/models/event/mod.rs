// Event module
// Schedule event placed in a grid cell

use serde::{Deserialize, Serialize};

use crate::models::coordinate::AxisKind;

/// Maximum length of an event title.
pub const MAX_TITLE_LENGTH: usize = 50;
/// Maximum length of an event subtitle.
pub const MAX_SUBTITLE_LENGTH: usize = 50;
/// Maximum length of a color token.
pub const MAX_COLOR_LENGTH: usize = 32;
/// Color assigned to events that do not carry one.
pub const DEFAULT_COLOR: &str = "bg-white";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Titled event occupying one cell, or a merged block of cells when its span
/// along the grid's merge axis is greater than one.
///
/// `col_span` counts consecutive time slots and `row_span` counts consecutive
/// days. A grid only uses the field that belongs to its merge axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
}

impl ScheduleEvent {
    /// Create a new event with the required title
    ///
    /// # Examples
    /// ```
    /// use timetable_weaver::models::event::ScheduleEvent;
    ///
    /// let event = ScheduleEvent::new("Quantum Physics").unwrap();
    /// assert_eq!(event.subtitle, "");
    /// ```
    pub fn new(title: impl Into<String>) -> Result<Self, String> {
        Self::builder().title(title).build()
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> ScheduleEventBuilder {
        ScheduleEventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(format!(
                "Event title cannot be longer than {} characters",
                MAX_TITLE_LENGTH
            ));
        }
        if self.subtitle.chars().count() > MAX_SUBTITLE_LENGTH {
            return Err(format!(
                "Event subtitle cannot be longer than {} characters",
                MAX_SUBTITLE_LENGTH
            ));
        }
        validate_color(&self.color)?;

        if self.row_span == Some(0) || self.col_span == Some(0) {
            return Err("Event span must be at least 1".to_string());
        }

        Ok(())
    }

    /// Span along `axis`, 1 when unset.
    pub fn span(&self, axis: AxisKind) -> u32 {
        let span = match axis {
            AxisKind::Days => self.row_span,
            AxisKind::TimeSlots => self.col_span,
        };
        span.unwrap_or(1).max(1)
    }

    /// Set the span along `axis`. A span of 1 is stored as unset.
    pub fn set_span(&mut self, axis: AxisKind, span: u32) {
        let value = if span > 1 { Some(span) } else { None };
        match axis {
            AxisKind::Days => self.row_span = value,
            AxisKind::TimeSlots => self.col_span = value,
        }
    }

    /// Returns a copy whose only span is the one along `axis`.
    pub fn normalized_for(&self, axis: AxisKind) -> Self {
        let span = self.span(axis);
        let mut event = self.clone();
        event.row_span = None;
        event.col_span = None;
        event.set_span(axis, span);
        event
    }
}

fn validate_color(color: &str) -> Result<(), String> {
    if color.is_empty() || color.len() > MAX_COLOR_LENGTH {
        return Err(format!(
            "Color must be between 1 and {} characters",
            MAX_COLOR_LENGTH
        ));
    }
    if !color
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '-' | '_'))
    {
        return Err(format!("Invalid color token '{}'", color));
    }
    Ok(())
}

/// Builder for creating events with optional fields
pub struct ScheduleEventBuilder {
    title: Option<String>,
    subtitle: String,
    color: String,
    row_span: Option<u32>,
    col_span: Option<u32>,
}

impl ScheduleEventBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            subtitle: String::new(),
            color: default_color(),
            row_span: None,
            col_span: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the span along `axis`
    pub fn span(mut self, axis: AxisKind, span: u32) -> Self {
        match axis {
            AxisKind::Days => self.row_span = Some(span),
            AxisKind::TimeSlots => self.col_span = Some(span),
        }
        self
    }

    /// Build the event
    pub fn build(self) -> Result<ScheduleEvent, String> {
        let title = self.title.ok_or("Event title is required")?;

        let event = ScheduleEvent {
            title,
            subtitle: self.subtitle,
            color: self.color,
            row_span: self.row_span,
            col_span: self.col_span,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for ScheduleEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_success() {
        let event = ScheduleEvent::new("Math").unwrap();
        assert_eq!(event.title, "Math");
        assert_eq!(event.color, DEFAULT_COLOR);
        assert!(event.row_span.is_none());
        assert!(event.col_span.is_none());
    }

    #[test]
    fn test_new_event_empty_title() {
        let result = ScheduleEvent::new("");
        assert_eq!(result.unwrap_err(), "Event title cannot be empty");
    }

    #[test]
    fn test_new_event_whitespace_title() {
        let result = ScheduleEvent::new("   ");
        assert_eq!(result.unwrap_err(), "Event title cannot be empty");
    }

    #[test]
    fn test_title_length_limit() {
        assert!(ScheduleEvent::new("a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(ScheduleEvent::new("a".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_title_limit_counts_chars_not_bytes() {
        assert!(ScheduleEvent::new("é".repeat(MAX_TITLE_LENGTH)).is_ok());
    }

    #[test]
    fn test_subtitle_length_limit() {
        let result = ScheduleEvent::builder()
            .title("Math")
            .subtitle("s".repeat(MAX_SUBTITLE_LENGTH + 1))
            .build();
        assert!(result.unwrap_err().contains("subtitle"));
    }

    #[test]
    fn test_builder_missing_title() {
        let result = ScheduleEvent::builder().subtitle("Room 101").build();
        assert_eq!(result.unwrap_err(), "Event title is required");
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = ScheduleEvent::builder()
            .title("Literary Analysis")
            .subtitle("Room 203")
            .color("#FF5733")
            .span(AxisKind::TimeSlots, 2)
            .build()
            .unwrap();

        assert_eq!(event.subtitle, "Room 203");
        assert_eq!(event.color, "#FF5733");
        assert_eq!(event.col_span, Some(2));
        assert_eq!(event.span(AxisKind::TimeSlots), 2);
        assert_eq!(event.span(AxisKind::Days), 1);
    }

    #[test]
    fn test_invalid_color_token() {
        let result = ScheduleEvent::builder().title("x").color("red; drop").build();
        assert!(result.unwrap_err().contains("color"));
    }

    #[test]
    fn test_zero_span_rejected() {
        let result = ScheduleEvent::builder()
            .title("x")
            .span(AxisKind::Days, 0)
            .build();
        assert_eq!(result.unwrap_err(), "Event span must be at least 1");
    }

    #[test]
    fn test_set_span_one_clears_field() {
        let mut event = ScheduleEvent::new("x").unwrap();
        event.set_span(AxisKind::TimeSlots, 4);
        assert_eq!(event.col_span, Some(4));
        event.set_span(AxisKind::TimeSlots, 1);
        assert_eq!(event.col_span, None);
    }

    #[test]
    fn test_normalized_for_drops_off_axis_span() {
        let mut event = ScheduleEvent::new("x").unwrap();
        event.row_span = Some(3);
        event.col_span = Some(2);
        let normalized = event.normalized_for(AxisKind::TimeSlots);
        assert_eq!(normalized.row_span, None);
        assert_eq!(normalized.col_span, Some(2));
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let mut event = ScheduleEvent::new("Math").unwrap();
        event.set_span(AxisKind::TimeSlots, 3);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Math","subtitle":"","color":"bg-white","colSpan":3}"#
        );
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let event: ScheduleEvent = serde_json::from_str(r#"{"title":"Philosophy"}"#).unwrap();
        assert_eq!(event.subtitle, "");
        assert_eq!(event.color, DEFAULT_COLOR);
    }
}
