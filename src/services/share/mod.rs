//! Share links.
//!
//! A schedule is shared as `?data=<token>` where the token is the codec
//! encoding of a [`ScheduleState`]. Loading a link never fails: anything
//! unreadable falls back to the defaults and is reported as a [`Notice`].

use crate::models::coordinate::Coordinate;
use crate::models::schedule::{PartialState, ScheduleState};
use crate::services::codec::{self, DecodeError};
use crate::services::grid::ScheduleGrid;

/// Query parameter carrying the token.
pub const DATA_PARAM: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message for the user about how a shared schedule was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub grid: ScheduleGrid,
    pub notice: Option<Notice>,
    /// Keys from the token that could not be placed on the grid.
    pub dropped: Vec<Coordinate>,
}

/// Build `{base}?data={token}` for `state`.
///
/// A base that already carries a query gets the parameter appended with `&`.
/// A `#fragment` on the base is moved after the query.
pub fn share_url(base: &str, state: &ScheduleState) -> Result<String, serde_json::Error> {
    let token = codec::encode(state)?;
    let (base, fragment) = match base.trim().split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (base.trim(), None),
    };
    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };

    let mut url = format!(
        "{}{}{}={}",
        base,
        separator,
        DATA_PARAM,
        urlencoding::encode(&token)
    );
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    Ok(url)
}

/// Pull the token out of a full URL, a `?`-prefixed query or a bare query.
///
/// Returns `None` when the input has no non-empty `data` parameter.
pub fn token_from_query(input: &str) -> Option<String> {
    let input = input.trim();
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None if input.contains('=') => input,
        None => return None,
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == DATA_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// The token inside `input`, which may be a link or the token itself.
pub fn resolve_token(input: &str) -> String {
    token_from_query(input).unwrap_or_else(|| input.trim().to_string())
}

/// Decode a token into a state whose fields may each be missing.
pub fn decode_state(token: &str) -> Result<PartialState, DecodeError> {
    codec::decode(token)
}

/// Restore a shared schedule on top of `defaults`.
///
/// Fields missing from the token keep their default values. A token that
/// cannot be decoded leaves `defaults` untouched and yields an error notice.
pub fn load(defaults: ScheduleGrid, token: Option<&str>) -> LoadOutcome {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return LoadOutcome {
            grid: defaults,
            notice: None,
            dropped: Vec::new(),
        };
    };

    let partial = match decode_state(token) {
        Ok(partial) => partial,
        Err(e) => {
            log::warn!("Failed to load shared schedule: {}", e);
            return LoadOutcome {
                grid: defaults,
                notice: Some(Notice::error(
                    "Error loading settings",
                    "Could not load the shared settings from the URL.",
                )),
                dropped: Vec::new(),
            };
        }
    };

    if partial.is_empty() {
        return LoadOutcome {
            grid: defaults,
            notice: None,
            dropped: Vec::new(),
        };
    }

    let mut grid = defaults;
    let state = partial.merged_over(grid.snapshot());
    let dropped = grid.replace_all(state);

    let mut description = "A shared schedule has been loaded from the URL.".to_string();
    if !dropped.is_empty() {
        description.push_str(&format!(
            " {} event(s) did not fit the grid and were skipped.",
            dropped.len()
        ));
    }

    LoadOutcome {
        grid,
        notice: Some(Notice::info("Shared Settings Loaded", description)),
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::axis::Axis;
    use crate::models::coordinate::AxisKind;
    use crate::models::event::ScheduleEvent;
    use crate::models::schedule::ScheduleData;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn defaults() -> ScheduleGrid {
        let mut grid = ScheduleGrid::new(
            Axis::new(["Mon", "Tue"]),
            Axis::new(["8", "9", "10"]),
            AxisKind::TimeSlots,
        );
        grid.set_heading_text("Default");
        grid.place_or_replace(Coordinate::new(0, 0), ScheduleEvent::new("Seed").unwrap())
            .unwrap();
        grid
    }

    #[test_case("http://localhost:3000/", "http://localhost:3000/?data=" ; "plain base")]
    #[test_case("https://x.test/app?lang=en", "https://x.test/app?lang=en&data=" ; "base with query")]
    #[test_case("https://x.test/?", "https://x.test/?data=" ; "dangling question mark")]
    #[test_case("https://x.test/app#week", "https://x.test/app?data=" ; "base with fragment")]
    fn test_share_url_prefix(base: &str, prefix: &str) {
        let url = share_url(base, &defaults().snapshot()).unwrap();
        assert!(url.starts_with(prefix), "{}", url);
    }

    #[test]
    fn test_share_url_roundtrip() {
        let state = defaults().snapshot();
        let url = share_url("https://x.test/?lang=en", &state).unwrap();

        let token = token_from_query(&url).unwrap();
        let decoded: ScheduleState = codec::decode(&token).unwrap();

        assert_eq!(decoded, state);
    }

    #[test]
    fn test_share_url_keeps_fragment_after_query() {
        let state = defaults().snapshot();
        let url = share_url("https://x.test/app?lang=en#week", &state).unwrap();

        assert!(url.ends_with("#week"), "{}", url);
        let token = token_from_query(&url).unwrap();
        let decoded: ScheduleState = codec::decode(&token).unwrap();
        assert_eq!(decoded, state);
    }

    #[test_case("https://x.test/?data=abc", Some("abc") ; "full url")]
    #[test_case("?lang=en&data=abc#top", Some("abc") ; "prefixed query with fragment")]
    #[test_case("data=a%2Db", Some("a-b") ; "percent encoded")]
    #[test_case("https://x.test/?lang=en", None ; "no data param")]
    #[test_case("https://x.test/?data=", None ; "empty value")]
    #[test_case("abc", None ; "bare token")]
    fn test_token_from_query(input: &str, expected: Option<&str>) {
        assert_eq!(token_from_query(input).as_deref(), expected);
    }

    #[test]
    fn test_resolve_token_accepts_bare_token() {
        assert_eq!(resolve_token("  abc_-1 \n"), "abc_-1");
        assert_eq!(resolve_token("http://h/?data=xyz"), "xyz");
    }

    #[test]
    fn test_load_without_token_keeps_defaults() {
        let outcome = load(defaults(), None);
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.grid.snapshot(), defaults().snapshot());
    }

    #[test]
    fn test_load_full_state() {
        let mut schedule = ScheduleData::new();
        schedule.insert(Coordinate::new(0, 2), ScheduleEvent::new("Shared").unwrap());
        let state = ScheduleState {
            schedule,
            days: vec!["Sat".into()],
            time_slots: vec!["7".into(), "8".into(), "9".into()],
            heading_text: "Weekend".into(),
        };
        let token = codec::encode(&state).unwrap();

        let outcome = load(defaults(), Some(&token));

        assert_eq!(outcome.grid.snapshot(), state);
        let notice = outcome.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.title, "Shared Settings Loaded");
    }

    #[test]
    fn test_load_partial_state_keeps_missing_fields() {
        let token = codec::encode(&json!({ "headingText": "Only heading" })).unwrap();

        let outcome = load(defaults(), Some(&token));

        let snapshot = outcome.grid.snapshot();
        assert_eq!(snapshot.heading_text, "Only heading");
        assert_eq!(snapshot.days, vec!["Mon", "Tue"]);
        assert_eq!(snapshot.schedule.len(), 1);
    }

    #[test]
    fn test_load_reports_dropped_events() {
        let token = codec::encode(&json!({
            "schedule": { "0-0": { "title": "Kept" }, "9-9": { "title": "Lost" } }
        }))
        .unwrap();

        let outcome = load(defaults(), Some(&token));

        assert_eq!(outcome.dropped, vec![Coordinate::new(9, 9)]);
        assert!(outcome.notice.unwrap().description.contains("1 event(s)"));
    }

    #[test_case("not a token!" ; "bad characters")]
    #[test_case("AQ" ; "truncated stream")]
    #[test_case("eyJkYXlzIjpbIk1vbiJdfQ" ; "legacy plain base64")]
    fn test_load_malformed_token_falls_back(token: &str) {
        let outcome = load(defaults(), Some(token));

        assert_eq!(outcome.grid.snapshot(), defaults().snapshot());
        let notice = outcome.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Error loading settings");
    }

    #[test]
    fn test_load_empty_object_is_silent() {
        let token = codec::encode(&json!({})).unwrap();
        let outcome = load(defaults(), Some(&token));
        assert!(outcome.notice.is_none());
    }
}
