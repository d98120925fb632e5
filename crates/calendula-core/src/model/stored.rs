//! Raw records as handed over by the storage collaborator.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::event::MasterEvent;
use super::recurrence::RecurrenceRule;
use crate::error::{CoreError, CoreResult};
use crate::time::{self, Timestamp};

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Event record with timestamps still in their stored string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
    #[serde(default)]
    pub exception_dates: Vec<String>,
    #[serde(default)]
    pub is_holiday: bool,
}

/// ## Summary
/// Parses a stored timestamp into calendar-local wall-clock time.
///
/// Accepts RFC 3339 (the offset is dropped, keeping the wall-clock reading),
/// offset-less local date-times, and bare `YYYY-MM-DD` dates (midnight).
///
/// Returns `None` when no format matches.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(time::start_of_day)
        })
}

fn parse_field(id: &str, field: &'static str, value: &str) -> CoreResult<Timestamp> {
    parse_timestamp(value).ok_or_else(|| CoreError::MalformedEvent {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

impl TryFrom<StoredEvent> for MasterEvent {
    type Error = CoreError;

    /// ## Summary
    /// Converts a stored record into a master event.
    ///
    /// Unparseable exception dates are dropped with a warning; they only ever
    /// suppress occurrences, so losing one is not worth rejecting the event.
    ///
    /// ## Errors
    /// Returns `CoreError::MalformedEvent` if `start` or `end` cannot be parsed.
    fn try_from(stored: StoredEvent) -> CoreResult<Self> {
        let start = parse_field(&stored.id, "start", &stored.start)?;
        let end = parse_field(&stored.id, "end", &stored.end)?;

        let exception_dates: BTreeSet<NaiveDate> = stored
            .exception_dates
            .iter()
            .filter_map(|raw| match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(err) => {
                    tracing::warn!(
                        event_id = %stored.id,
                        exception_date = %raw,
                        error = %err,
                        "Dropping unparseable exception date"
                    );
                    None
                }
            })
            .collect();

        Ok(Self {
            id: stored.id,
            calendar_id: stored.calendar_id,
            title: stored.title,
            description: stored.description,
            location: stored.location,
            start,
            end,
            all_day: stored.all_day,
            color: stored.color,
            recurrence: stored.recurrence,
            exception_dates,
            is_holiday: stored.is_holiday,
        })
    }
}
