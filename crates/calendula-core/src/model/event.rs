use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use super::recurrence::RecurrenceRule;
use crate::time::{self, Timestamp};

/// Stored, user-authored event record.
///
/// The core never mutates a master event; instances are derived from it on
/// every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterEvent {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: Timestamp,
    /// Exclusive upper bound. Historical records may carry `end < start`.
    pub end: Timestamp,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    /// Occurrence start dates suppressed from the series.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exception_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub is_holiday: bool,
}

impl MasterEvent {
    /// Creates a timed, non-recurring event.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        calendar_id: impl Into<String>,
        title: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            calendar_id: calendar_id.into(),
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            all_day: false,
            color: None,
            recurrence: None,
            exception_dates: BTreeSet::new(),
            is_holiday: false,
        }
    }

    /// Marks the event as all-day.
    #[must_use]
    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// Sets the recurrence rule.
    #[must_use]
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    /// Adds an exception date.
    #[must_use]
    pub fn with_exception_date(mut self, date: NaiveDate) -> Self {
        self.exception_dates.insert(date);
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn is_cross_day(&self) -> bool {
        time::is_cross_day(self.start, self.end)
    }

    #[must_use]
    pub fn is_excepted(&self, date: NaiveDate) -> bool {
        self.exception_dates.contains(&date)
    }
}

/// Which slice of a multi-day instance a segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Start,
    Middle,
    End,
}

/// Concrete, renderable occurrence of a master event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInstance {
    /// Master fields; `id`, `start` and `end` are the occurrence's own.
    #[serde(flatten)]
    pub event: MasterEvent,
    #[serde(default)]
    pub is_recurrence_instance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_event_id: Option<String>,
    #[serde(default)]
    pub is_segment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_type: Option<SegmentType>,
}

impl EventInstance {
    /// ## Summary
    /// Wraps a master event as its own, unexpanded occurrence.
    #[must_use]
    pub fn from_master(master: &MasterEvent) -> Self {
        Self {
            event: master.clone(),
            is_recurrence_instance: false,
            original_event_id: None,
            is_segment: false,
            segment_type: None,
        }
    }

    /// ## Summary
    /// Builds a generated occurrence of `master` at `start`, keeping the
    /// master's duration.
    #[must_use]
    pub fn occurrence(master: &MasterEvent, id: String, start: Timestamp) -> Self {
        let mut event = master.clone();
        event.id = id;
        event.end = start + master.duration();
        event.start = start;
        Self {
            event,
            is_recurrence_instance: true,
            original_event_id: Some(master.id.clone()),
            is_segment: false,
            segment_type: None,
        }
    }

    /// ## Summary
    /// Returns a copy clipped to `[start, end]` and tagged as a segment.
    #[must_use]
    pub fn segment(&self, start: Timestamp, end: Timestamp, kind: SegmentType) -> Self {
        let mut segment = self.clone();
        segment.event.start = start;
        segment.event.end = end;
        segment.is_segment = true;
        segment.segment_type = Some(kind);
        segment
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.event.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.event.title
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.event.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.event.end
    }

    #[must_use]
    pub fn is_all_day(&self) -> bool {
        self.event.all_day
    }

    #[must_use]
    pub fn is_holiday(&self) -> bool {
        self.event.is_holiday
    }

    /// Returns true when the instance starts and ends on different dates.
    #[must_use]
    pub fn is_multi_day(&self) -> bool {
        time::is_cross_day(self.start(), self.end())
    }

    /// Id of the master event this instance came from.
    #[must_use]
    pub fn master_id(&self) -> &str {
        self.original_event_id.as_deref().unwrap_or(&self.event.id)
    }
}
