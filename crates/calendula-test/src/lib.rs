//! Calendula - integration test support.
//!
//! Re-exports the workspace crates under one `component` path and provides
//! fixture builders shared by the scenario and property suites.

pub mod component {
    pub use calendula_core::*;

    pub mod expand {
        pub use calendula_expand::*;
    }

    pub mod view {
        pub use calendula_view::*;
    }
}

pub mod fixtures {
    use calendula_core::model::{Frequency, MasterEvent, RecurrenceRule};
    use calendula_core::{TimeRange, Timestamp};
    use chrono::{NaiveDate, NaiveDateTime};

    /// ## Summary
    /// Parses `YYYY-MM-DDTHH:MM` as a calendar-local timestamp.
    ///
    /// ## Errors
    /// Returns an error if the value is not in that format.
    pub fn local(value: &str) -> anyhow::Result<Timestamp> {
        Ok(NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")?)
    }

    /// ## Summary
    /// Parses `YYYY-MM-DD`.
    ///
    /// ## Errors
    /// Returns an error if the value is not a date.
    pub fn date(value: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(value, "%Y-%m-%d")?)
    }

    /// ## Summary
    /// Whole-day window from `first` to `last`.
    ///
    /// ## Errors
    /// Returns an error if either bound is not a date.
    pub fn days(first: &str, last: &str) -> anyhow::Result<TimeRange> {
        Ok(TimeRange::from_dates(date(first)?, date(last)?))
    }

    /// ## Summary
    /// Timed, non-recurring event on the `"personal"` calendar.
    ///
    /// ## Errors
    /// Returns an error if a bound fails to parse.
    pub fn event(id: &str, title: &str, start: &str, end: &str) -> anyhow::Result<MasterEvent> {
        Ok(MasterEvent::new(id, "personal", title, local(start)?, local(end)?))
    }

    /// ## Summary
    /// Recurring event with the given frequency and interval.
    ///
    /// ## Errors
    /// Returns an error if a bound fails to parse.
    pub fn recurring(
        id: &str,
        start: &str,
        end: &str,
        frequency: Frequency,
        interval: i64,
    ) -> anyhow::Result<MasterEvent> {
        Ok(event(id, id, start, end)?
            .with_recurrence(RecurrenceRule::new(frequency).with_interval(interval)))
    }
}
