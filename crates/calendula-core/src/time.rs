//! Calendar-local day and range arithmetic.
//!
//! ## Summary
//! Every timestamp handled by calendula is a wall-clock value in the calendar's
//! local frame. Callers convert from their own zone before handing events over,
//! so "which day is this on" is always `timestamp.date()`.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Calendar-local wall-clock timestamp.
pub type Timestamp = NaiveDateTime;

/// ## Summary
/// Returns `00:00:00.000` on `day`.
#[must_use]
pub fn start_of_day(day: NaiveDate) -> Timestamp {
    day.and_time(NaiveTime::MIN)
}

/// ## Summary
/// Returns `23:59:59.999` on `day`.
#[must_use]
pub fn end_of_day(day: NaiveDate) -> Timestamp {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    day.and_time(last)
}

/// ## Summary
/// Returns the calendar date an interval ending at `end` last occupies.
///
/// `end` is exclusive: an interval that stops exactly at midnight does not
/// spill into the day that midnight opens.
#[must_use]
pub fn last_day(start: Timestamp, end: Timestamp) -> NaiveDate {
    if end > start && end.time() == NaiveTime::MIN {
        end.date().checked_sub_days(Days::new(1)).unwrap_or(end.date())
    } else {
        end.date()
    }
}

/// ## Summary
/// Returns true when `[start, end]` starts and ends on different calendar dates.
#[must_use]
pub fn is_cross_day(start: Timestamp, end: Timestamp) -> bool {
    start.date() != last_day(start, end)
}

/// ## Summary
/// Minutes elapsed since midnight, with sub-minute precision.
#[must_use]
pub fn minutes_from_midnight(ts: Timestamp) -> f64 {
    minutes(ts - start_of_day(ts.date()))
}

/// ## Summary
/// Converts a duration to fractional minutes.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn minutes(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 60_000.0
}

/// Query window handed to expansion and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of range (inclusive).
    pub start: Timestamp,
    /// End of range (inclusive).
    pub end: Timestamp,
}

impl TimeRange {
    /// Creates a time range with start and end.
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// ## Summary
    /// Creates a time range, rejecting a start after the end.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if `start > end`.
    pub fn checked(start: Timestamp, end: Timestamp) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidInput(format!(
                "range start {start} is after range end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering whole days `first..=last`.
    #[must_use]
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// Creates a range covering a single day.
    #[must_use]
    pub fn day(day: NaiveDate) -> Self {
        Self::from_dates(day, day)
    }

    /// Returns true when the start lies after the end.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Returns true when `date` falls on one of the range's calendar days.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    /// ## Summary
    /// Inclusive overlap test between `[start, end]` and the range.
    ///
    /// Touching a boundary counts, and so does an interval that starts on the
    /// range's last day or ends on its first day: a calendar view shows those
    /// on the boundary day even when the exact times miss the window.
    #[must_use]
    pub fn overlaps(&self, start: Timestamp, end: Timestamp) -> bool {
        (start <= self.end && end >= self.start)
            || start.date() == self.end.date()
            || end.date() == self.start.date()
    }
}
