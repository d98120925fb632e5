//! Calendar-aware advancement of recurrence anchors.
//!
//! Occurrence `k` of a series is always computed from the anchor, never from
//! occurrence `k - 1`. Month and year steps clamp the day-of-month to the last
//! day of a short month, and because each step starts from the anchor the
//! clamp never carries over: a Jan 31 monthly series runs Jan 31, Feb 29,
//! Mar 31, Apr 30.

use calendula_core::Timestamp;
use calendula_core::model::Frequency;
use chrono::{Datelike, Days, NaiveDate};

/// ## Summary
/// Returns the start of occurrence `index` of a series anchored at `anchor`.
///
/// Returns `None` when the result is outside chrono's representable range.
#[must_use]
pub fn occurrence_start(
    anchor: Timestamp,
    frequency: Frequency,
    interval: u32,
    index: u64,
) -> Option<Timestamp> {
    let steps = index.checked_mul(u64::from(interval))?;
    match frequency {
        Frequency::Daily => anchor.checked_add_days(Days::new(steps)),
        Frequency::Weekly => anchor.checked_add_days(Days::new(steps.checked_mul(7)?)),
        Frequency::Monthly => add_months(anchor, steps),
        Frequency::Yearly => add_months(anchor, steps.checked_mul(12)?),
    }
}

/// ## Summary
/// Returns an occurrence index whose start is no later than `earliest`, and
/// as close to it as cheap arithmetic allows.
///
/// Expansion starts scanning here instead of at the anchor, so a long-running
/// series queried years after it began does not spend its iteration budget
/// on occurrences that cannot reach the window. Returns `0` when `earliest`
/// precedes the anchor.
#[must_use]
pub fn first_candidate_index(
    anchor: Timestamp,
    frequency: Frequency,
    interval: u32,
    earliest: Timestamp,
) -> u64 {
    if earliest <= anchor {
        return 0;
    }
    let (from, to) = (anchor.date(), earliest.date());
    let elapsed_units = match frequency {
        Frequency::Daily => (to - from).num_days(),
        Frequency::Weekly => (to - from).num_days() / 7,
        Frequency::Monthly => month_ordinal(to) - month_ordinal(from),
        Frequency::Yearly => i64::from(to.year() - from.year()),
    };
    // One step back absorbs day-of-month clamping and time-of-day offsets.
    u64::try_from(elapsed_units / i64::from(interval) - 1).unwrap_or(0)
}

fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Helper to add months to a timestamp, clamping the day to the target month.
fn add_months(ts: Timestamp, months: u64) -> Option<Timestamp> {
    let total = i64::from(ts.month0()).checked_add(i64::try_from(months).ok()?)?;
    let year = i32::try_from(i64::from(ts.year()).checked_add(total / 12)?).ok()?;
    let month = u32::try_from(total % 12).ok()? + 1;

    // Handle day overflow (e.g., Jan 31 + 1 month = Feb 28/29)
    let day = ts.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(ts.time()))
}

/// Returns the number of days in a month.
fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1))
        .map_or(31, |d| d.pred_opt().map_or(31, |p| p.day()))
}
