//! Projection of holidays onto calendars.

use std::collections::BTreeMap;

use calendula_core::TimeRange;
use calendula_core::constants::HOLIDAY_ID_PREFIX;
use calendula_core::model::{EventInstance, Holiday, HolidayTable, MasterEvent};
use calendula_core::time::{end_of_day, start_of_day};

/// ## Summary
/// Builds the all-day instance showing `holiday` on `calendar_id`.
#[must_use]
pub fn holiday_instance(holiday: &Holiday, calendar_id: &str) -> EventInstance {
    let mut event = MasterEvent::new(
        format!("{HOLIDAY_ID_PREFIX}{}", holiday.id),
        calendar_id,
        holiday.name.clone(),
        start_of_day(holiday.date),
        end_of_day(holiday.date),
    )
    .all_day()
    .with_description(holiday.kind.clone());
    event.is_holiday = true;
    EventInstance::from_master(&event)
}

/// ## Summary
/// Holiday instances in `range` for every calendar with holidays enabled.
///
/// Calendars are visited in id order and holidays in table order, so the
/// output is the same on every call.
#[must_use]
pub fn holiday_instances(
    table: &HolidayTable,
    range: &TimeRange,
    enabled: &BTreeMap<String, bool>,
) -> Vec<EventInstance> {
    enabled
        .iter()
        .filter(|(_, on)| **on)
        .flat_map(|(calendar_id, _)| {
            table
                .for_range(range)
                .map(move |holiday| holiday_instance(holiday, calendar_id))
        })
        .collect()
}
