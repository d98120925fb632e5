//! Per-day slicing of multi-day instances.

use calendula_core::model::{EventInstance, SegmentType};
use calendula_core::time::{end_of_day, last_day, start_of_day};
use chrono::NaiveDate;

/// ## Summary
/// Returns the instances to render on `day`.
///
/// All-day and single-day instances pass through unchanged. A multi-day
/// instance becomes a `start`, `middle` or `end` segment clipped to `day`,
/// keeping its id and every other field, or is left out when its span does
/// not reach `day`.
#[must_use]
pub fn segment_for_day(instances: &[EventInstance], day: NaiveDate) -> Vec<EventInstance> {
    instances
        .iter()
        .filter_map(|instance| {
            if instance.is_all_day() || !instance.is_multi_day() {
                return Some(instance.clone());
            }
            let (start, end) = (instance.start(), instance.end());
            let first = start.date();
            let last = last_day(start, end);

            let segment = if day == first {
                instance.segment(start, end_of_day(day), SegmentType::Start)
            } else if day == last {
                instance.segment(start_of_day(day), end, SegmentType::End)
            } else if first < day && day < last {
                instance.segment(start_of_day(day), end_of_day(day), SegmentType::Middle)
            } else {
                return None;
            };
            tracing::trace!(
                id = %instance.id(),
                %day,
                segment_type = ?segment.segment_type,
                "Segmented multi-day instance"
            );
            Some(segment)
        })
        .collect()
}
