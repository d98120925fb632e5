//! Timeline geometry for one day.
//!
//! Boxes are percentages of the day's height and of the column strip. Timed
//! instances that overlap, directly or through a chain of overlaps, share a
//! group and split its width into equal columns in start order.

use std::collections::HashMap;

use calendula_core::Timestamp;
use calendula_core::config::LayoutConfig;
use calendula_core::constants::MINUTES_PER_DAY;
use calendula_core::model::{EventInstance, LayoutBox};
use calendula_core::time::{end_of_day, minutes, minutes_from_midnight, start_of_day};
use chrono::NaiveDate;

/// An instance with its span clipped to the day.
struct Clipped<'a> {
    instance: &'a EventInstance,
    start: Timestamp,
    end: Timestamp,
}

/// ## Summary
/// Lays out the timed instances of `day` with the default minimum height.
#[must_use]
pub fn layout(instances: &[EventInstance], day: NaiveDate) -> HashMap<String, LayoutBox> {
    layout_with(instances, day, &LayoutConfig::default())
}

/// ## Summary
/// Lays out the timed instances of `day`.
///
/// All-day instances and instances with nothing inside the day get no box.
/// Boxes are keyed by instance id. A repeated id is logged and keeps the
/// box placed last in start order.
#[must_use]
pub fn layout_with(
    instances: &[EventInstance],
    day: NaiveDate,
    config: &LayoutConfig,
) -> HashMap<String, LayoutBox> {
    let (day_start, day_end) = (start_of_day(day), end_of_day(day));

    let mut clipped: Vec<Clipped<'_>> = instances
        .iter()
        .filter(|instance| !instance.is_all_day())
        .filter_map(|instance| {
            let (start, end) = (instance.start(), instance.end());
            // Ending exactly at midnight belongs to the day before.
            if end < day_start || start > day_end || (start < day_start && end == day_start) {
                return None;
            }
            let start = start.max(day_start);
            let end = end.min(day_end);
            (end >= start).then_some(Clipped { instance, start, end })
        })
        .collect();
    // Stable: equal starts keep input order for column assignment.
    clipped.sort_by_key(|c| c.start);

    let mut boxes = HashMap::with_capacity(clipped.len());
    for group in overlap_groups(&clipped) {
        #[expect(clippy::cast_precision_loss)]
        let width = 100.0 / group.len() as f64;
        for (column, item) in group.iter().enumerate() {
            #[expect(clippy::cast_precision_loss)]
            let left = width * column as f64;
            let top = minutes_from_midnight(item.start) / MINUTES_PER_DAY * 100.0;
            let height =
                (minutes(item.end - item.start) / MINUTES_PER_DAY * 100.0).max(config.min_visible_height);
            let placed = LayoutBox {
                top,
                height,
                left,
                width,
                overlapping_events: group.len(),
            };
            if let Some(previous) = boxes.insert(item.instance.id().to_string(), placed) {
                tracing::warn!(
                    id = item.instance.id(),
                    ?previous,
                    "Duplicate instance id in day layout, keeping the later box"
                );
            }
        }
    }

    tracing::debug!(%day, boxes = boxes.len(), "Computed day layout");
    boxes
}

/// Splits start-sorted instances into chained-overlap groups.
fn overlap_groups<'s, 'a>(sorted: &'s [Clipped<'a>]) -> Vec<&'s [Clipped<'a>]> {
    let mut groups = Vec::new();
    let mut group_start = 0;
    let mut group_end: Option<Timestamp> = None;

    for (index, item) in sorted.iter().enumerate() {
        match group_end {
            Some(end) if item.start < end => group_end = Some(end.max(item.end)),
            Some(_) => {
                groups.push(&sorted[group_start..index]);
                group_start = index;
                group_end = Some(item.end);
            }
            None => group_end = Some(item.end),
        }
    }
    if group_start < sorted.len() {
        groups.push(&sorted[group_start..]);
    }
    groups
}
