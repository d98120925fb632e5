//! Everything a single-day view needs, in one value.

use std::collections::HashMap;

use calendula_core::config::Settings;
use calendula_core::model::{EventInstance, LayoutBox};
use calendula_core::time::last_day;
use chrono::NaiveDate;
use serde::Serialize;

use crate::layout::layout_with;
use crate::segment::segment_for_day;

/// ## Summary
/// The all-day strip, the timed instances and their boxes for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: NaiveDate,
    pub all_day: Vec<EventInstance>,
    pub timed: Vec<EventInstance>,
    pub boxes: HashMap<String, LayoutBox>,
}

impl DayPlan {
    /// ## Summary
    /// Segments aggregated `instances` for `day` and lays out the timed ones.
    ///
    /// Instances that do not touch `day` are dropped, so a whole range's
    /// aggregation can be passed in for each of its days.
    #[must_use]
    pub fn build(instances: &[EventInstance], day: NaiveDate, settings: &Settings) -> Self {
        let (all_day, timed): (Vec<_>, Vec<_>) = segment_for_day(instances, day)
            .into_iter()
            .filter(|instance| {
                let first = instance.start().date();
                first <= day && day <= last_day(instance.start(), instance.end()).max(first)
            })
            .partition(EventInstance::is_all_day);

        let boxes = layout_with(&timed, day, &settings.layout);
        Self {
            day,
            all_day,
            timed,
            boxes,
        }
    }
}
