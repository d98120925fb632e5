//! Calendar view assembly for calendula.
//!
//! Aggregates expanded instances across calendars, slices multi-day
//! instances per day, and lays out a day's timed instances in overlap
//! columns.

pub mod aggregate;
pub mod day;
pub mod dedupe;
pub mod holiday;
pub mod layout;
pub mod segment;

pub use aggregate::{Aggregation, Aggregator, aggregate};
pub use day::DayPlan;
pub use dedupe::{SleepSchedule, dedupe_by_exact_interval};
pub use holiday::{holiday_instance, holiday_instances};
pub use layout::{layout, layout_with};
pub use segment::segment_for_day;
