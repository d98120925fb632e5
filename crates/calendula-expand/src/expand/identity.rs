//! Deterministic identity for generated occurrences.

use calendula_core::Timestamp;
use chrono::NaiveDate;
use uuid::Uuid;

/// Namespace for occurrence ids. Changing it changes every generated id.
const OCCURRENCE_NAMESPACE: Uuid = Uuid::from_u128(0x8f1c_52d0_4a7e_4c3b_9e61_d2a7_3b5f_0c94);

/// ## Summary
/// Returns the id of the occurrence of `master_id` starting at `start`.
///
/// The id is a UUID v5 over the master id and the occurrence start, so the
/// same occurrence resolves to the same id on every expansion.
#[must_use]
pub fn occurrence_id(master_id: &str, start: Timestamp) -> String {
    let name = format!("{master_id}:{}", start.format("%Y-%m-%dT%H:%M:%S%.f"));
    Uuid::new_v5(&OCCURRENCE_NAMESPACE, name.as_bytes()).to_string()
}

/// De-duplication key of an occurrence within one expansion call.
///
/// Cross-day series are keyed by start date alone: two candidates landing on
/// the same day at slightly different times are the same occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccurrenceKey {
    Date(NaiveDate),
    Instant(Timestamp),
}

impl OccurrenceKey {
    #[must_use]
    pub fn for_start(start: Timestamp, cross_day: bool) -> Self {
        if cross_day {
            Self::Date(start.date())
        } else {
            Self::Instant(start)
        }
    }
}
