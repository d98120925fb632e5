//! Named de-duplication policies.
//!
//! Aggregation never removes instances by title in general. Policies here
//! are opt-in and scoped by an explicit predicate.

use std::collections::HashSet;

use calendula_core::Timestamp;
use calendula_core::model::EventInstance;

/// ## Summary
/// Drops instances that match `predicate` and repeat the exact `(start, end)`
/// of an earlier matching instance. Everything else passes through in order.
#[must_use]
pub fn dedupe_by_exact_interval<P>(instances: Vec<EventInstance>, predicate: P) -> Vec<EventInstance>
where
    P: Fn(&EventInstance) -> bool,
{
    let mut seen: HashSet<(Timestamp, Timestamp)> = HashSet::new();
    instances
        .into_iter()
        .filter(|instance| {
            if !predicate(instance) {
                return true;
            }
            let fresh = seen.insert((instance.start(), instance.end()));
            if !fresh {
                tracing::debug!(
                    id = %instance.id(),
                    title = %instance.title(),
                    "Dropping duplicate interval"
                );
            }
            fresh
        })
        .collect()
}

/// Sleep-schedule entries: the sleep feature can write the same block more
/// than once, so these are deduplicated by interval.
#[derive(Debug, Clone, Copy)]
pub struct SleepSchedule<'a> {
    title: &'a str,
}

impl<'a> SleepSchedule<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    #[must_use]
    pub fn matches(&self, instance: &EventInstance) -> bool {
        instance.title() == self.title
    }

    /// Applies the policy to an instance list.
    #[must_use]
    pub fn apply(&self, instances: Vec<EventInstance>) -> Vec<EventInstance> {
        dedupe_by_exact_interval(instances, |instance| self.matches(instance))
    }
}
