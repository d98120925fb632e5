//! Merging expanded instances across calendars.

use std::collections::BTreeMap;

use calendula_core::TimeRange;
use calendula_core::config::Settings;
use calendula_core::model::{EventInstance, HolidayTable, MasterEvent, StoredEvent};
use calendula_expand::{ExpansionDiagnostic, ExpansionOptions, expand_with_options};

use crate::dedupe::SleepSchedule;
use crate::holiday::holiday_instances;

/// Result of one aggregation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub instances: Vec<EventInstance>,
    /// Expansion diagnostics, in master order.
    pub diagnostics: Vec<ExpansionDiagnostic>,
    /// Stored records excluded because they could not be converted.
    pub rejected: Vec<String>,
}

/// ## Summary
/// Merges expansions of many masters with holiday instances.
///
/// Holds the settings and the holiday table so one value can serve every
/// view of a session.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    settings: &'a Settings,
    holidays: &'a HolidayTable,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(settings: &'a Settings, holidays: &'a HolidayTable) -> Self {
        Self { settings, holidays }
    }

    /// ## Summary
    /// Expands every master within `range`, adds holiday instances for
    /// calendars that have them enabled, and sorts the result.
    ///
    /// All-day instances come first, then timed ones, each group ascending by
    /// start. Ties keep merge order: masters in the order given, holidays
    /// after them.
    #[must_use]
    pub fn aggregate(
        &self,
        masters: &[MasterEvent],
        range: &TimeRange,
        holidays_enabled: &BTreeMap<String, bool>,
    ) -> Aggregation {
        let options = ExpansionOptions::from(self.settings);
        let mut aggregation = Aggregation::default();

        if range.is_inverted() {
            tracing::warn!(start = %range.start, end = %range.end, "Aggregation over inverted range");
            aggregation
                .diagnostics
                .push(ExpansionDiagnostic::InvertedRange);
            return aggregation;
        }

        let mut instances = Vec::new();
        for master in masters {
            let expansion = expand_with_options(master, range, options);
            instances.extend(expansion.instances);
            aggregation.diagnostics.extend(expansion.diagnostics);
        }
        instances.extend(holiday_instances(self.holidays, range, holidays_enabled));

        let policy = &self.settings.aggregate;
        if policy.dedupe_sleep {
            instances = SleepSchedule::new(&policy.sleep_title).apply(instances);
        }
        // Stable: ties keep merge order.
        instances.sort_by(|a, b| {
            b.is_all_day()
                .cmp(&a.is_all_day())
                .then_with(|| a.start().cmp(&b.start()))
        });
        aggregation.instances = instances;

        tracing::debug!(
            masters = masters.len(),
            instances = aggregation.instances.len(),
            diagnostics = aggregation.diagnostics.len(),
            "Aggregated events"
        );
        aggregation
    }

    /// ## Summary
    /// Converts stored records and aggregates the ones that parse.
    ///
    /// A record whose start or end does not parse is logged, listed in
    /// `rejected` and excluded rather than passed through as an instance,
    /// since a [`calendula_core::Timestamp`] cannot hold an invalid instant.
    /// The rest proceed.
    #[must_use]
    pub fn aggregate_stored(
        &self,
        records: Vec<StoredEvent>,
        range: &TimeRange,
        holidays_enabled: &BTreeMap<String, bool>,
    ) -> Aggregation {
        let mut rejected = Vec::new();
        let masters: Vec<MasterEvent> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match MasterEvent::try_from(record) {
                    Ok(master) => Some(master),
                    Err(err) => {
                        tracing::warn!(error = %err, "Excluding malformed event from aggregation");
                        rejected.push(id);
                        None
                    }
                }
            })
            .collect();

        let mut aggregation = self.aggregate(&masters, range, holidays_enabled);
        aggregation.rejected = rejected;
        aggregation
    }
}

/// ## Summary
/// Aggregates with default settings and returns the sorted instances.
#[must_use]
pub fn aggregate(
    masters: &[MasterEvent],
    range: &TimeRange,
    holidays: &HolidayTable,
    holidays_enabled: &BTreeMap<String, bool>,
) -> Vec<EventInstance> {
    let settings = Settings::default();
    Aggregator::new(&settings, holidays)
        .aggregate(masters, range, holidays_enabled)
        .instances
}
