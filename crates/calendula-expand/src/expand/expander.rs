//! Recurrence expansion algorithm.
//!
//! Produces the original occurrence (when it falls in the window) followed by
//! generated occurrences in ascending start order. Data-quality problems never
//! fail the call: they are reported as diagnostics and logged.

use std::collections::HashSet;

use calendula_core::config::Settings;
use calendula_core::constants::DEFAULT_MAX_ITERATIONS;
use calendula_core::model::{EventInstance, MasterEvent, RecurrenceRule};
use calendula_core::{TimeRange, Timestamp};
use chrono::TimeDelta;
use thiserror::Error;

use super::advance::{first_candidate_index, occurrence_start};
use super::identity::{OccurrenceKey, occurrence_id};

/// Options controlling a single expansion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Candidate occurrences examined before generation is truncated.
    pub max_iterations: usize,
    /// Honour `RecurrenceRule::count` as a cap on the series length.
    pub enforce_count: bool,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            enforce_count: true,
        }
    }
}

impl From<&Settings> for ExpansionOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_iterations: settings.expansion.max_iterations,
            enforce_count: settings.recurrence.enforce_count,
        }
    }
}

/// Non-fatal condition met while expanding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionDiagnostic {
    /// The query window starts after it ends; nothing was expanded.
    #[error("query range starts after it ends")]
    InvertedRange,
    /// The event ends before it starts; it was passed through unexpanded.
    #[error("event '{event_id}' ends before it starts, skipped expansion")]
    InvertedInterval { event_id: String },
    /// Generation stopped after examining `cap` candidates.
    #[error("event '{event_id}' truncated after {cap} candidates")]
    IterationCapReached { event_id: String, cap: usize },
    /// Advancing the series left the representable date range.
    #[error("event '{event_id}' advanced past the representable date range")]
    ArithmeticOverflow { event_id: String },
}

/// Result of expanding one master event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub instances: Vec<EventInstance>,
    pub diagnostics: Vec<ExpansionDiagnostic>,
}

impl Expansion {
    fn report(&mut self, diagnostic: ExpansionDiagnostic) {
        tracing::warn!(%diagnostic, "Expansion diagnostic");
        self.diagnostics.push(diagnostic);
    }
}

/// ## Summary
/// Expands one master event into its occurrences within a window.
pub struct RecurrenceExpander<'a> {
    master: &'a MasterEvent,
    options: ExpansionOptions,
}

impl<'a> RecurrenceExpander<'a> {
    /// Creates a new recurrence expander.
    #[must_use]
    pub fn new(master: &'a MasterEvent, options: ExpansionOptions) -> Self {
        Self { master, options }
    }

    /// ## Summary
    /// Expands the master event within `range`.
    ///
    /// - Non-recurring events come back as themselves when they overlap.
    /// - Inverted windows yield nothing; inverted events are passed through.
    /// - Exception dates suppress occurrences by start date.
    /// - Generation stops at the window end, the rule's end date, the rule's
    ///   count, or the iteration cap, whichever comes first.
    #[must_use]
    pub fn expand(&self, range: &TimeRange) -> Expansion {
        let master = self.master;
        let mut expansion = Expansion::default();

        if range.is_inverted() {
            expansion.report(ExpansionDiagnostic::InvertedRange);
            return expansion;
        }

        if master.end < master.start {
            expansion.report(ExpansionDiagnostic::InvertedInterval {
                event_id: master.id.clone(),
            });
            if range.overlaps(master.end, master.start) {
                expansion.instances.push(EventInstance::from_master(master));
            }
            return expansion;
        }

        let Some(rule) = &master.recurrence else {
            if range.overlaps(master.start, master.end) {
                expansion.instances.push(EventInstance::from_master(master));
            }
            return expansion;
        };

        self.expand_series(rule, range, &mut expansion);

        tracing::debug!(
            event_id = %master.id,
            frequency = %rule.frequency,
            instances = expansion.instances.len(),
            "Expanded recurring event"
        );
        expansion
    }

    fn expand_series(&self, rule: &RecurrenceRule, range: &TimeRange, expansion: &mut Expansion) {
        let master = self.master;
        let cross_day = master.is_cross_day();
        let duration = master.duration();
        let interval = rule.effective_interval();
        let mut seen = HashSet::new();

        let count_limit = rule
            .count
            .filter(|_| self.options.enforce_count)
            .map(u64::from);

        // The original is index 0 of the series.
        seen.insert(OccurrenceKey::for_start(master.start, cross_day));
        if count_limit.is_none_or(|limit| limit > 0)
            && range.overlaps(master.start, master.end)
            && !master.is_excepted(master.start.date())
        {
            expansion.instances.push(EventInstance::from_master(master));
        }
        let earliest = earliest_relevant_start(range, duration);
        let mut index =
            first_candidate_index(master.start, rule.frequency, interval, earliest).max(1);
        let mut iterations = 0;

        loop {
            if count_limit.is_some_and(|limit| index >= limit) {
                break;
            }
            let Some(start) = occurrence_start(master.start, rule.frequency, interval, index)
            else {
                expansion.report(ExpansionDiagnostic::ArithmeticOverflow {
                    event_id: master.id.clone(),
                });
                break;
            };
            if start >= range.end || rule.end_date.is_some_and(|end_date| start >= end_date) {
                break;
            }
            if iterations >= self.options.max_iterations {
                expansion.report(ExpansionDiagnostic::IterationCapReached {
                    event_id: master.id.clone(),
                    cap: self.options.max_iterations,
                });
                break;
            }
            iterations += 1;
            index += 1;

            if master.is_excepted(start.date()) {
                tracing::trace!(event_id = %master.id, %start, "Occurrence suppressed by exception date");
                continue;
            }
            if !seen.insert(OccurrenceKey::for_start(start, cross_day)) {
                tracing::trace!(event_id = %master.id, %start, "Duplicate occurrence skipped");
                continue;
            }
            let Some(end) = start.checked_add_signed(duration) else {
                expansion.report(ExpansionDiagnostic::ArithmeticOverflow {
                    event_id: master.id.clone(),
                });
                break;
            };
            if range.overlaps(start, end) {
                let id = occurrence_id(&master.id, start);
                expansion
                    .instances
                    .push(EventInstance::occurrence(master, id, start));
            }
        }
    }
}

/// Earliest occurrence start that could still reach into `range`, with a
/// day of slack for the same-day boundary rule.
fn earliest_relevant_start(range: &TimeRange, duration: TimeDelta) -> Timestamp {
    calendula_core::time::start_of_day(range.start.date())
        .checked_sub_signed(duration + TimeDelta::days(1))
        .unwrap_or(Timestamp::MIN)
}

/// ## Summary
/// Expands `event` within `range` using default options.
#[must_use]
pub fn expand(event: &MasterEvent, range: &TimeRange) -> Vec<EventInstance> {
    expand_with_options(event, range, ExpansionOptions::default()).instances
}

/// ## Summary
/// Expands `event` within `range`, returning instances and diagnostics.
#[must_use]
pub fn expand_with_options(
    event: &MasterEvent,
    range: &TimeRange,
    options: ExpansionOptions,
) -> Expansion {
    RecurrenceExpander::new(event, options).expand(range)
}
