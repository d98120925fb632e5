//! Recurrence expansion.
//!
//! This module provides calendar-aware advancement of recurrence rules,
//! deterministic occurrence identity, and the expander that combines them
//! with exception dates and the iteration bound.

mod advance;
mod expander;
mod identity;

pub use advance::{first_candidate_index, occurrence_start};
pub use expander::{
    Expansion, ExpansionDiagnostic, ExpansionOptions, RecurrenceExpander, expand,
    expand_with_options,
};
pub use identity::{OccurrenceKey, occurrence_id};
