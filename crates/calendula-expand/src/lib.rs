//! Recurrence expansion for calendula master events.
//!
//! Turns a stored master event and a query window into the concrete,
//! de-duplicated occurrences that fall inside it.

pub mod expand;

pub use expand::{
    Expansion, ExpansionDiagnostic, ExpansionOptions, RecurrenceExpander, expand,
    expand_with_options,
};
