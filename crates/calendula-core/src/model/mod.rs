//! Event data model.
//!
//! `MasterEvent` is the stored record, `EventInstance` a concrete occurrence
//! derived from it, `LayoutBox` the placement computed for a timeline view.

mod event;
mod holiday;
mod layout;
mod recurrence;
mod stored;

pub use event::{EventInstance, MasterEvent, SegmentType};
pub use holiday::{Holiday, HolidayTable};
pub use layout::LayoutBox;
pub use recurrence::{Frequency, RecurrenceRule};
pub use stored::{StoredEvent, parse_timestamp};
