use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeRange;

/// Public holiday supplied by a static or configured source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Holiday {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            kind: kind.into(),
        }
    }
}

/// ## Summary
/// Holiday table handed to the aggregator.
///
/// Built explicitly by the caller, so tests can pass fixtures and deployments
/// can load multi-year tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayTable {
    holidays: Vec<Holiday>,
}

impl HolidayTable {
    #[must_use]
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    /// Adds a holiday.
    #[must_use]
    pub fn with_holiday(mut self, holiday: Holiday) -> Self {
        self.holidays.push(holiday);
        self
    }

    /// Holidays whose date lies on one of the range's days, in table order.
    pub fn for_range<'a>(&'a self, range: &'a TimeRange) -> impl Iterator<Item = &'a Holiday> {
        self.holidays
            .iter()
            .filter(move |holiday| range.contains_date(holiday.date))
    }
}

impl FromIterator<Holiday> for HolidayTable {
    fn from_iter<T: IntoIterator<Item = Holiday>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
