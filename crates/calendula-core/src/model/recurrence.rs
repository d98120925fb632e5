use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Step unit of a recurrence rule.
///
/// Deserializes leniently: an unrecognised frequency string falls back to
/// `Daily` and logs a warning instead of rejecting the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a frequency name, case-insensitively.
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_else(|| {
            tracing::warn!(frequency = %value, "Unknown recurrence frequency, using daily");
            Self::Daily
        })
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_interval() -> i64 {
    1
}

/// Recurrence rule attached to a master event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Step between occurrences in `frequency` units. Stored as given; see
    /// [`RecurrenceRule::effective_interval`].
    #[serde(default = "default_interval")]
    pub interval: i64,
    /// Exclusive bound: no occurrence starts at or after it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    /// Maximum number of occurrences in the series, original included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RecurrenceRule {
    /// Creates a rule stepping every `1` unit of `frequency`.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            end_date: None,
            count: None,
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the exclusive end date.
    #[must_use]
    pub fn with_end_date(mut self, end_date: Timestamp) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the occurrence count.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// ## Summary
    /// Returns the interval to step by, falling back to `1` for non-positive
    /// or out-of-range values.
    #[must_use]
    pub fn effective_interval(&self) -> u32 {
        match u32::try_from(self.interval) {
            Ok(interval) if interval > 0 => interval,
            _ => {
                tracing::warn!(interval = self.interval, "Invalid recurrence interval, using 1");
                1
            }
        }
    }
}
