/// Candidate occurrences examined per expansion call before generation is truncated.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Smallest box height, in percent of the day, for near-zero-duration events.
pub const DEFAULT_MIN_VISIBLE_HEIGHT: f64 = 1.0;

/// Title of the sleep-schedule entries that get interval-level deduplication.
pub const SLEEP_TITLE: &str = "Sleep";

/// Id prefix of the all-day instances projected from holidays.
pub const HOLIDAY_ID_PREFIX: &str = "holiday-";

pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "CALENDULA";

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "calendula.toml";
