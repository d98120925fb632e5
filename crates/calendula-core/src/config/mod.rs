use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_VISIBLE_HEIGHT, ENV_PREFIX, SLEEP_TITLE,
};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub expansion: ExpansionConfig,
    pub recurrence: RecurrenceConfig,
    pub aggregate: AggregateConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Candidate occurrences examined per expansion call.
    pub max_iterations: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecurrenceConfig {
    /// Stop a series after `count` occurrences, counted from its anchor.
    pub enforce_count: bool,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            enforce_count: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    pub dedupe_sleep: bool,
    pub sleep_title: String,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            dedupe_sleep: true,
            sleep_title: SLEEP_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum box height in percent of the day.
    pub min_visible_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_visible_height: DEFAULT_MIN_VISIBLE_HEIGHT,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads settings from `calendula.toml` and `CALENDULA_*` environment variables.
    /// Environment variables take precedence over the file; anything unset keeps
    /// its default.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?
            .validated()?)
    }

    /// ## Summary
    /// Builds settings from an in-memory TOML document layered over defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or has mistyped values.
    pub fn from_toml(document: &str) -> Result<Self> {
        Ok(Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?
            .validated()?)
    }

    /// ## Summary
    /// Checks values the expansion and layout paths rely on.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the iteration cap is zero or the
    /// minimum height is not a percentage.
    pub fn validate(&self) -> CoreResult<()> {
        if self.expansion.max_iterations == 0 {
            return Err(CoreError::ConfigError(
                "expansion.max_iterations must be positive".to_string(),
            ));
        }
        let height = self.layout.min_visible_height;
        if !(0.0..=100.0).contains(&height) {
            return Err(CoreError::ConfigError(format!(
                "layout.min_visible_height must be within 0..=100, got {height}"
            )));
        }
        Ok(())
    }

    fn validated(self) -> CoreResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// ## Summary
/// Loads settings from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Settings loaded");
    Ok(settings)
}
