//! Telemetry settings shared by hosts embedding the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Default `EnvFilter` directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Part of the engine that logs under its own target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    EnumString,
    EnumIter,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogArea {
    /// Query walks and scans.
    Engine,
    /// Individual rules declining or skipping nodes.
    Rules,
    /// Applying actions to trees.
    Action,
    /// Rule registration.
    Registry,
}

/// Verbosity for one [`LogArea`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogLevel {
    /// Nothing.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages.
    Info,
    /// Traversal summaries.
    Debug,
    /// Per-rule decisions.
    Trace,
}

/// Filter and format for the tracing subscriber.
///
/// `log_filter` is a full `EnvFilter` directive; `areas` then raises or
/// lowers individual parts of the engine:
///
/// ```
/// use mender_core::{LogArea, LogLevel, TelemetryConfig};
///
/// let config: TelemetryConfig =
///     serde_json::from_str(r#"{ "log_filter": "warn", "areas": { "rules": "trace" } }"#)?;
/// assert_eq!(config.area_level(LogArea::Rules), Some(LogLevel::Trace));
/// assert_eq!(config.area_level(LogArea::Engine), None);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    log_filter: String,
    log_format: LogFormat,
    areas: BTreeMap<LogArea, LogLevel>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: String::from(DEFAULT_LOG_FILTER),
            log_format: LogFormat::default(),
            areas: BTreeMap::new(),
        }
    }
}

impl TelemetryConfig {
    /// Creates a configuration from a filter directive and a format.
    #[must_use]
    pub fn new(log_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.into(),
            log_format,
            areas: BTreeMap::new(),
        }
    }

    /// Sets the verbosity of one area, overriding `log_filter` for it.
    #[must_use]
    pub fn with_area(mut self, area: LogArea, level: LogLevel) -> Self {
        self.areas.insert(area, level);
        self
    }

    /// Returns the `EnvFilter` directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the verbosity configured for `area`, if any.
    #[must_use]
    pub fn area_level(&self, area: LogArea) -> Option<LogLevel> {
        self.areas.get(&area).copied()
    }

    /// Returns every area override in area order.
    pub fn areas(&self) -> impl Iterator<Item = (LogArea, LogLevel)> + '_ {
        self.areas.iter().map(|(area, level)| (*area, *level))
    }
}
