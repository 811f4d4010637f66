//! Log targets and subscriber installation for hosts embedding the engine.
//!
//! Every log line the engine emits carries one of the targets returned by
//! [`target`], so a host can filter the engine's output per [`LogArea`]
//! without knowing module paths. [`initialise`] installs a stderr subscriber
//! built from a [`TelemetryConfig`]; hosts with their own subscriber can
//! call [`build_filter`] and compose the filter themselves.

use std::io::{self, IsTerminal};

use mender_core::{LogArea, LogFormat, TelemetryConfig};
use once_cell::sync::OnceCell;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Subscriber, debug};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt;

/// Format of the subscriber installed by the first successful call to
/// [`initialise`].
static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

pub(crate) const ENGINE_TARGET: &str = target(LogArea::Engine);
pub(crate) const RULES_TARGET: &str = target(LogArea::Rules);
pub(crate) const ACTION_TARGET: &str = target(LogArea::Action);
pub(crate) const REGISTRY_TARGET: &str = target(LogArea::Registry);

/// Returns the log target for an area, such as `mender::engine`.
#[must_use]
pub const fn target(area: LogArea) -> &'static str {
    match area {
        LogArea::Engine => concat!(env!("CARGO_PKG_NAME"), "::engine"),
        LogArea::Rules => concat!(env!("CARGO_PKG_NAME"), "::rules"),
        LogArea::Action => concat!(env!("CARGO_PKG_NAME"), "::action"),
        LogArea::Registry => concat!(env!("CARGO_PKG_NAME"), "::registry"),
    }
}

/// Proof that a subscriber is installed, and which format it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Returns the format of the installed subscriber. Later calls to
    /// [`initialise`] report the first call's format.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global tracing subscriber on the first successful call.
///
/// Later calls install nothing and return a handle describing the existing
/// subscriber. A failed first call may be retried.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid filter directive and
/// [`TelemetryError::Subscriber`] when a subscriber from outside this
/// module is already installed.
pub fn initialise(config: &TelemetryConfig) -> Result<TelemetryHandle, TelemetryError> {
    let format = INSTALLED.get_or_try_init(|| {
        install_subscriber(config)?;
        debug!(
            target: ENGINE_TARGET,
            format = %config.log_format(),
            filter = config.log_filter(),
            "telemetry installed"
        );
        Ok::<_, TelemetryError>(config.log_format())
    })?;
    Ok(TelemetryHandle { format: *format })
}

/// Builds the filter for a configuration without installing anything:
/// `log_filter` first, then one directive per configured area.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid filter directive.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let mut filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    for (area, level) in config.areas() {
        let directive: Directive = format!("{}={level}", target(area))
            .parse()
            .map_err(|error: tracing_subscriber::filter::ParseError| {
                TelemetryError::Filter(error.to_string())
            })?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

fn install_subscriber(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_timer(fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format() {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
