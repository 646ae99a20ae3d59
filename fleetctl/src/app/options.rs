//! Application configuration options

use std::time::Duration;

use crate::app::args::Args;
use crate::errors::FleetError;
use crate::logs::LogOptions;
use crate::storage::settings::{Settings, DEFAULT_SERVER};
use crate::tracker;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Server address as given by the user
    pub server: String,

    /// Readiness ceiling when connecting
    pub connect_timeout: Duration,

    /// Per-call timeout
    pub request_timeout: Duration,

    /// Default `poll-action` options
    pub tracker: tracker::Options,

    /// Logging options
    pub logs: LogOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            tracker: tracker::Options::default(),
            logs: LogOptions::default(),
        }
    }
}

impl AppOptions {
    /// Layer command-line flags over the settings file values
    pub fn resolve(args: Args, settings: Settings) -> Result<Self, FleetError> {
        let connect_timeout = positive_secs(
            "connect timeout",
            args.connect_timeout.unwrap_or(settings.connect_timeout_secs),
        )?;
        let request_timeout = positive_secs(
            "request timeout",
            args.request_timeout.unwrap_or(settings.request_timeout_secs),
        )?;
        let poll_interval = args.poll_interval.unwrap_or(settings.poll_interval_secs);
        let tracker = tracker::Options::with_interval_secs(poll_interval).map_err(|_| {
            FleetError::ConfigError(format!(
                "poll interval must be a positive number of seconds, got {}",
                poll_interval
            ))
        })?;

        Ok(Self {
            server: args.server.unwrap_or(settings.server),
            connect_timeout,
            request_timeout,
            tracker,
            logs: LogOptions {
                log_level: args.log_level.unwrap_or(settings.log_level),
                log_file: args.log_file.or(settings.log_file),
                json_format: args.log_json || settings.log_json,
                ..Default::default()
            },
        })
    }
}

fn positive_secs(what: &str, secs: f64) -> Result<Duration, FleetError> {
    let invalid = || {
        FleetError::ConfigError(format!(
            "{} must be a positive number of seconds, got {}",
            what, secs
        ))
    };
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}
