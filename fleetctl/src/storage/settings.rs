//! Settings file management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::FleetError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// Client settings
///
/// Every field is optional in the file; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Server address, `host:port` or an http(s) URL
    #[serde(default = "default_server")]
    pub server: String,

    /// Readiness ceiling when connecting
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: f64,

    /// Per-call timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: f64,

    /// Default delay between `poll-action` checks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: f64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Optional log file
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

pub const DEFAULT_SERVER: &str = "localhost:50051";

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_connect_timeout() -> f64 {
    5.0
}

fn default_request_timeout() -> f64 {
    30.0
}

fn default_poll_interval() -> f64 {
    2.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: default_server(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            poll_interval_secs: default_poll_interval(),
            log_level: LogLevel::default(),
            log_file: None,
            log_json: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, which must exist
    pub async fn load(file: &File) -> Result<Self, FleetError> {
        if !file.exists().await {
            return Err(FleetError::ConfigError(format!(
                "settings file '{}' not found",
                file.path().display()
            )));
        }
        debug!("Loading settings from {}", file.path().display());
        file.read_json::<Settings>().await.map_err(|e| {
            FleetError::ConfigError(format!(
                "unable to read settings file '{}': {}",
                file.path().display(),
                e
            ))
        })
    }
}
