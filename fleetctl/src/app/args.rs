//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::logs::LogLevel;
use crate::utils::LONG_VERSION;

/// Interactive client for a device fleet management service
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fleetctl")]
#[command(version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Server address, `host:port` or an http(s) URL [default: localhost:50051]
    #[arg(short, long, value_name = "ADDR")]
    pub server: Option<String>,

    /// JSON settings file; flags override its values
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for the server to accept connections [default: 5]
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<f64>,

    /// Seconds before a single call is abandoned [default: 30]
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<f64>,

    /// Default seconds between `poll-action` checks [default: 2]
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<f64>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the log file as JSON lines
    #[arg(long)]
    pub log_json: bool,
}
