//! Error types for fleetctl

use std::fmt;

use fleet_api::ParseEnumError;
use thiserror::Error;

/// Main error type for fleetctl
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Could not connect to server at {endpoint}: {reason}")]
    ConnectError { endpoint: String, reason: String },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    InvalidValue(#[from] ParseEnumError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Category of a transport-level fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCode {
    /// Request never reached the service or the connection dropped
    Unavailable,
    /// Per-request timeout elapsed
    DeadlineExceeded,
    /// Response could not be decoded
    Internal,
    /// Service answered with a non-success HTTP status
    Http(u16),
}

impl fmt::Display for TransportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportCode::Unavailable => f.write_str("UNAVAILABLE"),
            TransportCode::DeadlineExceeded => f.write_str("DEADLINE_EXCEEDED"),
            TransportCode::Internal => f.write_str("INTERNAL"),
            TransportCode::Http(status) => write!(f, "HTTP {}", status),
        }
    }
}

/// Connectivity or protocol fault raised by a remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code} - {detail}")]
pub struct TransportError {
    pub code: TransportCode,
    pub detail: String,
}

impl TransportError {
    pub fn new(code: TransportCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::new(TransportCode::Unavailable, detail)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            TransportCode::DeadlineExceeded
        } else if err.is_decode() {
            TransportCode::Internal
        } else if let Some(status) = err.status() {
            TransportCode::Http(status.as_u16())
        } else {
            TransportCode::Unavailable
        };
        Self::new(code, err.to_string())
    }
}
