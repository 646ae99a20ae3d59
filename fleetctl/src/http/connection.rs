//! Connection lifecycle for the fleet management service

use std::fmt;
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, info};
use url::Url;

use crate::errors::FleetError;
use crate::http::client::HttpClient;

/// Delay between readiness probes while waiting for the service
const PROBE_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Address of the remote service
///
/// Accepts `host:port` or a full `http://` / `https://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    address: String,
    url: Url,
}

impl Endpoint {
    pub fn parse(address: &str) -> Result<Self, FleetError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(FleetError::ConfigError("server address is empty".to_string()));
        }

        let raw = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };

        let url = Url::parse(&raw)
            .map_err(|e| FleetError::ConfigError(format!("invalid server address '{}': {}", address, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FleetError::ConfigError(format!(
                "unsupported scheme '{}' in server address '{}'",
                url.scheme(),
                address
            )));
        }
        if url.host_str().is_none() || url.port_or_known_default().is_none() {
            return Err(FleetError::ConfigError(format!(
                "server address '{}' has no host",
                address
            )));
        }

        Ok(Self {
            address: address.to_string(),
            url,
        })
    }

    /// `host:port` used for the readiness probe
    pub fn socket_address(&self) -> String {
        format!(
            "{}:{}",
            self.url.host_str().unwrap_or_default(),
            self.url.port_or_known_default().unwrap_or_default()
        )
    }

    /// Base URL for service calls
    pub fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Exclusive handle on the service connection
///
/// Acquired once at startup; released when dropped, on every exit path.
#[derive(Debug)]
pub struct Connection {
    endpoint: Endpoint,
    client: HttpClient,
}

impl Connection {
    /// Connect and wait for the service to accept connections
    pub async fn open(
        endpoint: Endpoint,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, FleetError> {
        info!("Connecting to {}...", endpoint);
        wait_ready(&endpoint, connect_timeout).await?;

        let client = HttpClient::new(&endpoint.base_url(), request_timeout)?;
        info!("Connected to {}", endpoint);

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Release the connection
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        info!("Connection to {} released", self.endpoint);
    }
}

async fn wait_ready(endpoint: &Endpoint, connect_timeout: Duration) -> Result<(), FleetError> {
    let address = endpoint.socket_address();
    let mut last_error = String::from("no response");

    let probe = async {
        loop {
            match TcpStream::connect(&address).await {
                Ok(_) => return,
                Err(e) => {
                    debug!("Readiness probe to {} failed: {}", address, e);
                    last_error = e.to_string();
                }
            }
            tokio::time::sleep(PROBE_RETRY_DELAY).await;
        }
    };

    let outcome = tokio::time::timeout(connect_timeout, probe).await;
    match outcome {
        Ok(()) => Ok(()),
        Err(_) => Err(FleetError::ConnectError {
            endpoint: endpoint.to_string(),
            reason: format!(
                "not ready within {}s ({})",
                connect_timeout.as_secs_f64(),
                last_error
            ),
        }),
    }
}
