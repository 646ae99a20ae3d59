//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::{FleetError, TransportCode, TransportError};

/// HTTP client for the fleet management service
///
/// Each remote operation is a unary `POST {base_url}/{service}/{method}`
/// carrying a JSON message in both directions.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, FleetError> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a service method
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}/{}", self.base_url, fleet_api::SERVICE_NAME, method)
    }

    /// Invoke a unary method
    pub async fn call<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let url = self.method_url(method);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("{} failed: {} - {}", method, status, body);
            let detail = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(TransportError::new(
                TransportCode::Http(status.as_u16()),
                detail,
            ));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!("{} returned an undecodable body: {}", method, e);
            TransportError::new(TransportCode::Internal, e.to_string())
        })
    }
}
