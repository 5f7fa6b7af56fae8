//! HTTP transport helper for building fetch closures.
//!
//! [`HttpTransport`] wraps a shared [`reqwest::Client`] and maps one GET
//! request to the [`TransportError`] taxonomy the [`Fetcher`](crate::Fetcher)
//! retries on: connection failures, non-success statuses, and undecodable
//! bodies. The transport itself imposes no deadline — the per-attempt
//! timeout lives in the fetcher so one shared client serves any retry
//! configuration.

use reqwest::Client;
use serde_json::Value;

use crate::error::TransportError;

/// Shared HTTP client for upstream GET-JSON calls.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client.
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Create a transport over an existing client (shared pool, custom TLS
    /// or proxy settings).
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Perform one GET request and decode the JSON body.
    ///
    /// Non-2xx statuses become [`TransportError::Status`] with the response
    /// body as the message; the status code is not inspected further —
    /// whether to retry is the fetcher's call.
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Value, TransportError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}
