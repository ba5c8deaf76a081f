//! Outbound delivery to the destination webhook.
//!
//! # Responsibilities
//! - Issue one `POST` with `Content-Type: application/json`
//! - Buffer the downstream response so it can be relayed verbatim
//! - Surface transport failures (DNS, connect, TLS, timeout) as `ForwardError`
//!
//! # Design Decisions
//! - Downstream status codes are data, never errors
//! - No retries; every inbound request maps to exactly one outbound call
//! - The client is pooled by reqwest and shared across requests

use axum::body::Bytes;
use axum::http::{header, StatusCode};
use std::future::Future;
use std::time::Duration;

use crate::relay::request::redact_webhook;

/// Error type for outbound calls.
///
/// Never renders the webhook's `key=` value: it ends up in log lines and in
/// the caller-facing `Forward failed` body.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure reported by the HTTP client.
    #[error("{source} for url ({url})")]
    Http {
        /// Webhook with the key masked.
        url: String,
        /// Client error with its own URL stripped.
        #[source]
        source: reqwest::Error,
    },

    /// Failure reported by a non-reqwest forwarder.
    #[error("{0}")]
    Unreachable(String),
}

impl ForwardError {
    fn http(url: &str, error: reqwest::Error) -> Self {
        ForwardError::Http {
            url: redact_webhook(url),
            source: error.without_url(),
        }
    }
}

/// Buffered downstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downstream {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Something that can deliver a payload to a webhook.
pub trait Forwarder: Clone + Send + Sync + 'static {
    fn forward(
        &self,
        url: &str,
        payload: Bytes,
    ) -> impl Future<Output = Result<Downstream, ForwardError>> + Send;
}

/// Forwarder backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    /// Build a forwarder. `timeout` bounds the whole outbound call when set.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ForwardError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("webhook-relay/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().map_err(ForwardError::Client)?,
        })
    }
}

impl Forwarder for HttpForwarder {
    async fn forward(&self, url: &str, payload: Bytes) -> Result<Downstream, ForwardError> {
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| ForwardError::http(url, e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ForwardError::http(url, e))?;
        Ok(Downstream { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::RelayError;

    fn closed_webhook(key: &str) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/cgi-bin/webhook/send?key={}", addr, key)
    }

    #[tokio::test]
    async fn connect_failure_hides_the_key() {
        let forwarder = HttpForwarder::new(None).unwrap();
        let url = closed_webhook("SUPERSECRET");

        let err = forwarder
            .forward(&url, Bytes::from_static(b"{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, ForwardError::Http { .. }));

        let shown = RelayError::from(err).to_string();
        assert!(shown.starts_with("Forward failed: "), "{shown}");
        assert!(!shown.contains("SUPERSECRET"), "{shown}");
        assert!(shown.contains("key=***"), "{shown}");
    }

    #[tokio::test]
    async fn debug_output_hides_the_key() {
        let forwarder = HttpForwarder::new(None).unwrap();
        let err = forwarder
            .forward(&closed_webhook("SUPERSECRET"), Bytes::new())
            .await
            .unwrap_err();
        assert!(!format!("{err:?}").contains("SUPERSECRET"));
    }
}
