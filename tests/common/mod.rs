//! Shared utilities for integration testing.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::{header, StatusCode},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use webhook_relay::{HttpServer, RelayConfig, Shutdown};

/// A request as seen by the mock webhook.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path_and_query: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// A running mock webhook endpoint.
pub struct MockWebhook {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

#[allow(dead_code)]
impl MockWebhook {
    /// Trusted prefix pointing at this mock.
    pub fn prefix(&self) -> String {
        format!("http://{}/cgi-bin/webhook/send?key=", self.addr)
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// Start a mock webhook that answers every request with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_webhook(status: u16, body: &'static str) -> MockWebhook {
    start_slow_mock_webhook(status, body, Duration::ZERO).await
}

/// Like `start_mock_webhook`, but waits `delay` before answering.
pub async fn start_slow_mock_webhook(status: u16, body: &'static str, delay: Duration) -> MockWebhook {
    let captured: Arc<Mutex<Vec<Captured>>> = Arc::default();
    let sink = captured.clone();

    let app = Router::new().fallback(move |request: Request<Body>| {
        let sink = sink.clone();
        async move {
            let path_and_query = request
                .uri()
                .path_and_query()
                .map(|p| p.to_string())
                .unwrap_or_default();
            let content_type = request
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body_bytes = to_bytes(request.into_body(), usize::MAX).await.unwrap();
            sink.lock().unwrap().push(Captured {
                path_and_query,
                content_type,
                body: body_bytes,
            });

            tokio::time::sleep(delay).await;
            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockWebhook { addr, captured }
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(mut config: RelayConfig) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown, handle)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
