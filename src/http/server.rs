//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create the Axum Router with the relay route
//! - Wire up middleware (request ID, CORS headers, tracing)
//! - Bind server to listener and serve until shutdown
//! - Validate, shape and forward each request, relaying the downstream reply

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ForwardConfig, RelayConfig};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{cors_layers, preflight, relay_reply};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::relay::{redact_webhook, ForwardError, Forwarder, HttpForwarder, RelayError, RelayRequest};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState<F> {
    pub relay: Arc<ForwardConfig>,
    pub forwarder: F,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server that forwards with a pooled reqwest client.
    pub fn new(config: RelayConfig) -> Result<Self, ForwardError> {
        let forwarder = HttpForwarder::new(config.relay.forward_timeout())?;
        Ok(Self::with_forwarder(config, forwarder))
    }

    /// Create a server around a specific forwarder.
    ///
    /// `config` must already have passed validation.
    pub fn with_forwarder<F: Forwarder>(config: RelayConfig, forwarder: F) -> Self {
        let router = build_router(&config, forwarder);
        Self { router, config }
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.listener.path,
            payload_mode = %self.config.relay.payload_mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router<F: Forwarder>(config: &RelayConfig, forwarder: F) -> Router {
    let state = AppState {
        relay: Arc::new(config.relay.clone()),
        forwarder,
    };

    let mut router = Router::new()
        .route(&config.listener.path, any(relay_handler::<F>))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    for layer in cors_layers() {
        router = router.layer(layer);
    }

    router
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}

/// Relay handler. Owns the method policy, so it is routed for every method.
async fn relay_handler<F: Forwarder>(
    State(state): State<AppState<F>>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers());
    let method = request.method().clone();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        "Relay request received"
    );

    if method == Method::OPTIONS {
        metrics::record_request("preflight", 200, start_time);
        return preflight();
    }

    let result = if method == Method::POST {
        relay(&state, &request_id, request.into_body()).await
    } else {
        Err(RelayError::MethodNotAllowed)
    };

    match result {
        Ok(response) => {
            metrics::record_request("relayed", response.status().as_u16(), start_time);
            response
        }
        Err(err) => {
            if matches!(err, RelayError::Forward(_)) {
                tracing::error!(request_id = %request_id, error = %err, "Forward failed");
            } else {
                tracing::warn!(
                    request_id = %request_id,
                    reason = err.kind(),
                    error = %err,
                    "Relay request rejected"
                );
            }
            metrics::record_request(err.kind(), err.status().as_u16(), start_time);
            err.into_response()
        }
    }
}

async fn relay<F: Forwarder>(
    state: &AppState<F>,
    request_id: &str,
    body: Body,
) -> Result<Response, RelayError> {
    let raw = axum::body::to_bytes(body, state.relay.max_body_bytes)
        .await
        .map_err(RelayError::BodyRead)?;

    let request = RelayRequest::from_slice(&raw)?;
    let webhook = redact_webhook(&request.webhook);

    tracing::debug!(
        request_id = %request_id,
        webhook = %webhook,
        msg_len = request.msg.len(),
        payload_mode = %state.relay.payload_mode,
        "Preparing to forward"
    );

    request.validate(&state.relay.allowed_prefix)?;

    let payload = state.relay.payload_mode.build(raw, &request)?;
    let downstream = state.forwarder.forward(&request.webhook, payload).await?;

    tracing::info!(
        request_id = %request_id,
        webhook = %webhook,
        status = downstream.status.as_u16(),
        response_bytes = downstream.body.len(),
        "Relayed to webhook"
    );

    Ok(relay_reply(downstream))
}
