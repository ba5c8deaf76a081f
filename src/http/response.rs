//! Reply construction.
//!
//! # Responsibilities
//! - Relay the downstream status and body verbatim
//! - Fix the relayed content type to `application/json`
//! - Answer CORS preflight
//! - Provide the CORS header layers applied to every response
//!
//! # Design Decisions
//! - CORS headers are set by middleware so error replies carry them too
//! - Downstream headers other than the status are not copied

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::relay::Downstream;

pub const ALLOW_ORIGIN: HeaderValue = HeaderValue::from_static("*");
pub const ALLOW_METHODS: HeaderValue = HeaderValue::from_static("POST, OPTIONS");
pub const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type");

/// The three permissive CORS header layers, outermost last.
pub fn cors_layers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
        SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

/// Empty 200 reply to an `OPTIONS` request.
pub fn preflight() -> Response {
    StatusCode::OK.into_response()
}

/// Mirror a downstream response to the caller.
pub fn relay_reply(downstream: Downstream) -> Response {
    (
        downstream.status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(downstream.body),
    )
        .into_response()
}
