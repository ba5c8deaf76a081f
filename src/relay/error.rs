use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::relay::forwarder::ForwardError;

/// Every way a relay request can end without a downstream reply.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Read body failed")]
    BodyRead(#[source] axum::Error),

    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Missing webhook or msg")]
    MissingField,

    #[error("Invalid webhook URL")]
    UntrustedWebhook,

    #[error("Build payload failed: {0}")]
    PayloadBuild(#[source] serde_json::Error),

    #[error("Forward failed: {0}")]
    Forward(#[from] ForwardError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::BodyRead(_)
            | RelayError::InvalidJson(_)
            | RelayError::MissingField
            | RelayError::UntrustedWebhook => StatusCode::BAD_REQUEST,
            RelayError::PayloadBuild(_) | RelayError::Forward(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::BodyRead(_) => "body_read_failure",
            RelayError::InvalidJson(_) => "invalid_json",
            RelayError::MissingField => "missing_field",
            RelayError::UntrustedWebhook => "untrusted_webhook",
            RelayError::PayloadBuild(_) => "payload_build_failure",
            RelayError::Forward(_) => "forward_failure",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
