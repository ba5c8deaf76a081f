//! Outbound payload shaping.

use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::relay::error::RelayError;
use crate::relay::request::RelayRequest;

/// How the outbound body is produced from an accepted request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadMode {
    /// Forward the inbound body bytes unchanged.
    #[serde(alias = "relay-raw-body")]
    RawBody,
    /// Discard the inbound body and send a bot `text` message.
    #[default]
    #[serde(alias = "relay-as-text-envelope")]
    TextEnvelope,
}

impl std::fmt::Display for PayloadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadMode::RawBody => write!(f, "raw-body"),
            PayloadMode::TextEnvelope => write!(f, "text-envelope"),
        }
    }
}

/// `{"msgtype":"text","text":{"content": ...}}`
#[derive(Debug, Serialize)]
pub struct TextEnvelope<'a> {
    msgtype: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

impl<'a> TextEnvelope<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            msgtype: "text",
            text: TextContent { content },
        }
    }
}

impl PayloadMode {
    /// Build the outbound body. `raw` is the inbound body `request` was decoded from.
    pub fn build(self, raw: Bytes, request: &RelayRequest) -> Result<Bytes, RelayError> {
        match self {
            PayloadMode::RawBody => Ok(raw),
            PayloadMode::TextEnvelope => serde_json::to_vec(&TextEnvelope::new(&request.msg))
                .map(Bytes::from)
                .map_err(RelayError::PayloadBuild),
        }
    }
}
