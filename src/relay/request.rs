//! Inbound relay request and its checks.

use serde::{Deserialize, Deserializer};

use crate::relay::error::RelayError;

/// Body of an inbound `POST`.
///
/// Absent and `null` fields, as well as a bare `null` body, decode as empty
/// strings so that they fail the presence check rather than the decode step.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RelayRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub webhook: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub msg: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RelayRequest {
    /// Decode a raw body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice::<Option<Self>>(body)
            .map(Option::unwrap_or_default)
            .map_err(RelayError::InvalidJson)
    }

    /// Presence and allow-list checks, in that order.
    pub fn validate(&self, allowed_prefix: &str) -> Result<(), RelayError> {
        if self.webhook.is_empty() || self.msg.is_empty() {
            return Err(RelayError::MissingField);
        }
        if !self.webhook.starts_with(allowed_prefix) {
            return Err(RelayError::UntrustedWebhook);
        }
        Ok(())
    }
}

/// Mask the value of a `key=` query parameter for logging.
pub fn redact_webhook(webhook: &str) -> String {
    let Some(query_start) = webhook.find('?') else {
        return webhook.to_string();
    };
    let (base, query) = webhook.split_at(query_start + 1);
    let masked: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", value)) if !value.is_empty() => "key=***".to_string(),
            _ => pair.to_string(),
        })
        .collect();
    format!("{}{}", base, masked.join("&"))
}
