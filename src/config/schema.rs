//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! every field has a default, so an empty file (or no file) yields the
//! stock relay: loopback on port 8081, WeCom bot prefix, text envelope.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::relay::PayloadMode;

/// Prefix every forwarded webhook must start with.
pub const DEFAULT_ALLOWED_PREFIX: &str = "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, route).
    pub listener: ListenerConfig,

    /// Forwarding policy.
    pub relay: ForwardConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,

    /// Path the relay handler is mounted at.
    pub path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
            path: "/send".to_string(),
        }
    }
}

/// Forwarding policy for accepted requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Trusted prefix the caller-supplied webhook must start with.
    pub allowed_prefix: String,

    /// How the outbound body is built.
    pub payload_mode: PayloadMode,

    /// Upper bound on the inbound body, in bytes.
    pub max_body_bytes: usize,

    /// Total timeout for the outbound call. Unset means wait indefinitely.
    pub forward_timeout_secs: Option<u64>,
}

impl ForwardConfig {
    /// Outbound timeout as a `Duration`, if one is configured.
    pub fn forward_timeout(&self) -> Option<Duration> {
        self.forward_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            allowed_prefix: DEFAULT_ALLOWED_PREFIX.to_string(),
            payload_mode: PayloadMode::default(),
            max_body_bytes: 1024 * 1024,
            forward_timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
