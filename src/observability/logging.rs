//! Structured logging.
//!
//! Uses `tracing` with a `tracing-subscriber` fmt layer. `RUST_LOG` wins
//! when set; otherwise the configured level applies to this crate and to
//! `tower_http`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directive derived from the configured level.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!(
        "webhook_relay={level},relay_cli={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
