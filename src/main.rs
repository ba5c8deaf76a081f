//! Webhook relay (v1)
//!
//! ```text
//!   Caller                      webhook-relay                        Webhook
//!     │  POST {webhook, msg}         │                                   │
//!     │─────────────────────────────▶│ method → body → decode            │
//!     │                              │ presence → allow-list → payload   │
//!     │                              │──────── POST application/json ───▶│
//!     │                              │◀─────────── status + body ────────│
//!     │◀──── same status + body ─────│                                   │
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use webhook_relay::config::{parse_config, validate_config, ConfigError, RelayConfig};
use webhook_relay::lifecycle::{signals, Shutdown};
use webhook_relay::observability::{logging, metrics};
use webhook_relay::relay::PayloadMode;
use webhook_relay::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "webhook-relay", version, about = "Relay chat messages to an allow-listed webhook")]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override relay.payload_mode.
    #[arg(long, value_enum)]
    payload_mode: Option<PayloadMode>,

    /// Override relay.forward_timeout_secs.
    #[arg(long)]
    forward_timeout_secs: Option<u64>,
}

fn resolve_config(args: &Args) -> Result<RelayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => parse_config(&std::fs::read_to_string(path)?)?,
        None => RelayConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(mode) = args.payload_mode {
        config.relay.payload_mode = mode;
    }
    if let Some(secs) = args.forward_timeout_secs {
        config.relay.forward_timeout_secs = Some(secs);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init_logging(&config.observability);

    tracing::info!("webhook-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.listener.path,
        allowed_prefix = %config.relay.allowed_prefix,
        payload_mode = %config.relay.payload_mode,
        forward_timeout_secs = ?config.relay.forward_timeout_secs,
        "Configuration loaded"
    );
    if config.relay.forward_timeout_secs.is_none() {
        tracing::warn!("No outbound timeout configured; an unresponsive webhook holds its request open");
    }

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        "Listening on http://{}{}",
        local_addr,
        config.listener.path
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let args = Args::parse_from([
            "webhook-relay",
            "--bind",
            "127.0.0.1:9999",
            "--payload-mode",
            "raw-body",
            "--forward-timeout-secs",
            "3",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
        assert_eq!(config.relay.payload_mode, PayloadMode::RawBody);
        assert_eq!(config.relay.forward_timeout_secs, Some(3));
    }

    #[test]
    fn invalid_override_fails_validation() {
        let args = Args::parse_from(["webhook-relay", "--forward-timeout-secs", "0"]);
        assert!(matches!(resolve_config(&args), Err(ConfigError::Validation(_))));
    }
}
