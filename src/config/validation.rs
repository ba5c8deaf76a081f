//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, the mount path and the allow-list prefix
//! - Validate value ranges (body limit > 0, timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("listener.path: `{0}` must start with '/'")]
    InvalidPath(String),

    #[error("relay.allowed_prefix: {0}")]
    InvalidPrefix(String),

    #[error("relay.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("relay.forward_timeout_secs must be greater than zero when set")]
    ZeroTimeout,
}

/// Check a parsed configuration, collecting every violation.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !config.listener.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(config.listener.path.clone()));
    }

    if let Err(reason) = check_prefix(&config.relay.allowed_prefix) {
        errors.push(ValidationError::InvalidPrefix(reason));
    }

    if config.relay.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.relay.forward_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// The prefix must pin the whole authority: an empty or host-only prefix
// (`https://example.com`) also matches `https://example.com.evil.org/...`.
fn check_prefix(prefix: &str) -> Result<(), String> {
    if prefix.is_empty() {
        return Err("must not be empty".to_string());
    }
    let url = Url::parse(prefix).map_err(|e| format!("`{}` is not a URL: {}", prefix, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("scheme `{}` is not http or https", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("`{}` has no host", prefix));
    }
    let after_scheme = prefix.split_once("://").map_or("", |(_, rest)| rest);
    let authority_end = after_scheme.find(|c: char| matches!(c, '/' | '?' | '#'));
    if authority_end.map(|i| &after_scheme[i..=i]) != Some("/") {
        return Err(format!("`{}` must continue with a path after the host", prefix));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_violation() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "localhost".into();
        config.listener.path = "send".into();
        config.relay.allowed_prefix = String::new();
        config.relay.max_body_bytes = 0;
        config.relay.forward_timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidPath("send".into())));
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn prefix_must_be_an_http_url() {
        let mut config = RelayConfig::default();
        config.relay.allowed_prefix = "ftp://files.example.com/".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors.as_slice(), [ValidationError::InvalidPrefix(_)]));

        config.relay.allowed_prefix = "not a url".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn prefix_must_end_the_authority() {
        let mut config = RelayConfig::default();
        for prefix in ["https://example.com", "https://example.com:8443", "https://example.com?key="] {
            config.relay.allowed_prefix = prefix.into();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(errors.as_slice(), [ValidationError::InvalidPrefix(_)]),
                "{prefix} should be rejected"
            );
        }

        for prefix in ["https://example.com/", "http://127.0.0.1:9000/hook?key="] {
            config.relay.allowed_prefix = prefix.into();
            assert!(validate_config(&config).is_ok(), "{prefix} should be accepted");
        }
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = RelayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InvalidAddress { field: "observability.metrics_address", .. }]
        ));
    }
}
