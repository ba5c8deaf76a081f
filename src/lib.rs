//! Webhook relay library.
//!
//! Accepts `{"webhook", "msg"}` over HTTP, checks the webhook against a
//! trusted prefix, forwards one `POST` to it and hands the downstream reply
//! back to the caller untouched.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
