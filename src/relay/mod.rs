//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound body
//!     → request.rs (decode, presence + allow-list checks)
//!     → payload.rs (raw bytes or text envelope)
//!     → forwarder.rs (one outbound POST)
//!     → Downstream (status + bytes, relayed verbatim)
//! ```
//!
//! Failures at any step become a `RelayError` (error.rs), which renders as a
//! plain-text HTTP error.

pub mod error;
pub mod forwarder;
pub mod payload;
pub mod request;

pub use error::RelayError;
pub use forwarder::{Downstream, ForwardError, Forwarder, HttpForwarder};
pub use payload::{PayloadMode, TextEnvelope};
pub use request::{redact_webhook, RelayRequest};
