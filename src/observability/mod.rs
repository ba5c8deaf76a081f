//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handler and middleware produce:
//!     → logging.rs (structured log events, per-request trace spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID appears on every handler log event
//! - The webhook key is masked before it reaches a log line
//! - Metrics are off by default

pub mod logging;
pub mod metrics;
