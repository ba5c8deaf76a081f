//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign x-request-id)
//!     → response.rs (CORS headers on every reply)
//!     → server.rs (method policy, relay pipeline)
//!     → response.rs (mirror downstream status + body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
