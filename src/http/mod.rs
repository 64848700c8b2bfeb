//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, router, layer stack)
//!     → request.rs (request ID)
//!     → middleware/admission.rs (global gate)
//!     → [auth subtree: auth gate handlers] or [catch-all forwarder]
//!     → upstream response streamed back to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
