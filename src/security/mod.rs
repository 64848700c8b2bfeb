//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → policy.rs (which rule bundle applies)
//!     → gate.rs (decision service verdict → deny early or pass)
//!     → cors.rs (cross-origin headers on passed-through responses)
//! ```
//!
//! # Design Decisions
//! - One gate type, two instances: global and auth differ only in bundle
//!   and denial mapping
//! - Denials short-circuit; decision service failures fail open
//! - Denial statuses, bodies and Retry-After values are fixed contracts

pub mod cors;
pub mod gate;
pub mod policy;

pub use gate::{Admission, Gate, AUTH_READ_DENIALS, AUTH_WRITE_DENIALS, GLOBAL_DENIALS};
pub use policy::PolicyBundle;
