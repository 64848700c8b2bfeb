//! Decision service consumer.
//!
//! # Data Flow
//! ```text
//! RequestMeta + PolicyBundle
//!     → client.rs (POST /v1/decide, bearer auth, bounded by timeout)
//!     → types.rs (wire response → tagged Verdict)
//!     → Decision consumed once by the gate
//! ```
//!
//! # Design Decisions
//! - Every failure mode maps to Verdict::Errored; the gate fails open
//! - No retries, no failover: one call per request, reported once
//! - Rate-limit counters and bot classification live in the service

pub mod client;
pub mod types;

pub use client::DecisionClient;
pub use types::{Decision, DenialReason, RequestMeta, Verdict};
