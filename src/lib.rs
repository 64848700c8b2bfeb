//! Admission gateway library.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 EDGE-GUARD                     │
//!                    │                                                │
//!   Client Request   │  ┌─────────┐   ┌────────────────────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ global admission middleware│  │
//!                    │  │ server  │   └─────────┬──────────────────┘  │
//!                    │  └─────────┘             │                     │
//!                    │            auth subtree? │ other paths         │
//!                    │          ┌───────────────┴───────────┐         │
//!                    │          ▼                           ▼         │
//!                    │  ┌──────────────┐            ┌──────────────┐  │
//!                    │  │  auth gate   │            │ global gate  │  │
//!                    │  │ (15m/20 +    │            │ (bot + 1m/100│  │
//!                    │  │  shield)     │            │  + shield)   │  │
//!                    │  └──────┬───────┘            └──────┬───────┘  │
//!                    │         │ pass                      │ pass     │
//!                    │         ▼                           ▼          │
//!   Client Response  │  ┌──────────────┐            ┌──────────────┐  │
//!   ◀────────────────┼──│ auth backend │            │ app backend  │  │
//!                    │  │  (verbatim)  │            │ (+ CORS hdrs)│  │
//!                    │  └──────────────┘            └──────────────┘  │
//!                    │                                                │
//!                    │  Verdicts come from the external decision      │
//!                    │  service; denials short-circuit, service       │
//!                    │  errors fail open.                             │
//!                    └────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod decision;
pub mod http;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
