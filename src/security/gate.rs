//! The admission gate: one parameterized checker instantiated per surface.
//!
//! # Responsibilities
//! - Submit a request snapshot to the decision service under one bundle
//! - Render denial verdicts into the surface's exact response contract
//! - Log every denial and every service error
//! - Fail open on service errors: the request proceeds as if allowed
//!
//! The two surfaces (general traffic, auth subtree) share this type and
//! differ only in bundle and denial mapping.

use std::time::Instant;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::decision::{DecisionClient, DenialReason, RequestMeta, Verdict};
use crate::observability::metrics;
use crate::security::policy::PolicyBundle;

/// Body format for denial responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialStyle {
    /// Plain-text bodies (general traffic).
    Text,
    /// JSON object bodies (auth subtree).
    Json,
}

/// How one surface renders each denial reason. The `Retry-After` value is
/// part of the response contract and is carried here, not derived from the
/// configured window.
#[derive(Debug, Clone)]
pub struct DenialMapping {
    pub style: DenialStyle,
    pub retry_after_secs: u64,
    pub rate_limited: &'static str,
    pub suspicious: &'static str,
    pub blocked: &'static str,
}

/// Denial contract for traffic outside the auth subtree.
pub static GLOBAL_DENIALS: DenialMapping = DenialMapping {
    style: DenialStyle::Text,
    retry_after_secs: 60,
    rate_limited: "Too Many Requests",
    suspicious: "Suspicious Request Detected",
    blocked: "Access Denied",
};

/// Denial contract for auth subtree reads.
pub static AUTH_READ_DENIALS: DenialMapping = DenialMapping {
    style: DenialStyle::Json,
    retry_after_secs: 900,
    rate_limited: "Too many authentication requests. Please try again later.",
    suspicious: "Suspicious request detected",
    blocked: "Request blocked",
};

/// Denial contract for auth subtree writes.
pub static AUTH_WRITE_DENIALS: DenialMapping = DenialMapping {
    style: DenialStyle::Json,
    retry_after_secs: 900,
    rate_limited: "Too many authentication attempts. Please try again later.",
    suspicious: "Suspicious request detected",
    blocked: "Request blocked",
};

impl DenialMapping {
    /// Render a denial reason into the terminal response for this surface.
    pub fn response(&self, reason: DenialReason) -> Response {
        let retry_after = self.retry_after_secs.to_string();
        match (self.style, reason) {
            (DenialStyle::Text, DenialReason::RateLimit) => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after)],
                self.rate_limited,
            )
                .into_response(),
            (DenialStyle::Text, DenialReason::Shield) => {
                (StatusCode::FORBIDDEN, self.suspicious).into_response()
            }
            (DenialStyle::Text, DenialReason::Bot | DenialReason::Other) => {
                (StatusCode::FORBIDDEN, self.blocked).into_response()
            }
            (DenialStyle::Json, DenialReason::RateLimit) => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after)],
                Json(json!({
                    "error": self.rate_limited,
                    "retryAfter": self.retry_after_secs,
                })),
            )
                .into_response(),
            (DenialStyle::Json, DenialReason::Shield) => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": self.suspicious })),
            )
                .into_response(),
            (DenialStyle::Json, DenialReason::Bot | DenialReason::Other) => {
                (StatusCode::FORBIDDEN, Json(json!({ "error": self.blocked }))).into_response()
            }
        }
    }
}

/// Outcome of one admission check.
pub enum Admission {
    /// Terminal: the denial response to return, nothing downstream runs.
    Denied(Response),
    /// Clean or errored: the request falls through to delegated logic.
    Pass,
}

/// One policy bundle bound to the shared decision client.
#[derive(Debug, Clone)]
pub struct Gate {
    client: DecisionClient,
    bundle: PolicyBundle,
}

impl Gate {
    pub fn new(client: DecisionClient, bundle: PolicyBundle) -> Self {
        Self { client, bundle }
    }

    /// Evaluate a request. Denials short-circuit with the mapped response;
    /// a decision service failure logs a warning and passes (fail open).
    pub async fn admit(&self, meta: &RequestMeta, denials: &DenialMapping) -> Admission {
        let gate = self.bundle.name();
        let started = Instant::now();
        let decision = self.client.protect(meta, &self.bundle).await;
        metrics::record_decision_latency(gate, started);

        match decision.verdict {
            Verdict::Deny(reason) => {
                match reason {
                    DenialReason::Bot => warn!(
                        gate,
                        source = %decision.source,
                        user_agent = %meta.user_agent,
                        "Bot blocked"
                    ),
                    DenialReason::RateLimit => {
                        warn!(gate, source = %decision.source, "Rate limited")
                    }
                    DenialReason::Shield => {
                        warn!(gate, source = %decision.source, "Attack blocked by shield")
                    }
                    DenialReason::Other => {
                        warn!(gate, source = %decision.source, "Request blocked")
                    }
                }
                metrics::record_denied(gate, reason.as_str());
                Admission::Denied(denials.response(reason))
            }
            Verdict::Errored(message) => {
                warn!(
                    gate,
                    source = %decision.source,
                    error = %message,
                    "Decision service error, failing open"
                );
                metrics::record_decision_error(gate);
                Admission::Pass
            }
            Verdict::Allow => {
                metrics::record_allowed(gate);
                Admission::Pass
            }
        }
    }
}
