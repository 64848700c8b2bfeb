//! Decision service types: the request snapshot submitted for evaluation,
//! the wire protocol, and the verdict domain model.

use std::net::IpAddr;

use axum::http::{header, Method, Request, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::security::policy::RuleSpec;

/// The request attributes the gate submits for evaluation. A read-only
/// snapshot; the framework keeps ownership of the request itself.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub source: IpAddr,
    pub method: Method,
    pub path: String,
    pub user_agent: String,
}

impl RequestMeta {
    /// Snapshot the evaluated attributes of an inbound request.
    pub fn from_request<B>(source: IpAddr, request: &Request<B>) -> Self {
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Self {
            source,
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            user_agent,
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    Bot,
    RateLimit,
    Shield,
    /// Denied, but for none of the recognized reasons.
    Other,
}

impl DenialReason {
    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::RateLimit => "rate_limit",
            Self::Shield => "shield",
            Self::Other => "other",
        }
    }
}

/// Outcome of one evaluation. Exactly one arm holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(DenialReason),
    /// The check itself failed; the verdict is unknown.
    Errored(String),
}

/// A fresh per-request decision: the verdict plus the source address it
/// was computed for.
#[derive(Debug, Clone)]
pub struct Decision {
    pub verdict: Verdict,
    pub source: IpAddr,
}

/// Errors from the decision service call. All of them resolve to
/// `Verdict::Errored` at the gate boundary.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decision service returned status {0}")]
    Status(StatusCode),

    #[error("invalid decision endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Body of `POST /v1/decide`.
#[derive(Debug, Serialize)]
pub struct DecideRequest<'a> {
    pub source: String,
    pub method: &'a str,
    pub path: &'a str,
    pub user_agent: &'a str,
    pub rules: &'a [RuleSpec],
}

impl<'a> DecideRequest<'a> {
    pub fn new(meta: &'a RequestMeta, rules: &'a [RuleSpec]) -> Self {
        Self {
            source: meta.source.to_string(),
            method: meta.method.as_str(),
            path: &meta.path,
            user_agent: &meta.user_agent,
            rules,
        }
    }
}

/// Body of the decide response.
#[derive(Debug, Deserialize)]
pub struct DecideResponse {
    pub conclusion: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DecideResponse {
    /// Map the wire conclusion onto the verdict enum. Unknown deny reasons
    /// become `Other`; unknown conclusions mean the verdict is unknown.
    pub fn into_verdict(self) -> Verdict {
        match self.conclusion.as_str() {
            "allow" => Verdict::Allow,
            "deny" => Verdict::Deny(match self.reason.as_deref() {
                Some("bot") => DenialReason::Bot,
                Some("rate_limit") => DenialReason::RateLimit,
                Some("shield") => DenialReason::Shield,
                _ => DenialReason::Other,
            }),
            "error" => Verdict::Errored(
                self.message
                    .unwrap_or_else(|| "decision service reported an error".to_string()),
            ),
            other => Verdict::Errored(format!("unrecognized conclusion '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn decide(conclusion: &str, reason: Option<&str>) -> Verdict {
        DecideResponse {
            conclusion: conclusion.to_string(),
            reason: reason.map(ToString::to_string),
            message: None,
        }
        .into_verdict()
    }

    #[test]
    fn test_verdict_mapping() {
        assert_eq!(decide("allow", None), Verdict::Allow);
        assert_eq!(decide("deny", Some("bot")), Verdict::Deny(DenialReason::Bot));
        assert_eq!(
            decide("deny", Some("rate_limit")),
            Verdict::Deny(DenialReason::RateLimit)
        );
        assert_eq!(
            decide("deny", Some("shield")),
            Verdict::Deny(DenialReason::Shield)
        );
    }

    #[test]
    fn test_unknown_deny_reason_maps_to_other() {
        assert_eq!(
            decide("deny", Some("quota")),
            Verdict::Deny(DenialReason::Other)
        );
        assert_eq!(decide("deny", None), Verdict::Deny(DenialReason::Other));
    }

    #[test]
    fn test_unknown_conclusion_is_errored() {
        assert!(matches!(decide("challenge", None), Verdict::Errored(_)));
        assert!(matches!(decide("error", None), Verdict::Errored(_)));
    }

    #[test]
    fn test_request_meta_snapshot() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("http://gateway.local/api/things?page=2")
            .header(header::USER_AGENT, "curl/8.5.0")
            .body(Body::empty())
            .unwrap();

        let meta = RequestMeta::from_request("10.0.0.7".parse().unwrap(), &request);
        assert_eq!(meta.method, Method::POST);
        assert_eq!(meta.path, "/api/things");
        assert_eq!(meta.user_agent, "curl/8.5.0");
        assert_eq!(meta.source.to_string(), "10.0.0.7");
    }
}
