//! Semantic configuration checks, separate from serde parsing.
//!
//! The decision API key and the CORS origin are exempt: an unset value is
//! an empty string used verbatim, never rejected here.

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use thiserror::Error;
use url::Url;

use crate::config::schema::GateConfig;

/// A single semantic configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid decision service base URL '{0}'")]
    DecisionUrl(String),

    #[error("auth path prefix must start and end with '/', got '{0}'")]
    AuthPrefix(String),

    #[error("{0} policy window must be non-zero")]
    ZeroWindow(&'static str),

    #[error("{0} policy request limit must be non-zero")]
    ZeroLimit(&'static str),

    #[error("invalid {0} upstream authority '{1}'")]
    UpstreamAuthority(&'static str, String),
}

/// Check everything serde cannot. Collects all errors instead of stopping
/// at the first.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if SocketAddr::from_str(&config.listener.bind_address).is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Url::parse(&config.decision.base_url).is_err() {
        errors.push(ValidationError::DecisionUrl(config.decision.base_url.clone()));
    }

    let prefix = &config.auth.path_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::AuthPrefix(prefix.clone()));
    }

    if config.policies.global.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow("global"));
    }
    if config.policies.global.max_requests == 0 {
        errors.push(ValidationError::ZeroLimit("global"));
    }
    if config.policies.auth.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow("auth"));
    }
    if config.policies.auth.max_requests == 0 {
        errors.push(ValidationError::ZeroLimit("auth"));
    }

    for (name, address) in [
        ("app", &config.upstreams.app_address),
        ("auth", &config.upstreams.auth_address),
    ] {
        if Authority::from_str(address).is_err() {
            errors.push(ValidationError::UpstreamAuthority(name, address.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
