//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::security::policy::RuleMode;

/// Root configuration for the admission gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Decision service connection settings.
    pub decision: DecisionConfig,

    /// Policy bundles evaluated by the gates.
    pub policies: PolicyConfig,

    /// Authentication subtree settings.
    pub auth: AuthConfig,

    /// Cross-origin response header settings.
    pub cors: CorsConfig,

    /// Delegated backend addresses.
    pub upstreams: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Decision service connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Base URL of the decision service.
    pub base_url: String,

    /// API key sent as a bearer token. An unset value stays empty and is
    /// sent verbatim.
    pub api_key: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9100".to_string(),
            api_key: String::new(),
            timeout_secs: 5,
        }
    }
}

/// Policy bundles for the two gates.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// Bundle applied to all traffic outside the auth subtree.
    pub global: GlobalPolicyConfig,

    /// Stricter bundle applied to the auth subtree.
    pub auth: AuthPolicyConfig,
}

/// Global bundle: bot detection + fixed window + shield.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalPolicyConfig {
    /// Rule mode for every rule in the bundle.
    pub mode: RuleMode,

    /// Fixed window duration in seconds.
    pub window_secs: u64,

    /// Maximum requests per source address per window.
    pub max_requests: u32,

    /// Bot categories allowed to bypass detection. Empty by default.
    pub bot_allow: Vec<String>,
}

impl Default for GlobalPolicyConfig {
    fn default() -> Self {
        Self {
            mode: RuleMode::Live,
            window_secs: 60,
            max_requests: 100,
            bot_allow: Vec::new(),
        }
    }
}

/// Auth bundle: fixed window + shield. No bot check.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthPolicyConfig {
    /// Rule mode for every rule in the bundle.
    pub mode: RuleMode,

    /// Fixed window duration in seconds.
    pub window_secs: u64,

    /// Maximum requests per source address per window.
    pub max_requests: u32,
}

impl Default for AuthPolicyConfig {
    fn default() -> Self {
        Self {
            mode: RuleMode::Live,
            window_secs: 900,
            max_requests: 20,
        }
    }
}

/// Authentication subtree settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path prefix of the auth subtree. Must start and end with '/'.
    pub path_prefix: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/api/auth/".to_string(),
        }
    }
}

/// Cross-origin response header settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Permitted origin. An unset value stays empty and is sent verbatim.
    pub origin: String,
}

/// Delegated backend addresses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Application backend authority (e.g., "127.0.0.1:3000").
    pub app_address: String,

    /// Auth backend authority (e.g., "127.0.0.1:3001").
    pub auth_address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            app_address: "127.0.0.1:3000".to_string(),
            auth_address: "127.0.0.1:3001".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds, enforced at the router.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address.
    pub metrics_address: String,

    /// Default log filter when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
            log_filter: "edge_guard=debug,tower_http=debug".to_string(),
        }
    }
}
