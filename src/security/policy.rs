//! Policy bundles submitted to the decision service.
//!
//! A bundle is an ordered list of rule specifications. Two bundles exist,
//! built once at startup: the global bundle (bot detection, fixed window,
//! shield) and the auth bundle (stricter fixed window, shield). The
//! decision service evaluates the rules; this layer only describes them.

use serde::{Deserialize, Serialize};

use crate::config::schema::{AuthPolicyConfig, GlobalPolicyConfig};

/// Whether a rule's verdict is enforced or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    Live,
    DryRun,
}

/// One rule specification as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Classify automated clients. `allow` lists bypass categories.
    DetectBot { mode: RuleMode, allow: Vec<String> },

    /// Fixed-window rate limit per source address.
    FixedWindow {
        mode: RuleMode,
        window_secs: u64,
        max: u32,
    },

    /// Pattern/heuristic inspection for attack signatures.
    Shield { mode: RuleMode },
}

/// An ordered, immutable set of rules evaluated together.
#[derive(Debug, Clone)]
pub struct PolicyBundle {
    name: &'static str,
    rules: Vec<RuleSpec>,
}

impl PolicyBundle {
    /// Bundle for all traffic outside the auth subtree.
    pub fn global(config: &GlobalPolicyConfig) -> Self {
        Self {
            name: "global",
            rules: vec![
                RuleSpec::DetectBot {
                    mode: config.mode,
                    allow: config.bot_allow.clone(),
                },
                RuleSpec::FixedWindow {
                    mode: config.mode,
                    window_secs: config.window_secs,
                    max: config.max_requests,
                },
                RuleSpec::Shield { mode: config.mode },
            ],
        }
    }

    /// Bundle for the auth subtree. No bot check.
    pub fn auth(config: &AuthPolicyConfig) -> Self {
        Self {
            name: "auth",
            rules: vec![
                RuleSpec::FixedWindow {
                    mode: config.mode,
                    window_secs: config.window_secs,
                    max: config.max_requests,
                },
                RuleSpec::Shield { mode: config.mode },
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_bundle_shape() {
        let bundle = PolicyBundle::global(&GlobalPolicyConfig::default());
        assert_eq!(bundle.name(), "global");
        assert_eq!(
            bundle.rules(),
            &[
                RuleSpec::DetectBot {
                    mode: RuleMode::Live,
                    allow: Vec::new(),
                },
                RuleSpec::FixedWindow {
                    mode: RuleMode::Live,
                    window_secs: 60,
                    max: 100,
                },
                RuleSpec::Shield { mode: RuleMode::Live },
            ]
        );
    }

    #[test]
    fn test_auth_bundle_has_no_bot_rule() {
        let bundle = PolicyBundle::auth(&AuthPolicyConfig::default());
        assert_eq!(bundle.name(), "auth");
        assert_eq!(bundle.rules().len(), 2);
        assert!(!bundle
            .rules()
            .iter()
            .any(|rule| matches!(rule, RuleSpec::DetectBot { .. })));
    }

    #[test]
    fn test_rule_wire_encoding() {
        let rule = RuleSpec::FixedWindow {
            mode: RuleMode::Live,
            window_secs: 60,
            max: 100,
        };
        let encoded = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "kind": "fixed_window",
                "mode": "live",
                "window_secs": 60,
                "max": 100,
            })
        );
    }
}
