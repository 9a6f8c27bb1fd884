//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key under `apis` used when no exact path matches
pub const DEFAULT_API_KEY: &str = "default";

/// One `{requests, window}` rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateRule {
    /// Requests admitted per window
    pub requests: i64,
    /// Window with unit suffix, e.g. `10s`, `1m`, `2h`
    #[serde(default = "default_window")]
    pub window: String,
}

impl RateRule {
    pub fn new<S: Into<String>>(requests: i64, window: S) -> Self {
        Self {
            requests,
            window: window.into(),
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.requests <= 0 {
            return Err(format!(
                "Rate limit rule '{}' must allow at least one request, got {}",
                name, self.requests
            ));
        }
        Ok(())
    }
}

impl Default for RateRule {
    fn default() -> Self {
        Self::new(100, default_window())
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Master switch for the path scoped gate
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Fallback rule when neither the path nor `default` is configured
    #[serde(default)]
    pub global: RateRule,
    /// Per path rules, plus the optional `default` entry
    #[serde(default)]
    pub apis: HashMap<String, RateRule>,
    /// Extra gate keyed by client IP on the login and register endpoints
    #[serde(default)]
    pub ip: Option<RateRule>,
    /// Extra gate keyed by user id on the context element endpoints
    #[serde(default)]
    pub user: Option<RateRule>,
    /// Key client gates on `Forwarded`/`X-Forwarded-For` instead of the
    /// peer address; only safe behind a proxy that overwrites them
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            global: RateRule::default(),
            apis: HashMap::new(),
            ip: None,
            user: None,
            trust_forwarded_headers: false,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.global.validate("global")?;

        for (path, rule) in &self.apis {
            rule.validate(path)?;
        }

        if let Some(rule) = &self.ip {
            rule.validate("ip")?;
        }

        if let Some(rule) = &self.user {
            rule.validate("user")?;
        }

        Ok(())
    }
}
