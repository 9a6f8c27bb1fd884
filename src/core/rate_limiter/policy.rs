//! Rate limit policy resolution

use super::types::RateLimitPolicy;
use crate::config::{DEFAULT_API_KEY, RateLimitConfig};
use std::collections::HashMap;
use std::time::Duration;

/// Window used when a window string cannot be parsed
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Parse `10s`, `5m` or `2h` into a duration
///
/// Anything else, including zero or negative amounts, falls back to one
/// minute so a bad rule never takes the gate down.
pub fn parse_window(window: &str) -> Duration {
    let window = window.trim();
    let Some(unit) = window.chars().last() else {
        return DEFAULT_WINDOW;
    };

    let seconds_per_unit = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        _ => return DEFAULT_WINDOW,
    };

    match window[..window.len() - 1].parse::<u64>() {
        Ok(amount) if amount > 0 => Duration::from_secs(amount.saturating_mul(seconds_per_unit)),
        _ => DEFAULT_WINDOW,
    }
}

/// Picks the rule for a request path
///
/// Resolution order is exact path, then the `default` entry, then the global
/// rule. Windows are parsed once up front.
#[derive(Debug, Clone)]
pub struct RateLimitPolicyResolver {
    paths: HashMap<String, RateLimitPolicy>,
    fallback: Option<RateLimitPolicy>,
    global: RateLimitPolicy,
}

impl RateLimitPolicyResolver {
    pub fn new(config: &RateLimitConfig) -> Self {
        let mut paths: HashMap<String, RateLimitPolicy> = config
            .apis
            .iter()
            .map(|(path, rule)| (path.clone(), RateLimitPolicy::from_rule(rule)))
            .collect();
        let fallback = paths.remove(DEFAULT_API_KEY);

        Self {
            paths,
            fallback,
            global: RateLimitPolicy::from_rule(&config.global),
        }
    }

    pub fn resolve(&self, path: &str) -> RateLimitPolicy {
        self.paths
            .get(path)
            .or(self.fallback.as_ref())
            .copied()
            .unwrap_or(self.global)
    }
}
