//! Rate limiter types and data structures

use crate::config::RateRule;
use std::time::{Duration, Instant};

/// Resolved admission rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Requests admitted per window
    pub requests: i64,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(requests: i64, window: Duration) -> Self {
        Self { requests, window }
    }

    /// Build from a configured rule, parsing its window string
    pub fn from_rule(rule: &RateRule) -> Self {
        Self::new(rule.requests, super::parse_window(&rule.window))
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::from_rule(&RateRule::default())
    }
}

/// Bucket state for one key
#[derive(Debug, Clone)]
pub(super) struct Bucket {
    /// Units left in the current window
    pub(super) tokens: i64,
    pub(super) capacity: i64,
    pub(super) window: Duration,
    pub(super) last_refill: Instant,
}

impl Bucket {
    /// Fresh bucket with the triggering request already charged
    pub(super) fn charged(limit: i64, window: Duration, now: Instant) -> Self {
        Self {
            tokens: limit - 1,
            capacity: limit,
            window,
            last_refill: now,
        }
    }

    pub(super) fn is_idle_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_refill) > self.window * 2
    }
}
