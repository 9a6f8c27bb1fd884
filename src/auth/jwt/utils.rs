//! Session token utility functions

use super::types::Claims;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in whole seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl Claims {
    /// Whether the token may be used at `now`
    pub fn is_active_at(&self, now: u64) -> bool {
        now >= self.nbf && self.exp > now
    }
}
