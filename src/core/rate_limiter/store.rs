//! Token bucket store

use super::types::Bucket;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// One token bucket per rate-limit key
///
/// Every operation runs under a single mutex over the whole map, so calls
/// on one key observe a total order and the last token is never handed out
/// twice.
#[derive(Debug, Default)]
pub struct TokenBucketStore {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl TokenBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request on `key` may proceed
    pub fn allow(&self, key: &str, limit: i64, window: Duration) -> bool {
        self.allow_at(key, limit, window, Instant::now())
    }

    /// [`allow`](Self::allow) against an explicit clock
    ///
    /// An unseen key always passes and starts with `limit - 1` tokens. Once
    /// `window` has elapsed since the last refill the bucket resets to
    /// `limit - 1` and the request passes. `limit` is not validated here.
    pub fn allow_at(&self, key: &str, limit: i64, window: Duration, now: Instant) -> bool {
        let mut buckets = self.buckets.lock();

        let Some(bucket) = buckets.get_mut(key) else {
            buckets.insert(key.to_string(), Bucket::charged(limit, window, now));
            return true;
        };

        if now.saturating_duration_since(bucket.last_refill) >= window {
            *bucket = Bucket::charged(limit, window, now);
            return true;
        }

        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            return true;
        }

        false
    }

    /// Forget `key` so its next request is treated as the first
    pub fn reset(&self, key: &str) {
        self.buckets.lock().remove(key);
    }

    /// Drop buckets idle for more than twice their window
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut buckets = self.buckets.lock();
        let before = buckets.len();
        buckets.retain(|_, bucket| !bucket.is_idle_at(now));
        let removed = before - buckets.len();

        if removed > 0 {
            debug!("Swept {} idle rate limit buckets, {} remain", removed, buckets.len());
        }
        removed
    }

    /// Tokens left for `key`, `None` when no bucket exists
    pub fn tokens(&self, key: &str) -> Option<i64> {
        self.buckets.lock().get(key).map(|bucket| bucket.tokens)
    }

    /// Capacity of the bucket for `key`, `None` when no bucket exists
    pub fn capacity(&self, key: &str) -> Option<i64> {
        self.buckets.lock().get(key).map(|bucket| bucket.capacity)
    }

    /// Number of live buckets
    pub fn len(&self) -> usize {
        self.buckets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
