//! Background sweep of idle buckets

use super::store::TokenBucketStore;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How often idle buckets are swept
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

impl TokenBucketStore {
    /// Sweep idle buckets every `every` until `shutdown` fires
    ///
    /// The task holds only a weak reference, so it also ends once the store
    /// itself is dropped.
    pub fn spawn_sweeper(
        self: &Arc<Self>,
        every: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // First tick fires immediately
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        debug!("Rate limit sweeper cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let Some(store) = store.upgrade() else {
                            debug!("Rate limit store dropped, sweeper exiting");
                            break;
                        };
                        store.sweep();
                    }
                }
            }
        })
    }
}
