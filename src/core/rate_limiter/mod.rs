//! Admission control state
//!
//! Per-key token buckets with full-window resets, the policy resolver that
//! picks a `{requests, window}` rule per path, and the background sweep that
//! bounds memory to active keys.

mod policy;
mod store;
mod sweeper;
mod types;


pub use policy::{RateLimitPolicyResolver, parse_window};
pub use store::TokenBucketStore;
pub use sweeper::SWEEP_INTERVAL;
pub use types::RateLimitPolicy;
