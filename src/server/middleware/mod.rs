//! HTTP middleware implementations
//!
//! - Panic recovery
//! - Admission control (path, IP and user scoped token buckets)
//! - Bearer token authentication

mod auth;
mod helpers;
mod rate_limit;
mod recovery;


pub use auth::{AuthMiddleware, AuthMiddlewareService, Identity};
pub use helpers::{BEARER_PREFIX, client_ip, extract_bearer_token};
pub use rate_limit::{
    AdmissionMiddleware, AdmissionMiddlewareService, AdmissionScope, X_RATELIMIT_LIMIT,
    X_RATELIMIT_REMAINING, X_RATELIMIT_RESET,
};
pub use recovery::{RecoveryMiddleware, RecoveryMiddlewareService};
