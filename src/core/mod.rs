//! Core domain: admission control state and domain models

pub mod models;
pub mod rate_limiter;
