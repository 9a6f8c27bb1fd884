//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

#![allow(missing_docs)]

pub mod auth;
pub mod logging;
pub mod pagination;
pub mod password;
pub mod rate_limit;
pub mod server;
pub mod storage;

pub use auth::*;
pub use logging::*;
pub use pagination::*;
pub use password::*;
pub use rate_limit::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

pub fn default_database_url() -> String {
    "sqlite://cese.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_expire_hours() -> u64 {
    24
}

/// Refresh tokens live a week unless configured otherwise
pub fn default_refresh_expire_hours() -> u64 {
    168
}

pub fn default_true() -> bool {
    true
}

pub fn default_window() -> String {
    "1m".to_string()
}
