//! # CESE Backend
//!
//! Backend service for the context-engineering six-elements tool.
//!
//! ## Features
//!
//! - **Accounts**: phone-number registration and login with Argon2 password hashing
//! - **Sessions**: HS256 access and refresh tokens, refresh without rotation
//! - **Admission control**: per-key token buckets scoped by path, client IP and user
//! - **Context elements**: user-owned six-field notes with filtering, sorting and paging
//! - **Storage**: SeaORM (SQLite or Postgres) or an in-memory store
//!
//! ## Running
//!
//! ```rust,no_run
//! use cese_backend::{Config, server::builder::run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/cese.yaml").await?;
//!     run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{AppError, ErrorCode, Result};

pub use auth::{Claims, SessionTokenService, TokenPair, TokenType};
pub use core::rate_limiter::{RateLimitPolicy, RateLimitPolicyResolver, TokenBucketStore};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information stamped by the build script
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Unix seconds
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
