//! Configuration management for the service
//!
//! Configuration is read from a YAML file, patched from `CESE_*` environment
//! variables, validated, and then shared read-only for the process lifetime.

pub mod models;

pub use models::*;

use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/cese.yaml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "CESE_";

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from file, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML document without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `CESE_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            self.server.port = parse_env("SERVER_PORT", &port)?;
        }
        if let Some(url) = var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = var("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Some(hours) = var("JWT_EXPIRE_HOURS") {
            self.jwt.expire_hours = parse_env("JWT_EXPIRE_HOURS", &hours)?;
        }
        if let Some(enabled) = var("RATE_LIMIT_ENABLED") {
            self.rate_limit.enabled = parse_env("RATE_LIMIT_ENABLED", &enabled)?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log.level = level;
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .validate()
            .map_err(|e| AppError::Config(format!("Server config error: {}", e)))?;

        self.database
            .validate()
            .map_err(|e| AppError::Config(format!("Database config error: {}", e)))?;

        self.jwt
            .validate()
            .map_err(|e| AppError::Config(format!("JWT config error: {}", e)))?;

        self.rate_limit
            .validate()
            .map_err(|e| AppError::Config(format!("Rate limit config error: {}", e)))?;

        self.pagination
            .validate()
            .map_err(|e| AppError::Config(format!("Pagination config error: {}", e)))?;

        self.password
            .validate()
            .map_err(|e| AppError::Config(format!("Password config error: {}", e)))?;

        self.log
            .validate()
            .map_err(|e| AppError::Config(format!("Log config error: {}", e)))?;

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        AppError::Config(format!(
            "Invalid value for {}{}: '{}'",
            ENV_PREFIX, name, value
        ))
    })
}
