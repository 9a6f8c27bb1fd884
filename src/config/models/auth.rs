//! Session token configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SECONDS_PER_HOUR: u64 = 3600;

/// JWT configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HMAC signing secret
    #[serde(default)]
    pub secret: String,
    /// Access token lifetime in hours
    #[serde(default = "default_expire_hours")]
    pub expire_hours: u64,
    /// Refresh token lifetime in hours
    #[serde(default = "default_refresh_expire_hours")]
    pub refresh_expire_hours: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expire_hours: default_expire_hours(),
            refresh_expire_hours: default_refresh_expire_hours(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expire_hours", &self.expire_hours)
            .field("refresh_expire_hours", &self.refresh_expire_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.expire_hours * SECONDS_PER_HOUR)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_expire_hours * SECONDS_PER_HOUR)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("JWT secret cannot be empty".to_string());
        }

        if self.expire_hours == 0 {
            return Err("JWT expire hours must be greater than 0".to_string());
        }

        if self.refresh_expire_hours == 0 {
            return Err("JWT refresh expire hours must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl JwtConfig {
    /// Settings that are valid but unsafe outside development
    ///
    /// Returned rather than logged so callers can report them once logging is up.
    pub fn insecure_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.secret.len() < 32 {
            warnings.push("JWT secret is shorter than 32 bytes, use a longer secret in production");
        }
        if self.refresh_expire_hours < self.expire_hours {
            warnings.push("Refresh tokens expire before access tokens");
        }
        warnings
    }
}
