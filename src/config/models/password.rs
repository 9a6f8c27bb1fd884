//! Password policy configuration

use serde::{Deserialize, Serialize};

/// Password strength requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub require_number: bool,
    pub require_lower: bool,
    pub require_upper: bool,
    pub require_special: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 16,
            require_number: true,
            require_lower: true,
            require_upper: true,
            require_special: true,
        }
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_length == 0 {
            return Err("Password min length must be greater than 0".to_string());
        }
        if self.min_length > self.max_length {
            return Err(format!(
                "Password min length {} exceeds max length {}",
                self.min_length, self.max_length
            ));
        }
        Ok(())
    }
}
