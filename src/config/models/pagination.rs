//! Pagination defaults for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page: u64,
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_size: 10,
            max_size: 100,
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_page == 0 {
            return Err("Default page must be greater than 0".to_string());
        }
        if self.default_size == 0 || self.max_size == 0 {
            return Err("Page sizes must be greater than 0".to_string());
        }
        if self.default_size > self.max_size {
            return Err(format!(
                "Default size {} exceeds max size {}",
                self.default_size, self.max_size
            ));
        }
        Ok(())
    }
}
