//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use cese_backend::config::Config;
use cese_backend::core::models::{ElementContent, NewUser};

/// Password that satisfies the default policy
pub const STRONG_PASSWORD: &str = "Passw0rd!";

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// Valid mainland mobile number, distinct per `n`
    pub fn phone(n: u32) -> String {
        format!("138{:08}", n)
    }

    /// Account row with a placeholder hash
    pub fn new_user(n: u32) -> NewUser {
        NewUser {
            phone: Self::phone(n),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder".to_string(),
        }
    }
}

/// Factory for context element payloads
pub struct ElementFactory;

impl ElementFactory {
    /// Fully populated content with the given subject
    pub fn content(subject: &str) -> ElementContent {
        ElementContent {
            subject: subject.to_string(),
            task_goal: "Draft the weekly status update".to_string(),
            ai_role: "technical writer".to_string(),
            my_role: "team lead".to_string(),
            key_info: "three releases shipped".to_string(),
            behavior_rule: "stay concise".to_string(),
            delivery_format: "markdown bullet list".to_string(),
        }
    }

    /// Content carrying `role` as the AI role
    pub fn with_ai_role(subject: &str, role: &str) -> ElementContent {
        ElementContent {
            ai_role: role.to_string(),
            ..Self::content(subject)
        }
    }
}

/// Factory for service configuration
pub struct ConfigFactory;

impl ConfigFactory {
    /// Valid configuration over the in-memory store
    pub fn memory() -> Config {
        let mut config = Config::default();
        config.jwt.secret = "integration-test-secret-at-least-32-chars".to_string();
        config.database.url = "memory://".to_string();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phones_are_distinct_and_well_formed() {
        let a = UserFactory::phone(1);
        let b = UserFactory::phone(2);
        assert_ne!(a, b);
        assert_eq!(a.len(), 11);
        assert!(a.starts_with("138"));
    }

    #[test]
    fn test_memory_config_validates() {
        assert!(ConfigFactory::memory().validate().is_ok());
    }
}
