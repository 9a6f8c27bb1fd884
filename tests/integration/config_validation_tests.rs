//! Configuration validation integration tests
//!
//! Tests for configuration validation across all config components.
//! These tests verify that configuration validates correctly and fails
//! appropriately for invalid configurations.

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use cese_backend::config::{Config, RateRule};
    use cese_backend::core::rate_limiter::RateLimitPolicyResolver;
    use cese_backend::utils::error::AppError;
    use std::path::Path;
    use std::time::Duration;

    fn shipped_config() -> Config {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/cese.yaml");
        let content = std::fs::read_to_string(path).unwrap();
        Config::from_yaml(&content).unwrap()
    }

    fn config_error(config: &Config) -> String {
        match config.validate() {
            Err(AppError::Config(msg)) => msg,
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    // ==================== Shipped configuration ====================

    #[test]
    fn test_shipped_config_is_valid() {
        let config = shipped_config();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_memory());
        assert_eq!(config.jwt.access_ttl(), Duration::from_secs(24 * 3600));
        assert_eq!(config.jwt.refresh_ttl(), Duration::from_secs(168 * 3600));
    }

    #[test]
    fn test_shipped_rate_rules_resolve() {
        let config = shipped_config();
        let resolver = RateLimitPolicyResolver::new(&config.rate_limit);

        assert_eq!(resolver.resolve("/api/v1/user/login").requests, 5);
        assert_eq!(resolver.resolve("/api/v1/user/register").requests, 3);
        // Unlisted paths take the `default` entry before the global rule
        assert_eq!(resolver.resolve("/api/v1/context-elements").requests, 60);
        assert_eq!(config.rate_limit.ip.as_ref().map(|r| r.requests), Some(20));
    }

    // ==================== Section validation ====================

    #[test]
    fn test_server_port_zero() {
        let mut config = ConfigFactory::memory();
        config.server.port = 0;
        let msg = config_error(&config);
        assert!(msg.contains("Server"));
        assert!(msg.contains("Port"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = ConfigFactory::memory();
        config.server.workers = Some(0);
        assert!(config_error(&config).contains("Workers"));
    }

    #[test]
    fn test_empty_database_url() {
        let mut config = ConfigFactory::memory();
        config.database.url = "  ".to_string();
        assert!(config_error(&config).contains("Database"));
    }

    #[test]
    fn test_missing_jwt_secret() {
        let mut config = ConfigFactory::memory();
        config.jwt.secret.clear();
        assert!(config_error(&config).contains("JWT secret"));
    }

    #[test]
    fn test_zero_refresh_expiry() {
        let mut config = ConfigFactory::memory();
        config.jwt.refresh_expire_hours = 0;
        assert!(config_error(&config).contains("refresh"));
    }

    #[test]
    fn test_api_rule_must_allow_requests() {
        let mut config = ConfigFactory::memory();
        config
            .rate_limit
            .apis
            .insert("/api/v1/user/login".to_string(), RateRule::new(0, "1m"));
        let msg = config_error(&config);
        assert!(msg.contains("/api/v1/user/login"));
    }

    #[test]
    fn test_pagination_default_above_max() {
        let mut config = ConfigFactory::memory();
        config.pagination.default_size = 200;
        assert!(config_error(&config).contains("Pagination"));
    }

    #[test]
    fn test_password_bounds_inverted() {
        let mut config = ConfigFactory::memory();
        config.password.min_length = 20;
        config.password.max_length = 10;
        assert!(config_error(&config).contains("Password"));
    }

    #[test]
    fn test_empty_log_level() {
        let mut config = ConfigFactory::memory();
        config.log.level = String::new();
        assert!(config_error(&config).contains("Log"));
    }

    // ==================== Parsing ====================

    #[test]
    fn test_sections_fall_back_to_defaults() {
        let yaml = "jwt:\n  secret: \"only-the-secret-is-configured-here\"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8080);
        assert!(config.rate_limit.enabled);
        assert!(config.rate_limit.ip.is_none());
        assert_eq!(config.pagination.max_size, 100);
    }

    #[test]
    fn test_malformed_yaml() {
        let result = Config::from_yaml("server: [unclosed");
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
