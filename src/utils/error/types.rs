//! Error types for the service

use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, AppError>;

/// Session token failures
#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token presented
    #[error("token missing")]
    TokenMissing,

    /// Bad signature, malformed, expired or not yet valid
    #[error("invalid token")]
    InvalidToken,

    /// Token type does not match the operation
    #[error("wrong token type")]
    WrongTokenType,

    /// Refresh token failed verification
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// Refresh token past its expiry
    #[error("refresh token expired")]
    RefreshTokenExpired,

    /// Token could not be signed
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Main error type for the service
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session token errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// No identity attached to the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity present but not allowed to touch the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Admission control rejected the request
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Malformed request input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Phone number failed format validation
    #[error("Invalid phone number: {0}")]
    PhoneInvalid(String),

    /// Password does not satisfy the policy
    #[error("Weak password: {0}")]
    WeakPassword(String),

    /// Phone number already registered
    #[error("User already exists: {0}")]
    UserExists(String),

    /// No such user
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Password mismatch
    #[error("Invalid password")]
    InvalidPassword,

    /// No such context element
    #[error("Context element not found: {0}")]
    ElementNotFound(String),

    /// Context element payload failed validation
    #[error("Invalid context element: {0}")]
    InvalidElement(String),

    /// Password hashing errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
