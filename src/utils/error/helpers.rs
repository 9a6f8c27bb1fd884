//! Helper functions for creating specific error types

use super::codes::ErrorCode;
use super::types::{AppError, AuthError};

/// Helper functions for creating specific errors
impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn rate_limited<S: Into<String>>(message: S) -> Self {
        Self::RateLimited(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn user_not_found<S: Into<String>>(message: S) -> Self {
        Self::UserNotFound(message.into())
    }

    pub fn element_not_found<S: Into<String>>(message: S) -> Self {
        Self::ElementNotFound(message.into())
    }

    pub fn invalid_element<S: Into<String>>(message: S) -> Self {
        Self::InvalidElement(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl AppError {
    /// Business code reported for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Auth(auth) => auth.code(),
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::RateLimited(_) => ErrorCode::TooManyRequests,
            AppError::BadRequest(_) => ErrorCode::InvalidParams,
            AppError::PhoneInvalid(_) => ErrorCode::InvalidPhone,
            AppError::WeakPassword(_) => ErrorCode::WeakPassword,
            AppError::UserExists(_) => ErrorCode::UserExists,
            AppError::UserNotFound(_) => ErrorCode::UserNotFound,
            AppError::InvalidPassword => ErrorCode::InvalidPassword,
            AppError::ElementNotFound(_) => ErrorCode::ElementNotFound,
            AppError::InvalidElement(_) => ErrorCode::InvalidElement,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Yaml(_)
            | AppError::Io(_)
            | AppError::Crypto(_)
            | AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Message safe to hand back to a client
    ///
    /// Infrastructure failures collapse to the generic message so storage or
    /// crypto details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Yaml(_)
            | AppError::Io(_)
            | AppError::Crypto(_)
            | AppError::Internal(_) => ErrorCode::InternalError.message().to_string(),
            AppError::Auth(auth) => auth.code().message().to_string(),
            AppError::InvalidPassword => ErrorCode::InvalidPassword.message().to_string(),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::RateLimited(msg)
            | AppError::BadRequest(msg)
            | AppError::PhoneInvalid(msg)
            | AppError::WeakPassword(msg)
            | AppError::UserExists(msg)
            | AppError::UserNotFound(msg)
            | AppError::ElementNotFound(msg)
            | AppError::InvalidElement(msg) => {
                if msg.is_empty() {
                    self.code().message().to_string()
                } else {
                    msg.clone()
                }
            }
        }
    }
}

impl AuthError {
    /// Business code reported for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::TokenMissing => ErrorCode::TokenMissing,
            AuthError::InvalidToken | AuthError::InvalidRefreshToken => ErrorCode::InvalidToken,
            AuthError::WrongTokenType => ErrorCode::WrongTokenType,
            AuthError::RefreshTokenExpired => ErrorCode::TokenExpired,
            AuthError::Signing(_) => ErrorCode::InternalError,
        }
    }
}
