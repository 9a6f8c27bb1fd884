//! Business error codes carried in every response envelope
//!
//! Codes are stable and independent of the HTTP status. The numeric ranges
//! group the domain: 1000s user, 2000s context element, 3000s token.

use actix_web::http::StatusCode;
use serde::{Serialize, Serializer};

/// Stable business code returned in the `code` field of the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    InvalidParams,
    Unauthorized,
    Forbidden,
    NotFound,
    TooManyRequests,
    InternalError,

    UserExists,
    UserNotFound,
    InvalidPassword,
    WeakPassword,
    InvalidPhone,

    ElementNotFound,
    ElementExists,
    InvalidElement,

    InvalidToken,
    TokenExpired,
    TokenMissing,
    WrongTokenType,
}

impl ErrorCode {
    /// Numeric value of the code
    pub const fn as_u32(self) -> u32 {
        match self {
            ErrorCode::Success => 200,
            ErrorCode::InvalidParams => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::TooManyRequests => 429,
            ErrorCode::InternalError => 500,

            ErrorCode::UserExists => 1001,
            ErrorCode::UserNotFound => 1002,
            ErrorCode::InvalidPassword => 1003,
            ErrorCode::WeakPassword => 1004,
            ErrorCode::InvalidPhone => 1005,

            ErrorCode::ElementNotFound => 2001,
            ErrorCode::ElementExists => 2002,
            ErrorCode::InvalidElement => 2003,

            ErrorCode::InvalidToken => 3001,
            ErrorCode::TokenExpired => 3002,
            ErrorCode::TokenMissing => 3003,
            ErrorCode::WrongTokenType => 3004,
        }
    }

    /// Default human readable message for the code
    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::InvalidParams => "Invalid parameters",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::Forbidden => "Forbidden",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::TooManyRequests => "Too many requests, please try again later",
            ErrorCode::InternalError => "Internal server error",

            ErrorCode::UserExists => "User already exists",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::InvalidPassword => "Incorrect password",
            ErrorCode::WeakPassword => "Password is not strong enough",
            ErrorCode::InvalidPhone => "Invalid phone number",

            ErrorCode::ElementNotFound => "Context element not found",
            ErrorCode::ElementExists => "Context element already exists",
            ErrorCode::InvalidElement => "Invalid context element",

            ErrorCode::InvalidToken => "Invalid token",
            ErrorCode::TokenExpired => "Token expired",
            ErrorCode::TokenMissing => "Token missing",
            ErrorCode::WrongTokenType => "Wrong token type",
        }
    }

    /// HTTP status derived from the code range
    pub fn http_status(self) -> StatusCode {
        let code = self.as_u32();
        match code {
            200 => StatusCode::OK,
            400..=499 => {
                StatusCode::from_u16(code as u16).unwrap_or(StatusCode::BAD_REQUEST)
            }
            1000..=1999 => StatusCode::BAD_REQUEST,
            2000..=2999 => StatusCode::NOT_FOUND,
            3000..=3999 => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.as_u32())
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
