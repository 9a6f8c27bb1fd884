//! HTTP response handling for errors

use super::codes::ErrorCode;
use super::types::AppError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Error envelope written for every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(code: ErrorCode, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Envelope carrying the default message of the code
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.message())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.code().http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.code();
        if code == ErrorCode::InternalError {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(code = code.as_u32(), error = %self, "request rejected");
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(code, self.public_message()))
    }
}
