//! HTTP route modules
//!
//! Every endpoint answers with the `{code, message, data}` envelope.

pub mod context_elements;
pub mod user;

use crate::utils::error::{AppError, ErrorCode};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

/// Standard API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            code: ErrorCode::Success.as_u32(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

impl ApiResponse<()> {
    /// Successful response without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.as_u32(),
            message: message.into(),
            data: None,
        }
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub code: u32,
    pub message: String,
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(message: impl Into<String>, data: Vec<T>, total: u64, page: u64, size: u64) -> Self {
        Self {
            code: ErrorCode::Success.as_u32(),
            message: message.into(),
            data,
            total,
            page,
            size,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Extractor settings that turn malformed input into a 400 envelope
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(format!("Invalid query string: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::bad_request(format!("Invalid path parameter: {}", err)).into()
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success("Login successful", 42);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Password changed")).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_page_envelope() {
        let response = PageResponse::new("Success", vec!["a", "b"], 12, 2, 2);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"], 12);
        assert_eq!(json["page"], 2);
        assert_eq!(json["size"], 2);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }
}
