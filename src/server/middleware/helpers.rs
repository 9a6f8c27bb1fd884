//! Helper functions for middleware

use crate::utils::error::AuthError;
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Case-sensitive scheme prefix of the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Pull the bearer token out of the `Authorization` header
///
/// A missing or empty header and an empty token are `TokenMissing`; any other
/// scheme is `InvalidToken`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| AuthError::InvalidToken)?,
        None => return Err(AuthError::TokenMissing),
    };

    if header.is_empty() {
        return Err(AuthError::TokenMissing);
    }

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidToken)?;

    if token.is_empty() {
        return Err(AuthError::TokenMissing);
    }

    Ok(token)
}

/// Client address used to key admission buckets
///
/// The TCP peer unless `trust_forwarded` is set, in which case `Forwarded`
/// and `X-Forwarded-For` win.
pub fn client_ip(req: &ServiceRequest, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(addr) = req.connection_info().realip_remote_addr() {
            return addr.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
