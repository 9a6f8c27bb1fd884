//! Session token types

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

/// Issuer stamped into every token
pub const ISSUER: &str = "cese-backend";

/// Issues and verifies session tokens
///
/// The signing secret is bound at construction so callers never handle it
/// again.
#[derive(Clone)]
pub struct SessionTokenService {
    pub(super) encoding_key: EncodingKey,
    pub(super) decoding_key: DecodingKey,
    pub(super) algorithm: Algorithm,
}

impl std::fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("algorithm", &self.algorithm)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Claims carried by both access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub phone: String,
    pub token_type: TokenType,
    /// Issued at, unix seconds
    pub iat: u64,
    /// Not before, unix seconds
    pub nbf: u64,
    /// Expiry, unix seconds
    pub exp: u64,
    pub iss: String,
    pub sub: String,
    /// Unique token id
    pub jti: String,
}

/// Token type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Authorizes API calls
    Access,
    /// Only good for minting new access tokens
    Refresh,
}

impl TokenType {
    /// Subject claim for this token type
    pub fn subject(self) -> &'static str {
        match self {
            TokenType::Access => "access-token",
            TokenType::Refresh => "refresh-token",
        }
    }
}

/// Token pair (access + refresh)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}
