//! Token issuance and verification

use super::types::{Claims, ISSUER, SessionTokenService, TokenPair, TokenType};
use super::utils::unix_now;
use crate::utils::error::AuthError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

type AuthResult<T> = std::result::Result<T, AuthError>;

impl SessionTokenService {
    /// Create a service signing with the given HMAC secret
    pub fn new(secret: &str) -> Self {
        let secret = secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue an access token valid for `ttl`
    pub fn issue_access_token(&self, user_id: u64, phone: &str, ttl: Duration) -> AuthResult<String> {
        self.issue_access_token_at(user_id, phone, ttl, unix_now())
    }

    pub fn issue_access_token_at(
        &self,
        user_id: u64,
        phone: &str,
        ttl: Duration,
        now: u64,
    ) -> AuthResult<String> {
        self.sign(user_id, phone, TokenType::Access, ttl, now)
    }

    /// Issue an access and a refresh token sharing the same issue time
    pub fn issue_token_pair(
        &self,
        user_id: u64,
        phone: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> AuthResult<TokenPair> {
        self.issue_token_pair_at(user_id, phone, access_ttl, refresh_ttl, unix_now())
    }

    pub fn issue_token_pair_at(
        &self,
        user_id: u64,
        phone: &str,
        access_ttl: Duration,
        refresh_ttl: Duration,
        now: u64,
    ) -> AuthResult<TokenPair> {
        let access_token = self.sign(user_id, phone, TokenType::Access, access_ttl, now)?;
        let refresh_token = self.sign(user_id, phone, TokenType::Refresh, refresh_ttl, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: access_ttl.as_secs(),
        })
    }

    /// Verify an access token
    ///
    /// Any signature, format or time failure is `InvalidToken`. A refresh
    /// token is rejected with `WrongTokenType`.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<Claims> {
        self.verify_access_token_at(token, unix_now())
    }

    pub fn verify_access_token_at(&self, token: &str, now: u64) -> AuthResult<Claims> {
        self.verify_typed(token, TokenType::Access, now)
    }

    /// Verify a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<Claims> {
        self.verify_refresh_token_at(token, unix_now())
    }

    pub fn verify_refresh_token_at(&self, token: &str, now: u64) -> AuthResult<Claims> {
        self.verify_typed(token, TokenType::Refresh, now)
    }

    /// Mint a new access token from a refresh token
    ///
    /// The refresh token itself stays valid until its own expiry.
    pub fn refresh_access_token(&self, refresh_token: &str, access_ttl: Duration) -> AuthResult<String> {
        self.refresh_access_token_at(refresh_token, access_ttl, unix_now())
    }

    pub fn refresh_access_token_at(
        &self,
        refresh_token: &str,
        access_ttl: Duration,
        now: u64,
    ) -> AuthResult<String> {
        let claims = self
            .verify_refresh_token_at(refresh_token, now)
            .map_err(|e| {
                debug!("Refresh token rejected: {}", e);
                AuthError::InvalidRefreshToken
            })?;

        if claims.exp <= now {
            return Err(AuthError::RefreshTokenExpired);
        }

        self.sign(claims.user_id, &claims.phone, TokenType::Access, access_ttl, now)
    }

    fn sign(
        &self,
        user_id: u64,
        phone: &str,
        token_type: TokenType,
        ttl: Duration,
        now: u64,
    ) -> AuthResult<String> {
        let claims = Claims {
            user_id,
            phone: phone.to_string(),
            token_type,
            iat: now,
            nbf: now,
            exp: now.saturating_add(ttl.as_secs()),
            iss: ISSUER.to_string(),
            sub: token_type.subject().to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)?;

        debug!("Issued {:?} token for user: {}", token_type, user_id);
        Ok(token)
    }

    fn verify_typed(&self, token: &str, expected: TokenType, now: u64) -> AuthResult<Claims> {
        let claims = self.decode_claims(token)?;

        if !claims.is_active_at(now) {
            debug!("Token for user {} outside its validity window", claims.user_id);
            return Err(AuthError::InvalidToken);
        }

        if claims.token_type != expected {
            debug!(
                "Expected {:?} token, got {:?} for user {}",
                expected, claims.token_type, claims.user_id
            );
            return Err(AuthError::WrongTokenType);
        }

        Ok(claims)
    }

    /// Check signature and issuer; time checks happen against the caller's clock
    fn decode_claims(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token verification failed: {}", e);
                AuthError::InvalidToken
            })
    }
}
