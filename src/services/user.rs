//! Account registration, login and session refresh

use crate::auth::{SessionTokenService, hash_password, verify_password};
use crate::config::{JwtConfig, PasswordConfig};
use crate::core::models::{LoginResponse, NewUser, RefreshTokenResponse, User, UserProfile};
use crate::storage::UserRepository;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{is_valid_phone, password_violations};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User account operations
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<SessionTokenService>,
    jwt: JwtConfig,
    password_policy: PasswordConfig,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("tokens", &self.tokens)
            .field("jwt", &self.jwt)
            .field("password_policy", &self.password_policy)
            .finish_non_exhaustive()
    }
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<SessionTokenService>,
        jwt: JwtConfig,
        password_policy: PasswordConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            jwt,
            password_policy,
        }
    }

    /// Create an account for `phone`
    pub async fn register(&self, phone: &str, password: &str) -> Result<UserProfile> {
        ensure_phone(phone)?;
        self.ensure_strong(password)?;

        if self.users.exists_by_phone(phone).await? {
            debug!("Registration for taken phone rejected");
            return Err(AppError::UserExists(format!(
                "Phone {} is already registered",
                phone
            )));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                phone: phone.to_string(),
                password_hash,
            })
            .await?;

        info!("User registered: {}", user.id);
        Ok(UserProfile::from(&user))
    }

    /// Check credentials and issue an access/refresh pair
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResponse> {
        ensure_phone(phone)?;

        let user = self
            .users
            .find_by_phone(phone)
            .await?
            .ok_or_else(|| AppError::user_not_found(format!("No user with phone {}", phone)))?;

        if !verify_password(password, &user.password_hash)? {
            warn!("Login with wrong password for user: {}", user.id);
            return Err(AppError::InvalidPassword);
        }

        let pair = self.tokens.issue_token_pair(
            user.id,
            &user.phone,
            self.jwt.access_ttl(),
            self.jwt.refresh_ttl(),
        )?;

        info!("User logged in: {}", user.id);
        Ok(LoginResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: UserProfile::from(&user),
        })
    }

    pub async fn change_password(
        &self,
        user_id: u64,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.ensure_strong(new_password)?;

        let user = self.find(user_id).await?;
        if !verify_password(old_password, &user.password_hash)? {
            warn!("Password change with wrong old password for user: {}", user_id);
            return Err(AppError::InvalidPassword);
        }

        let password_hash = hash_password(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;

        info!("Password changed for user: {}", user_id);
        Ok(())
    }

    pub async fn profile(&self, user_id: u64) -> Result<UserProfile> {
        self.find(user_id).await.map(|user| UserProfile::from(&user))
    }

    /// Mint a fresh access token; the refresh token stays usable
    pub fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        let access_ttl = self.jwt.access_ttl();
        let access_token = self.tokens.refresh_access_token(refresh_token, access_ttl)?;

        Ok(RefreshTokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: access_ttl.as_secs(),
        })
    }

    async fn find(&self, user_id: u64) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(format!("User {} not found", user_id)))
    }

    fn ensure_strong(&self, password: &str) -> Result<()> {
        let violations = password_violations(password, &self.password_policy);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::WeakPassword(violations.join("; ")))
        }
    }
}

fn ensure_phone(phone: &str) -> Result<()> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(AppError::PhoneInvalid(format!(
            "{} is not a valid mobile number",
            phone
        )))
    }
}
