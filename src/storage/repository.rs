//! Persistence contracts used by the services

use crate::core::models::{ContextElement, ElementContent, ListQuery, NewUser, User};
use crate::utils::error::Result;
use async_trait::async_trait;

/// User account storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken phone number is `UserExists`
    async fn create(&self, user: NewUser) -> Result<User>;

    async fn find_by_id(&self, id: u64) -> Result<Option<User>>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>>;

    async fn exists_by_phone(&self, phone: &str) -> Result<bool>;

    /// Replace the stored hash; a missing user is `UserNotFound`
    async fn update_password(&self, id: u64, password_hash: &str) -> Result<()>;
}

/// Context element storage
///
/// Soft deleted elements are invisible to every read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContextElementRepository: Send + Sync {
    async fn create(&self, user_id: u64, content: ElementContent) -> Result<ContextElement>;

    async fn find_by_id(&self, id: u64) -> Result<Option<ContextElement>>;

    /// One page of a user's elements plus the total matching the filters
    async fn list_by_user(
        &self,
        user_id: u64,
        query: &ListQuery,
    ) -> Result<(Vec<ContextElement>, u64)>;

    /// Persist the content of `element` and bump its update time
    async fn update(&self, element: &ContextElement) -> Result<ContextElement>;

    /// Soft delete; a missing element is `ElementNotFound`
    async fn delete(&self, id: u64) -> Result<()>;

    async fn count_by_user(&self, user_id: u64) -> Result<u64>;
}
