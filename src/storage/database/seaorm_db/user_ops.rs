use crate::core::models::{NewUser, User};
use crate::storage::repository::UserRepository;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, user};
use super::types::{SeaOrmDatabase, row_id};

#[async_trait]
impl UserRepository for SeaOrmDatabase {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        debug!("Creating user: {}", new_user.phone);

        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            phone: Set(new_user.phone.clone()),
            password_hash: Set(new_user.password_hash),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                AppError::UserExists(new_user.phone.clone())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(model.to_domain_user())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", id);

        let Some(id) = row_id(id) else {
            return Ok(None);
        };

        let user_model = entities::User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        debug!("Finding user by phone: {}", phone);

        let user_model = entities::User::find()
            .filter(user::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(user_model.map(|model| model.to_domain_user()))
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool> {
        let count = entities::User::find()
            .filter(user::Column::Phone.eq(phone))
            .count(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(count > 0)
    }

    async fn update_password(&self, id: u64, password_hash: &str) -> Result<()> {
        debug!("Updating password for user: {}", id);

        let not_found = || AppError::user_not_found(format!("User {} not found", id));
        let row = row_id(id).ok_or_else(not_found)?;

        let mut user: user::ActiveModel = entities::User::find_by_id(row)
            .one(&self.db)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(not_found)?
            .into();

        user.password_hash = Set(password_hash.to_string());
        user.updated_at = Set(chrono::Utc::now().into());

        user.update(&self.db).await.map_err(AppError::Database)?;

        Ok(())
    }
}
