use crate::core::models::{ContextElement, ElementContent, ListQuery, SortField};
use crate::storage::repository::ContextElementRepository;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, context_element};
use super::types::{SeaOrmDatabase, row_id};

impl SeaOrmDatabase {
    /// Live (not soft deleted) element by row id
    async fn find_live_element(&self, id: u64) -> Result<Option<context_element::Model>> {
        let Some(id) = row_id(id) else {
            return Ok(None);
        };

        entities::ContextElement::find_by_id(id)
            .filter(context_element::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }
}

/// Filter clause for a listing; keyword matches the subject or any field
fn list_condition(user_id: i64, query: &ListQuery) -> Condition {
    use context_element::Column;

    let mut condition = Condition::all()
        .add(Column::UserId.eq(user_id))
        .add(Column::DeletedAt.is_null());

    if let Some(subject) = &query.subject {
        condition = condition.add(Column::Subject.contains(subject));
    }
    if let Some(ai_role) = &query.ai_role {
        condition = condition.add(Column::AiRole.contains(ai_role));
    }
    if let Some(my_role) = &query.my_role {
        condition = condition.add(Column::MyRole.contains(my_role));
    }
    if let Some(keyword) = &query.keyword {
        condition = condition.add(
            Condition::any()
                .add(Column::Subject.contains(keyword))
                .add(Column::TaskGoal.contains(keyword))
                .add(Column::AiRole.contains(keyword))
                .add(Column::MyRole.contains(keyword))
                .add(Column::KeyInfo.contains(keyword))
                .add(Column::BehaviorRule.contains(keyword))
                .add(Column::DeliveryFormat.contains(keyword)),
        );
    }

    condition
}

#[async_trait]
impl ContextElementRepository for SeaOrmDatabase {
    async fn create(&self, user_id: u64, content: ElementContent) -> Result<ContextElement> {
        debug!("Creating context element for user: {}", user_id);

        let user_id = row_id(user_id)
            .ok_or_else(|| AppError::user_not_found(format!("User {} not found", user_id)))?;
        let now = chrono::Utc::now();

        let active_model = context_element::ActiveModel {
            user_id: Set(user_id),
            subject: Set(content.subject),
            task_goal: Set(content.task_goal),
            ai_role: Set(content.ai_role),
            my_role: Set(content.my_role),
            key_info: Set(content.key_info),
            behavior_rule: Set(content.behavior_rule),
            delivery_format: Set(content.delivery_format),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.to_domain_element())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<ContextElement>> {
        debug!("Finding context element by ID: {}", id);

        Ok(self
            .find_live_element(id)
            .await?
            .map(|model| model.to_domain_element()))
    }

    async fn list_by_user(
        &self,
        user_id: u64,
        query: &ListQuery,
    ) -> Result<(Vec<ContextElement>, u64)> {
        let Some(user_id) = row_id(user_id) else {
            return Ok((Vec::new(), 0));
        };

        let select = entities::ContextElement::find().filter(list_condition(user_id, query));

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(AppError::Database)?;

        if query.offset() >= total {
            return Ok((Vec::new(), total));
        }

        let column = match query.sort_by {
            SortField::CreatedAt => context_element::Column::CreatedAt,
            SortField::UpdatedAt => context_element::Column::UpdatedAt,
            SortField::Subject => context_element::Column::Subject,
        };
        let order = if query.sort_desc {
            Order::Desc
        } else {
            Order::Asc
        };

        let models = select
            .order_by(column, order.clone())
            .order_by(context_element::Column::Id, order)
            .offset(query.offset())
            .limit(query.size)
            .all(&self.db)
            .await
            .map_err(AppError::Database)?;

        let items = models
            .iter()
            .map(context_element::Model::to_domain_element)
            .collect();

        Ok((items, total))
    }

    async fn update(&self, element: &ContextElement) -> Result<ContextElement> {
        debug!("Updating context element: {}", element.id);

        let mut active_model: context_element::ActiveModel = self
            .find_live_element(element.id)
            .await?
            .ok_or_else(|| AppError::element_not_found(format!("Element {} not found", element.id)))?
            .into();

        let content = &element.content;
        active_model.subject = Set(content.subject.clone());
        active_model.task_goal = Set(content.task_goal.clone());
        active_model.ai_role = Set(content.ai_role.clone());
        active_model.my_role = Set(content.my_role.clone());
        active_model.key_info = Set(content.key_info.clone());
        active_model.behavior_rule = Set(content.behavior_rule.clone());
        active_model.delivery_format = Set(content.delivery_format.clone());
        active_model.updated_at = Set(chrono::Utc::now().into());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(model.to_domain_element())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        debug!("Soft deleting context element: {}", id);

        let mut active_model: context_element::ActiveModel = self
            .find_live_element(id)
            .await?
            .ok_or_else(|| AppError::element_not_found(format!("Element {} not found", id)))?
            .into();

        active_model.deleted_at = Set(Some(chrono::Utc::now().into()));
        active_model
            .update(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(())
    }

    async fn count_by_user(&self, user_id: u64) -> Result<u64> {
        let Some(user_id) = row_id(user_id) else {
            return Ok(0);
        };

        entities::ContextElement::find()
            .filter(context_element::Column::UserId.eq(user_id))
            .filter(context_element::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }
}
