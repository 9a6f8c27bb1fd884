//! Context element operations scoped to their owner

use crate::config::PaginationConfig;
use crate::core::models::{
    ContextElement, ElementContent, ElementQuery, ListQuery, MAX_FIELD_LEN, MAX_SUBJECT_LEN,
    SortField,
};
use crate::storage::ContextElementRepository;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// CRUD over context elements with ownership checks
#[derive(Clone)]
pub struct ContextElementService {
    elements: Arc<dyn ContextElementRepository>,
    pagination: PaginationConfig,
}

impl std::fmt::Debug for ContextElementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextElementService")
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

impl ContextElementService {
    pub fn new(elements: Arc<dyn ContextElementRepository>, pagination: PaginationConfig) -> Self {
        Self {
            elements,
            pagination,
        }
    }

    pub async fn create(&self, user_id: u64, content: ElementContent) -> Result<ContextElement> {
        validate_content(&content, true)?;

        let element = self.elements.create(user_id, content).await?;
        info!("Context element {} created by user {}", element.id, user_id);
        Ok(element)
    }

    pub async fn get(&self, user_id: u64, id: u64) -> Result<ContextElement> {
        self.owned(user_id, id).await
    }

    /// One page of the caller's elements plus the total
    pub async fn list(
        &self,
        user_id: u64,
        query: ElementQuery,
    ) -> Result<(Vec<ContextElement>, ListQuery, u64)> {
        let query = self.normalize(query);
        let (items, total) = self.elements.list_by_user(user_id, &query).await?;

        debug!(
            "Listed {} of {} context elements for user {}",
            items.len(),
            total,
            user_id
        );
        Ok((items, query, total))
    }

    /// Overwrite the non-empty fields of `patch`
    pub async fn update(
        &self,
        user_id: u64,
        id: u64,
        patch: ElementContent,
    ) -> Result<ContextElement> {
        validate_content(&patch, false)?;

        let mut element = self.owned(user_id, id).await?;
        element.content.apply_patch(&patch);

        let element = self.elements.update(&element).await?;
        info!("Context element {} updated by user {}", id, user_id);
        Ok(element)
    }

    pub async fn delete(&self, user_id: u64, id: u64) -> Result<()> {
        self.owned(user_id, id).await?;
        self.elements.delete(id).await?;

        info!("Context element {} deleted by user {}", id, user_id);
        Ok(())
    }

    /// Apply pagination defaults and caps to a raw query
    pub fn normalize(&self, query: ElementQuery) -> ListQuery {
        let page = if query.page <= 0 {
            self.pagination.default_page
        } else {
            query.page as u64
        };

        let size = if query.size <= 0 {
            self.pagination.default_size
        } else {
            (query.size as u64).min(self.pagination.max_size)
        };

        let (sort_by, sort_desc) = if query.sort_by.is_empty() {
            (SortField::CreatedAt, true)
        } else {
            (SortField::parse(&query.sort_by), query.sort_desc)
        };

        ListQuery {
            page,
            size,
            keyword: non_empty(query.keyword),
            subject: non_empty(query.subject),
            ai_role: non_empty(query.ai_role),
            my_role: non_empty(query.my_role),
            sort_by,
            sort_desc,
        }
    }

    async fn owned(&self, user_id: u64, id: u64) -> Result<ContextElement> {
        let element = self
            .elements
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::element_not_found(format!("Element {} not found", id)))?;

        if element.user_id != user_id {
            warn!("User {} denied access to context element {}", user_id, id);
            return Err(AppError::forbidden("Context element belongs to another user"));
        }

        Ok(element)
    }
}

/// Length limits, plus a mandatory subject on create
fn validate_content(content: &ElementContent, require_subject: bool) -> Result<()> {
    if require_subject && content.subject.trim().is_empty() {
        return Err(AppError::invalid_element("subject is required"));
    }
    if content.subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(AppError::invalid_element(format!(
            "subject exceeds {} characters",
            MAX_SUBJECT_LEN
        )));
    }

    for (name, value) in content.fields() {
        if value.chars().count() > MAX_FIELD_LEN {
            return Err(AppError::invalid_element(format!(
                "{} exceeds {} characters",
                name, MAX_FIELD_LEN
            )));
        }
    }

    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
