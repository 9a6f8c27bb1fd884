//! In-process storage backend
//!
//! Selected with a `memory://` database URL. State lives for the process
//! lifetime only.

use crate::core::models::{ContextElement, ElementContent, ListQuery, NewUser, SortField, User};
use crate::storage::repository::{ContextElementRepository, UserRepository};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<u64, User>,
    /// Elements with their soft-delete flag
    elements: BTreeMap<u64, (ContextElement, bool)>,
    next_user_id: u64,
    next_element_id: u64,
}

impl MemoryState {
    fn live_element(&self, id: u64) -> Option<&ContextElement> {
        self.elements
            .get(&id)
            .filter(|(_, deleted)| !deleted)
            .map(|(element, _)| element)
    }

    fn live_elements_of(&self, user_id: u64) -> impl Iterator<Item = &ContextElement> {
        self.elements
            .values()
            .filter(move |(element, deleted)| !deleted && element.user_id == user_id)
            .map(|(element, _)| element)
    }
}

/// Storage backend holding everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &ContextElement, b: &ContextElement, sort_by: SortField) -> Ordering {
    let primary = match sort_by {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Subject => a.content.subject.cmp(&b.content.subject),
    };
    primary.then(a.id.cmp(&b.id))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut state = self.state.write();

        if state.users.values().any(|u| u.phone == new_user.phone) {
            return Err(AppError::UserExists(new_user.phone));
        }

        state.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.next_user_id,
            phone: new_user.phone,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|u| u.phone == phone)
            .cloned())
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool> {
        Ok(self.state.read().users.values().any(|u| u.phone == phone))
    }

    async fn update_password(&self, id: u64, password_hash: &str) -> Result<()> {
        let mut state = self.state.write();
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::user_not_found(format!("User {} not found", id)))?;

        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ContextElementRepository for MemoryStore {
    async fn create(&self, user_id: u64, content: ElementContent) -> Result<ContextElement> {
        let mut state = self.state.write();

        state.next_element_id += 1;
        let now = Utc::now();
        let element = ContextElement {
            id: state.next_element_id,
            user_id,
            content,
            created_at: now,
            updated_at: now,
        };
        state.elements.insert(element.id, (element.clone(), false));

        Ok(element)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<ContextElement>> {
        Ok(self.state.read().live_element(id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: u64,
        query: &ListQuery,
    ) -> Result<(Vec<ContextElement>, u64)> {
        let state = self.state.read();

        let mut matching: Vec<&ContextElement> = state
            .live_elements_of(user_id)
            .filter(|element| query.matches(&element.content))
            .collect();

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort_by);
            if query.sort_desc { ordering.reverse() } else { ordering }
        });

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update(&self, element: &ContextElement) -> Result<ContextElement> {
        let mut state = self.state.write();

        let stored = match state.elements.get_mut(&element.id) {
            Some((stored, false)) => stored,
            _ => {
                return Err(AppError::element_not_found(format!(
                    "Element {} not found",
                    element.id
                )));
            }
        };

        stored.content = element.content.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut state = self.state.write();

        match state.elements.get_mut(&id) {
            Some((_, deleted)) if !*deleted => {
                *deleted = true;
                Ok(())
            }
            _ => Err(AppError::element_not_found(format!("Element {} not found", id))),
        }
    }

    async fn count_by_user(&self, user_id: u64) -> Result<u64> {
        Ok(self.state.read().live_elements_of(user_id).count() as u64)
    }
}
