//! Database integration tests
//!
//! Exercises the SeaORM repositories against in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::common::{ElementFactory, TestDatabase, UserFactory};
    use cese_backend::core::models::{ListQuery, SortField};
    use cese_backend::storage::{ContextElementRepository, UserRepository};
    use cese_backend::utils::error::AppError;

    fn repos(db: &TestDatabase) -> (&dyn UserRepository, &dyn ContextElementRepository) {
        let users: &dyn UserRepository = db.db();
        let elements: &dyn ContextElementRepository = db.db();
        (users, elements)
    }

    #[tokio::test]
    async fn test_user_create_and_lookup() {
        let db = TestDatabase::new().await;
        let (users, _) = repos(&db);

        let user = users.create(UserFactory::new_user(1)).await.unwrap();
        assert!(user.id > 0);
        assert_eq!(user.phone, UserFactory::phone(1));

        let by_phone = users.find_by_phone(&user.phone).await.unwrap();
        assert_eq!(by_phone.as_ref().map(|u| u.id), Some(user.id));

        let by_id = users.find_by_id(user.id).await.unwrap();
        assert_eq!(by_id, by_phone);

        assert!(users.exists_by_phone(&user.phone).await.unwrap());
        assert!(!users.exists_by_phone(&UserFactory::phone(2)).await.unwrap());
        assert!(users.find_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_user_exists() {
        let db = TestDatabase::new().await;
        let (users, _) = repos(&db);

        users.create(UserFactory::new_user(1)).await.unwrap();
        let err = users.create(UserFactory::new_user(1)).await.unwrap_err();
        assert!(matches!(err, AppError::UserExists(_)));
    }

    #[tokio::test]
    async fn test_update_password() {
        let db = TestDatabase::new().await;
        let (users, _) = repos(&db);
        let user = users.create(UserFactory::new_user(1)).await.unwrap();

        users.update_password(user.id, "new-hash").await.unwrap();
        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "new-hash");

        let err = users.update_password(4242, "x").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_element_crud_and_soft_delete() {
        let db = TestDatabase::new().await;
        let (users, elements) = repos(&db);
        let user = users.create(UserFactory::new_user(1)).await.unwrap();

        let created = elements
            .create(user.id, ElementFactory::content("Weekly report"))
            .await
            .unwrap();
        assert_eq!(created.user_id, user.id);
        assert_eq!(created.content.subject, "Weekly report");

        let mut changed = created.clone();
        changed.content.ai_role = "reviewer".to_string();
        let updated = elements.update(&changed).await.unwrap();
        assert_eq!(updated.content.ai_role, "reviewer");
        assert!(updated.updated_at >= created.updated_at);

        assert_eq!(elements.count_by_user(user.id).await.unwrap(), 1);
        elements.delete(created.id).await.unwrap();

        assert!(elements.find_by_id(created.id).await.unwrap().is_none());
        assert_eq!(elements.count_by_user(user.id).await.unwrap(), 0);

        // A soft deleted row is gone for every write too
        let err = elements.delete(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::ElementNotFound(_)));
        let err = elements.update(&changed).await.unwrap_err();
        assert!(matches!(err, AppError::ElementNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_ownership() {
        let db = TestDatabase::new().await;
        let (users, elements) = repos(&db);
        let alice = users.create(UserFactory::new_user(1)).await.unwrap();
        let bob = users.create(UserFactory::new_user(2)).await.unwrap();

        for (subject, role) in [
            ("Release notes", "editor"),
            ("Bug triage", "engineer"),
            ("Sprint review", "editor"),
        ] {
            elements
                .create(alice.id, ElementFactory::with_ai_role(subject, role))
                .await
                .unwrap();
        }
        elements
            .create(bob.id, ElementFactory::content("Release plan"))
            .await
            .unwrap();

        let (items, total) = elements
            .list_by_user(alice.id, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert!(items.iter().all(|e| e.user_id == alice.id));

        let query = ListQuery {
            ai_role: Some("edit".to_string()),
            ..ListQuery::default()
        };
        let (_, total) = elements.list_by_user(alice.id, &query).await.unwrap();
        assert_eq!(total, 2);

        let query = ListQuery {
            keyword: Some("triage".to_string()),
            ..ListQuery::default()
        };
        let (items, total) = elements.list_by_user(alice.id, &query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].content.subject, "Bug triage");

        let query = ListQuery {
            subject: Some("Release".to_string()),
            ..ListQuery::default()
        };
        let (items, _) = elements.list_by_user(bob.id, &query).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content.subject, "Release plan");
    }

    #[tokio::test]
    async fn test_list_sorting_and_paging() {
        let db = TestDatabase::new().await;
        let (users, elements) = repos(&db);
        let user = users.create(UserFactory::new_user(1)).await.unwrap();

        for subject in ["delta", "alpha", "charlie", "bravo", "echo"] {
            elements
                .create(user.id, ElementFactory::content(subject))
                .await
                .unwrap();
        }

        let query = ListQuery {
            sort_by: SortField::Subject,
            sort_desc: false,
            size: 2,
            ..ListQuery::default()
        };
        let (first, total) = elements.list_by_user(user.id, &query).await.unwrap();
        assert_eq!(total, 5);
        let subjects: Vec<_> = first.iter().map(|e| e.content.subject.as_str()).collect();
        assert_eq!(subjects, ["alpha", "bravo"]);

        let query = ListQuery { page: 3, ..query };
        let (last, total) = elements.list_by_user(user.id, &query).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].content.subject, "echo");

        // Newest first
        let query = ListQuery {
            sort_desc: true,
            size: 10,
            ..ListQuery::default()
        };
        let (all, _) = elements.list_by_user(user.id, &query).await.unwrap();
        let ids: Vec<_> = all.iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_page_far_past_the_end_is_empty() {
        let db = TestDatabase::new().await;
        let (users, elements) = repos(&db);
        let user = users.create(UserFactory::new_user(1)).await.unwrap();
        elements
            .create(user.id, ElementFactory::content("Only one"))
            .await
            .unwrap();

        let query = ListQuery {
            page: 1_000_000_000_000_000_000,
            size: 10,
            ..ListQuery::default()
        };
        let (items, total) = elements.list_by_user(user.id, &query).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }
}
